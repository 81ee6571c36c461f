// Text rendering of the dashboard pages.

use std::io::{self, Write};

use comfy_table::presets::ASCII_FULL;
use comfy_table::Table;
use serde_json::json;

use crate::bench::*;

/// Width of the bar of a rating of 5.
const BAR_WIDTH: usize = 40;

pub fn title(w: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(w, "{}", title)?;
    writeln!(w, "{}", "=".repeat(title.chars().count()))
}

pub fn section(w: &mut dyn Write, section: Section) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "## {}", section.title())?;
    writeln!(w)?;
    writeln!(w, "{}", section.body())?;
    writeln!(w)
}

pub fn failure(w: &mut dyn Write, level: ProgramLevel, err: &BenchError) -> io::Result<()> {
    writeln!(w, "The {} data could not be loaded: {}", level, err)
}

pub fn unknown_names(w: &mut dyn Write, unknown: &[String], available: &[&str]) -> io::Result<()> {
    writeln!(w, "Unknown universities, ignored: {}", unknown.join(", "))?;
    writeln!(w, "Available: {}", available.join(", "))
}

/// Every column of the source, with the cells as they were read.
fn comparison_table(view: &ComparisonView) -> Table {
    let header: Vec<&str> = view.headers.iter().map(|h| h.as_str()).collect();
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(header);
    for r in view.table.iter() {
        table.add_row(r.cells().to_vec());
    }
    table
}

/// One row per dimension, one column per record.
///
/// A name that appears several times gets its rank appended, e.g. `A (2)`.
fn radar_table(level: ProgramLevel, points: &[RadarPoint]) -> Table {
    let dimensions = level.schema().dimensions;
    // The series holds one run of dimensions per record.
    let records: Vec<&[RadarPoint]> = points.chunks(dimensions.len().max(1)).collect();

    let mut header: Vec<String> = vec!["Dimension".to_string()];
    for (idx, rec) in records.iter().enumerate() {
        let name = rec.first().map(|p| p.institution).unwrap_or_default();
        let before = records[..idx]
            .iter()
            .filter(|r| r.first().map(|p| p.institution) == Some(name))
            .count();
        if before == 0 {
            header.push(name.to_string());
        } else {
            header.push(format!("{} ({})", name, before + 1));
        }
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(header);
    for dimension in dimensions.iter() {
        let mut row: Vec<String> = vec![dimension.to_string()];
        for rec in records.iter() {
            let score = rec
                .iter()
                .find(|p| p.dimension == *dimension)
                .map(|p| p.score.to_string())
                .unwrap_or_default();
            row.push(score);
        }
        table.add_row(row);
    }
    table
}

fn detail(w: &mut dyn Write, card: &DetailCard) -> io::Result<()> {
    writeln!(w, "### {}", card.name)?;
    for (column, value) in card.fields.iter() {
        writeln!(w, "  {}: {}", column, value)?;
    }
    writeln!(w, "  Overall rating: {}", card.overall_rating)
}

fn bar(rating: f64) -> String {
    let len = (rating.clamp(0.0, MAX_SCORE as f64) / MAX_SCORE as f64 * BAR_WIDTH as f64).round();
    "#".repeat(len as usize)
}

fn ranking(w: &mut dyn Write, view: &ComparisonView) -> io::Result<()> {
    let width = view
        .ranking
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);
    for r in view.ranking.iter() {
        writeln!(
            w,
            "{:<width$} | {} {}",
            r.name,
            bar(r.overall_rating),
            r.overall_rating,
            width = width
        )?;
    }
    Ok(())
}

/// The comparison table, the radar grid, the detail card and the ranking, in
/// this order.
pub fn comparison(w: &mut dyn Write, view: &ComparisonView) -> io::Result<()> {
    writeln!(w, "### Comparison")?;
    if view.table.is_empty() {
        writeln!(w, "No university selected.")?;
    } else {
        writeln!(w, "{}", comparison_table(view))?;
    }
    writeln!(w)?;

    writeln!(w, "### Radar")?;
    match &view.radar {
        Some(points) => writeln!(w, "{}", radar_table(view.level, points))?,
        None => writeln!(w, "{}", RADAR_GUIDANCE)?,
    }

    if let Some(card) = &view.detail {
        writeln!(w)?;
        detail(w, card)?;
    }

    writeln!(w)?;
    writeln!(w, "### Ranking by overall rating")?;
    ranking(w, view)
}

pub fn view_to_json(view: &ComparisonView) -> JSValue {
    let radar: Option<Vec<JSValue>> = view.radar.as_ref().map(|points| {
        points
            .iter()
            .map(|p| json!({"institution": p.institution, "dimension": p.dimension, "score": p.score}))
            .collect()
    });
    let detail: Option<JSValue> = view.detail.as_ref().map(|card| {
        let fields: Vec<JSValue> = card
            .fields
            .iter()
            .map(|(column, value)| json!({"column": column, "value": value}))
            .collect();
        json!({"name": card.name, "fields": fields, "overallRating": card.overall_rating})
    });
    let ranking: Vec<JSValue> = view
        .ranking
        .iter()
        .map(|r| json!({"name": r.name, "overallRating": r.overall_rating}))
        .collect();
    json!({
        "level": view.level.as_str(),
        "selected": view.table.iter().map(|r| r.name.as_str()).collect::<Vec<&str>>(),
        "radar": radar,
        "detail": detail,
        "ranking": ranking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::io_common::{build_dataset, RawTable};

    fn dataset(rows: &[(&str, &str, &str)]) -> Dataset {
        let headers: Vec<String> = ProgramLevel::Master
            .schema()
            .required_columns()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows: Vec<(u64, Vec<String>)> = rows
            .iter()
            .enumerate()
            .map(|(idx, (name, rating, label))| {
                let cells = headers
                    .iter()
                    .map(|h| match h.as_str() {
                        "University" => name.to_string(),
                        "Overall Rating" => rating.to_string(),
                        "Transparency" => label.to_string(),
                        _ => "Medium".to_string(),
                    })
                    .collect();
                (idx as u64 + 2, cells)
            })
            .collect();
        build_dataset(ProgramLevel::Master, RawTable { headers, rows }, "mem.csv").unwrap()
    }

    fn example() -> Dataset {
        dataset(&[
            ("A", "4.2", "Excellent"),
            ("B", "4.8", "Basic"),
            ("C", "3.9", "UnknownLabel"),
        ])
    }

    fn cells_of(line: &str) -> Vec<&str> {
        line.split('|').map(str::trim).filter(|s| !s.is_empty()).collect()
    }

    fn render(view: &ComparisonView) -> String {
        let mut buf: Vec<u8> = Vec::new();
        comparison(&mut buf, view).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn radar_grid() {
        let ds = example();
        let view = build_comparison(&ds, &ProgramLevel::Master.score_table(), &Selection::All);
        let grid = radar_table(view.level, view.radar.as_ref().unwrap()).to_string();
        let header = grid.lines().find(|l| l.contains("Dimension")).unwrap();
        assert_eq!(cells_of(header), vec!["Dimension", "A", "B", "C"]);
        let transparency = grid.lines().find(|l| l.contains("Transparency")).unwrap();
        assert_eq!(cells_of(transparency), vec!["Transparency", "5", "2", "3"]);
        let disclosure = grid.lines().find(|l| l.contains("Data Disclosure")).unwrap();
        assert_eq!(cells_of(disclosure), vec!["Data Disclosure", "3", "3", "3"]);

        let text = render(&view);
        assert!(!text.contains(RADAR_GUIDANCE));
        assert!(!text.contains("Overall rating:"));
    }

    #[test]
    fn table_keeps_every_column() {
        let mut headers: Vec<String> = ProgramLevel::Master
            .schema()
            .required_columns()
            .iter()
            .map(|s| s.to_string())
            .collect();
        headers.push("Notes".to_string());
        let cells: Vec<String> = headers
            .iter()
            .map(|h| match h.as_str() {
                "University" => "A".to_string(),
                "Types of Aid" => "MeritAidA".to_string(),
                "Overall Rating" => "3.90".to_string(),
                "Notes" => "renewed yearly".to_string(),
                _ => "Medium".to_string(),
            })
            .collect();
        let ds = build_dataset(
            ProgramLevel::Master,
            RawTable {
                headers: headers.clone(),
                rows: vec![(2, cells)],
            },
            "mem.csv",
        )
        .unwrap();
        let view = build_comparison(&ds, &ProgramLevel::Master.score_table(), &Selection::All);
        let grid = comparison_table(&view).to_string();

        let header = grid.lines().find(|l| l.contains("University")).unwrap();
        assert_eq!(cells_of(header), headers.iter().map(|h| h.as_str()).collect::<Vec<&str>>());
        let row = grid.lines().find(|l| l.contains("MeritAidA")).unwrap();
        let row_cells = cells_of(row);
        assert_eq!(row_cells.len(), headers.len());
        assert_eq!(row_cells[11], "3.90");
        assert_eq!(row_cells[12], "renewed yearly");
    }

    #[test]
    fn radar_grid_with_duplicate_names() {
        let ds = dataset(&[("A", "4", "Excellent"), ("A", "3", "Basic"), ("B", "2", "None")]);
        let view = build_comparison(&ds, &ProgramLevel::Master.score_table(), &Selection::All);
        let grid = radar_table(view.level, view.radar.as_ref().unwrap()).to_string();
        let header = grid.lines().find(|l| l.contains("Dimension")).unwrap();
        assert_eq!(cells_of(header), vec!["Dimension", "A", "A (2)", "B"]);
        let transparency = grid.lines().find(|l| l.contains("Transparency")).unwrap();
        assert_eq!(cells_of(transparency), vec!["Transparency", "5", "2", "1"]);
    }

    #[test]
    fn single_institution() {
        let ds = example();
        let view = build_comparison(
            &ds,
            &ProgramLevel::Master.score_table(),
            &Selection::from_names(&["C"]),
        );
        let text = render(&view);
        assert!(text.contains(RADAR_GUIDANCE));
        assert!(text.contains("### C\n"));
        assert!(text.contains("  Transparency: UnknownLabel"));
        assert!(text.contains("  Overall rating: 3.9"));
    }

    #[test]
    fn empty_selection() {
        let ds = example();
        let none: &[&str] = &[];
        let view = build_comparison(&ds, &ProgramLevel::Master.score_table(), &Selection::from_names(none));
        let text = render(&view);
        assert!(text.contains("No university selected."));
        assert!(text.contains(RADAR_GUIDANCE));
        assert!(text.trim_end().ends_with("### Ranking by overall rating"));
    }

    #[test]
    fn ranking_bars() {
        let ds = example();
        let view = build_comparison(&ds, &ProgramLevel::Master.score_table(), &Selection::All);
        let mut buf: Vec<u8> = Vec::new();
        ranking(&mut buf, &view).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("B | "));
        assert_eq!(lines[0].matches('#').count(), 38);
        assert!(lines[1].starts_with("A | "));
        assert!(lines[2].starts_with("C | "));
        assert_eq!(bar(7.0).len(), BAR_WIDTH);
        assert_eq!(bar(-1.0), "");
    }

    #[test]
    fn summary_json() {
        let ds = example();
        let table = ProgramLevel::Master.score_table();
        let all = view_to_json(&build_comparison(&ds, &table, &Selection::All));
        assert_eq!(all["selected"], json!(["A", "B", "C"]));
        assert_eq!(all["radar"].as_array().unwrap().len(), 18);
        assert_eq!(all["radar"][0], json!({"institution": "A", "dimension": "Transparency", "score": 5}));
        assert!(all["detail"].is_null());
        assert_eq!(all["ranking"][0], json!({"name": "B", "overallRating": 4.8}));

        let one = view_to_json(&build_comparison(&ds, &table, &Selection::from_names(&["A"])));
        assert!(one["radar"].is_null());
        assert_eq!(one["detail"]["name"], "A");
        assert_eq!(one["detail"]["fields"][0], json!({"column": "University", "value": "A"}));
    }
}
