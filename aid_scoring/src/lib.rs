/*!

Scoring and comparison pipeline for financial-aid benchmarking tables.

The input is a table with one row per university, as produced by a benchmarking
study: a few descriptive columns, a set of qualitative evaluation dimensions
("Basic", "Very clear", ...) and an independently assigned overall rating. This
crate turns such a table into the views of a comparison dashboard:

- the filtered table
- a radar series, mapping every qualitative label to a score between 1 and 5
- a detail card, when a single institution is selected
- a ranking by overall rating, which can be exported back to CSV

```
use aid_scoring::builder::Builder;
use aid_scoring::*;

let headers: Vec<String> = ProgramLevel::Master
    .schema()
    .required_columns()
    .iter()
    .map(|s| s.to_string())
    .collect();
let mut builder = Builder::new(ProgramLevel::Master).headers(&headers)?;
let row = |name: &str, label: &str, rating: &str| -> Vec<String> {
    headers
        .iter()
        .map(|h| match h.as_str() {
            "University" => name.to_string(),
            "Overall Rating" => rating.to_string(),
            "Transparency" => label.to_string(),
            _ => "".to_string(),
        })
        .collect()
};
builder.add_row(2, &row("A", "Excellent", "4.2"))?;
builder.add_row(3, &row("B", "Basic", "4.8"))?;
let dataset = builder.build();

let view = build_comparison(&dataset, &ProgramLevel::Master.score_table(), &Selection::All);
let names: Vec<&str> = view.ranking.iter().map(|r| r.name.as_str()).collect();
assert_eq!(names, vec!["B", "A"]);
# Ok::<(), BenchmarkErrors>(())
```
*/

pub mod builder;
mod config;
pub mod export;
pub mod manual;

use log::{debug, info};

use std::collections::HashSet;

pub use crate::config::*;

// ********* Records **********

/// One university, as read from a benchmarking table.
#[derive(PartialEq, Debug, Clone)]
pub struct InstitutionRecord {
    pub name: String,
    pub types_of_aid: String,
    pub scholarship_amounts: String,
    pub loans_offered: String,
    pub cost_of_living_info: String,
    /// The qualitative labels, one per dimension of the schema, in the same order.
    pub labels: Vec<String>,
    pub overall_rating: f64,
    /// The source cells, in header order. They are kept verbatim for display and export.
    pub(crate) cells: Vec<String>,
}

impl InstitutionRecord {
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// An immutable table of institutions for one program level.
///
/// Rows keep the order of the source file.
#[derive(PartialEq, Debug, Clone)]
pub struct Dataset {
    pub(crate) level: ProgramLevel,
    pub(crate) headers: Vec<String>,
    pub(crate) records: Vec<InstitutionRecord>,
}

impl Dataset {
    pub fn level(&self) -> ProgramLevel {
        self.level
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[InstitutionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The distinct institution names, in order of first appearance.
    pub fn names(&self) -> Vec<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.records
            .iter()
            .map(|r| r.name.as_str())
            .filter(|n| seen.insert(*n))
            .collect()
    }
}

// ********* Filtering **********

/// The institutions chosen by the user.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Selection {
    All,
    Only(HashSet<String>),
}

impl Selection {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Selection {
        Selection::Only(names.iter().map(|s| s.as_ref().to_string()).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(names) => names.contains(name),
        }
    }
}

/// Restricts the dataset to the selected institutions, keeping the source order.
pub fn filter_records<'a>(dataset: &'a Dataset, selection: &Selection) -> Vec<&'a InstitutionRecord> {
    if let Selection::Only(names) = selection {
        for n in names.iter() {
            if !dataset.records.iter().any(|r| r.name == *n) {
                debug!("filter_records: {:?} is not part of the dataset", n);
            }
        }
    }
    dataset
        .records
        .iter()
        .filter(|r| selection.contains(&r.name))
        .collect()
}

// ********* Views **********

/// One point of the radar chart.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RadarPoint<'a> {
    pub institution: &'a str,
    pub dimension: &'static str,
    pub score: u8,
}

/// The full content of a single record, for the detail card.
#[derive(PartialEq, Debug, Clone)]
pub struct DetailCard<'a> {
    pub name: &'a str,
    /// (column, raw value) pairs in header order.
    pub fields: Vec<(&'a str, &'a str)>,
    pub overall_rating: f64,
}

/// All the views of the comparison page, computed from one selection.
#[derive(PartialEq, Debug, Clone)]
pub struct ComparisonView<'a> {
    pub level: ProgramLevel,
    pub headers: &'a [String],
    pub table: Vec<&'a InstitutionRecord>,
    /// Only present with at least two institutions.
    pub radar: Option<Vec<RadarPoint<'a>>>,
    /// Only present with exactly one institution.
    pub detail: Option<DetailCard<'a>>,
    pub ranking: Vec<&'a InstitutionRecord>,
}

/// Scores every dimension of every record.
///
/// The series is grouped by institution, then by dimension in schema order.
pub fn radar_series<'a>(
    level: ProgramLevel,
    records: &[&'a InstitutionRecord],
    table: &ScoreTable,
) -> Vec<RadarPoint<'a>> {
    let dimensions = level.schema().dimensions;
    let mut res: Vec<RadarPoint<'a>> = Vec::with_capacity(records.len() * dimensions.len());
    for r in records.iter() {
        for (dimension, label) in dimensions.iter().zip(r.labels.iter()) {
            res.push(RadarPoint {
                institution: r.name.as_str(),
                dimension: *dimension,
                score: table.score(label),
            });
        }
    }
    res
}

pub fn detail_card<'a>(headers: &'a [String], record: &'a InstitutionRecord) -> DetailCard<'a> {
    DetailCard {
        name: record.name.as_str(),
        fields: headers
            .iter()
            .map(|h| h.as_str())
            .zip(record.cells.iter().map(|c| c.as_str()))
            .collect(),
        overall_rating: record.overall_rating,
    }
}

/// Sorts by overall rating, best first. Equal ratings keep their relative order.
pub fn rank_by_rating<'a>(records: &[&'a InstitutionRecord]) -> Vec<&'a InstitutionRecord> {
    let mut res: Vec<&'a InstitutionRecord> = records.to_vec();
    // Ratings are finite by construction, the fallback never triggers.
    res.sort_by(|a, b| {
        b.overall_rating
            .partial_cmp(&a.overall_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    res
}

/// Builds all the views of the comparison page.
///
/// Arguments:
/// * `dataset` the table for one program level
/// * `table` the score table used for the radar series
/// * `selection` the institutions to keep
pub fn build_comparison<'a>(
    dataset: &'a Dataset,
    table: &ScoreTable,
    selection: &Selection,
) -> ComparisonView<'a> {
    let filtered = filter_records(dataset, selection);
    info!(
        "build_comparison: level: {} selected {} of {} institutions",
        dataset.level,
        filtered.len(),
        dataset.len()
    );

    let radar = if filtered.len() > 1 {
        Some(radar_series(dataset.level, &filtered, table))
    } else {
        None
    };
    let detail = match filtered.as_slice() {
        [single] => Some(detail_card(&dataset.headers, *single)),
        _ => None,
    };
    let ranking = rank_by_rating(&filtered);
    debug!(
        "build_comparison: ranking: {:?}",
        ranking.iter().map(|r| &r.name).collect::<Vec<_>>()
    );

    ComparisonView {
        level: dataset.level,
        headers: &dataset.headers,
        table: filtered,
        radar,
        detail,
        ranking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn headers(level: ProgramLevel) -> Vec<String> {
        level
            .schema()
            .required_columns()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    // rows: (name, rating), cells: (name, column, label). Unlisted labels are "Medium".
    fn make_dataset(level: ProgramLevel, rows: &[(&str, &str)], cells: &[(&str, &str, &str)]) -> Dataset {
        let hs = headers(level);
        let schema = level.schema();
        let mut builder = Builder::new(level).headers(&hs).unwrap();
        for (idx, (name, rating)) in rows.iter().enumerate() {
            let row: Vec<String> = hs
                .iter()
                .map(|h| {
                    if h == schema.name_column {
                        name.to_string()
                    } else if h == schema.rating_column {
                        rating.to_string()
                    } else {
                        cells
                            .iter()
                            .find(|(n, c, _)| n == name && *c == h.as_str())
                            .map(|(_, _, v)| v.to_string())
                            .unwrap_or_else(|| "Medium".to_string())
                    }
                })
                .collect();
            builder.add_row((idx + 2) as u64, &row).unwrap();
        }
        builder.build()
    }

    fn names<'a>(records: &[&'a InstitutionRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn undergraduate_table_entries() {
        let table = ProgramLevel::Undergraduate.score_table();
        let expected: &[(&str, u8)] = &[
            ("None", 1),
            ("Basic", 2),
            ("Limited", 2),
            ("Medium", 3),
            ("Good", 4),
            ("Clear", 4),
            ("Defined", 4),
            ("Very clear", 5),
            ("Excellent", 5),
            ("Descriptive + stats", 4),
            ("Clear eligibility descriptions", 5),
            ("Clear coverage", 4),
            ("Clear per type", 4),
            ("Aggregated only", 2),
            ("User estimates", 3),
            ("Not integrated", 2),
        ];
        assert_eq!(table.entries().len(), expected.len());
        for (label, score) in expected {
            assert_eq!(table.score(label), *score, "label {:?}", label);
        }
    }

    #[test]
    fn master_table_entries() {
        let table = ProgramLevel::Master.score_table();
        let expected: &[(&str, u8)] = &[
            ("None", 1),
            ("Basic", 2),
            ("Limited", 2),
            ("Medium", 3),
            ("Some stats", 3),
            ("Good", 4),
            ("Defined", 4),
            ("Structured", 4),
            ("High", 5),
            ("Very clear", 5),
            ("Excellent", 5),
            ("Descriptive + stats", 4),
            ("Clear explanations", 5),
            ("Strong descriptions", 4),
            ("Centralized portal", 5),
            ("Detailed listings", 4),
            ("Clear", 4),
        ];
        assert_eq!(table.entries().len(), expected.len());
        for (label, score) in expected {
            assert_eq!(table.score(label), *score, "label {:?}", label);
        }
    }

    #[test]
    fn unknown_labels_default_to_three() {
        for level in ProgramLevel::ALL {
            let table = level.score_table();
            for label in ["", "UnknownLabel", "excellent", " Basic", "BASIC", "Very Clear", "ñ"] {
                assert_eq!(table.score(label), DEFAULT_SCORE, "label {:?}", label);
            }
        }
        // Vocabularies stay separate.
        assert_eq!(ProgramLevel::Undergraduate.score_table().score("Centralized portal"), 3);
        assert_eq!(ProgramLevel::Master.score_table().score("Aggregated only"), 3);
    }

    #[test]
    fn table_overrides_stay_in_range() {
        let table = ProgramLevel::Master
            .score_table()
            .with_entry("Basic", 3)
            .unwrap()
            .with_entry("Portal + chat", 5)
            .unwrap();
        assert_eq!(table.score("Basic"), 3);
        assert_eq!(table.score("Portal + chat"), 5);
        assert!(ProgramLevel::Master.score_table().with_entry("X", 0).is_err());
        assert!(ProgramLevel::Master.score_table().with_entry("X", 6).is_err());
    }

    #[test]
    fn filter_all_keeps_order() {
        init_logger();
        let ds = make_dataset(
            ProgramLevel::Master,
            &[("C", "3.9"), ("A", "4.2"), ("B", "4.8")],
            &[],
        );
        let all = filter_records(&ds, &Selection::All);
        let explicit = filter_records(&ds, &Selection::from_names(&["A", "B", "C"]));
        assert_eq!(names(&all), vec!["C", "A", "B"]);
        assert_eq!(all, explicit);
        assert_eq!(ds.names(), vec!["C", "A", "B"]);
    }

    #[test]
    fn filter_subset_and_unknown_names() {
        let ds = make_dataset(
            ProgramLevel::Master,
            &[("C", "3.9"), ("A", "4.2"), ("B", "4.8")],
            &[],
        );
        let sel = Selection::from_names(&["B", "C", "Nowhere"]);
        assert_eq!(names(&filter_records(&ds, &sel)), vec!["C", "B"]);
    }

    #[test]
    fn empty_selection() {
        let ds = make_dataset(ProgramLevel::Master, &[("A", "4.2"), ("B", "4.8")], &[]);
        let empty: &[&str] = &[];
        let view = build_comparison(&ds, &ProgramLevel::Master.score_table(), &Selection::from_names(empty));
        assert!(view.table.is_empty());
        assert!(view.ranking.is_empty());
        assert_eq!(view.radar, None);
        assert_eq!(view.detail, None);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let ds = make_dataset(
            ProgramLevel::Undergraduate,
            &[
                ("A", "4"),
                ("B", "4.5"),
                ("C", "4.0"),
                ("D", "2"),
                ("E", "4.5"),
            ],
            &[],
        );
        let ranking = rank_by_rating(&filter_records(&ds, &Selection::All));
        assert_eq!(names(&ranking), vec!["B", "E", "A", "C", "D"]);
        for w in ranking.windows(2) {
            assert!(w[0].overall_rating >= w[1].overall_rating);
        }
    }

    #[test]
    fn radar_and_detail_cardinality() {
        let ds = make_dataset(
            ProgramLevel::Master,
            &[("A", "4.2"), ("B", "4.8"), ("C", "3.9")],
            &[],
        );
        let table = ProgramLevel::Master.score_table();

        let three = build_comparison(&ds, &table, &Selection::All);
        assert_eq!(three.radar.as_ref().map(|r| r.len()), Some(3 * 6));
        assert_eq!(three.detail, None);

        let two = build_comparison(&ds, &table, &Selection::from_names(&["A", "C"]));
        assert_eq!(two.radar.as_ref().map(|r| r.len()), Some(2 * 6));
        assert_eq!(two.detail, None);

        let one = build_comparison(&ds, &table, &Selection::from_names(&["B"]));
        assert_eq!(one.radar, None);
        let detail = one.detail.unwrap();
        assert_eq!(detail.name, "B");
        assert_eq!(detail.overall_rating, 4.8);
        assert_eq!(detail.fields.len(), ds.headers().len());
        assert_eq!(detail.fields[0], ("University", "B"));
        assert!(detail.fields.contains(&("Transparency", "Medium")));
        assert_eq!(one.ranking.len(), 1);
    }

    #[test]
    fn radar_series_order() {
        let ds = make_dataset(
            ProgramLevel::Undergraduate,
            &[("A", "4"), ("B", "3")],
            &[
                ("A", "Data Disclosure", "Aggregated only"),
                ("B", "Web UX & Accessibility", "Not integrated"),
            ],
        );
        let records = filter_records(&ds, &Selection::All);
        let series = radar_series(ProgramLevel::Undergraduate, &records, &ProgramLevel::Undergraduate.score_table());
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].institution, "A");
        assert_eq!(series[0].dimension, "Transparency of Info");
        assert_eq!(series[2], RadarPoint { institution: "A", dimension: "Data Disclosure", score: 2 });
        assert_eq!(series[6].institution, "B");
        assert_eq!(series[11], RadarPoint { institution: "B", dimension: "Web UX & Accessibility", score: 2 });
    }

    #[test]
    fn end_to_end_example() {
        init_logger();
        let ds = make_dataset(
            ProgramLevel::Master,
            &[("A", "4.2"), ("B", "4.8"), ("C", "3.9")],
            &[
                ("A", "Transparency", "Excellent"),
                ("B", "Transparency", "Basic"),
                ("C", "Transparency", "UnknownLabel"),
            ],
        );
        let view = build_comparison(
            &ds,
            &ProgramLevel::Master.score_table(),
            &Selection::from_names(&["A", "B", "C"]),
        );
        assert_eq!(names(&view.ranking), vec!["B", "A", "C"]);
        assert_eq!(view.detail, None);
        let transparency: Vec<(&str, u8)> = view
            .radar
            .unwrap()
            .iter()
            .filter(|p| p.dimension == "Transparency")
            .map(|p| (p.institution, p.score))
            .collect();
        assert_eq!(transparency, vec![("A", 5), ("B", 2), ("C", 3)]);
    }
}
