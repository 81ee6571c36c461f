// Primitives for reading CSV files.

use crate::bench::{io_common::RawTable, *};

const BOM: char = '\u{feff}';

pub fn read_csv_table(path: &str) -> BenchResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        // Short and long rows are reported by the dataset builder.
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let headers: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { path, lineno: 1u64 })?
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            if idx == 0 {
                h.trim_start_matches(BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect();
    debug!("read_csv_table: headers: {:?}", headers);

    let mut rows: Vec<(u64, Vec<String>)> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is on line 1.
        let fallback_lineno = idx as u64 + 2;
        let line = line_r.context(CsvLineParseSnafu {
            path,
            lineno: fallback_lineno,
        })?;
        let lineno = line
            .position()
            .map(|p| p.line())
            .unwrap_or(fallback_lineno);
        rows.push((lineno, line.iter().map(|s| s.to_string()).collect()));
    }
    Ok(RawTable { headers, rows })
}
