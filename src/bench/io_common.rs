use std::path::Path;

use aid_scoring::builder::Builder;

use crate::bench::*;

/// A table as read by one of the providers, before validation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// (line number in the source, cells)
    pub rows: Vec<(u64, Vec<String>)>,
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Runs the validation of the dataset builder over a raw table.
pub fn build_dataset(level: ProgramLevel, table: RawTable, path: &str) -> BenchResult<Dataset> {
    let mut builder = Builder::new(level)
        .headers(&table.headers)
        .context(InvalidDatasetSnafu { level, path })?;
    for (lineno, cells) in table.rows.iter() {
        builder
            .add_row(*lineno, cells)
            .context(InvalidDatasetSnafu { level, path })?;
    }
    let dataset = builder.build();
    info!(
        "build_dataset: {}: {} institutions ({})",
        simplify_file_name(path),
        dataset.len(),
        level
    );
    Ok(dataset)
}

/// Reads and validates the dataset of one source.
pub fn load_dataset(source: &DataSource) -> BenchResult<Dataset> {
    let path = source.path.display().to_string();
    info!("Attempting to read {} file {:?}", source.level, path);
    let table = match source.input_type {
        InputType::Csv => io_csv::read_csv_table(&path)?,
        InputType::Xlsx => io_xlsx::read_xlsx_table(&path, source.worksheet.as_deref())?,
    };
    debug!(
        "load_dataset: headers: {:?} rows: {}",
        table.headers,
        table.rows.len()
    );
    build_dataset(source.level, table, &path)
}
