// Encoding of a ranking back to CSV.

use log::debug;

use crate::{BenchmarkErrors, ComparisonView, InstitutionRecord};

/// Serializes rows with their header, in the column order of the source.
///
/// Fields are quoted only when they need to be. The output only depends on the
/// input, so repeated calls give the same bytes.
pub fn encode_csv(headers: &[String], rows: &[&InstitutionRecord]) -> Result<Vec<u8>, BenchmarkErrors> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());
    writer
        .write_record(headers)
        .map_err(|e| BenchmarkErrors::Encoding(e.to_string()))?;
    for r in rows.iter() {
        writer
            .write_record(r.cells())
            .map_err(|e| BenchmarkErrors::Encoding(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| BenchmarkErrors::Encoding(e.to_string()))?;
    debug!("encode_csv: {} rows, {} bytes", rows.len(), bytes.len());
    Ok(bytes)
}

/// The ranking of a comparison page, as offered for download.
pub fn export_ranking(view: &ComparisonView) -> Result<Vec<u8>, BenchmarkErrors> {
    encode_csv(view.headers, &view.ranking)
}
