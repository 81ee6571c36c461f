use log::{debug, warn};

use std::collections::HashSet;

pub use crate::config::*;
use crate::{Dataset, InstitutionRecord};

/// A builder for datasets.
///
/// The readers feed it the header row, then every data row. Validation fails
/// closed: as soon as one row is malformed, the whole dataset is refused.
///
/// ```
/// pub use aid_scoring::builder::Builder;
/// pub use aid_scoring::ProgramLevel;
/// # use aid_scoring::BenchmarkErrors;
///
/// let headers = vec!["University".to_string()];
/// let res = Builder::new(ProgramLevel::Undergraduate).headers(&headers);
/// assert!(matches!(res, Err(BenchmarkErrors::MissingColumn { .. })));
///
/// # Ok::<(), BenchmarkErrors>(())
/// ```
pub struct Builder {
    pub(crate) _level: ProgramLevel,
    pub(crate) _headers: Vec<String>,
    pub(crate) _layout: Option<Layout>,
    pub(crate) _records: Vec<InstitutionRecord>,
    pub(crate) _names: HashSet<String>,
}

// Positions of the schema columns in the header row.
pub(crate) struct Layout {
    name: usize,
    types_of_aid: usize,
    scholarship_amounts: usize,
    loans_offered: usize,
    cost_of_living_info: usize,
    dimensions: Vec<usize>,
    rating: usize,
}

impl Builder {
    pub fn new(level: ProgramLevel) -> Builder {
        Builder {
            _level: level,
            _headers: Vec::new(),
            _layout: None,
            _records: Vec::new(),
            _names: HashSet::new(),
        }
    }

    /// Sets the header row. All the columns of the schema must be present; other
    /// columns are kept as they are.
    pub fn headers(self, headers: &[String]) -> Result<Builder, BenchmarkErrors> {
        let schema = self._level.schema();
        let find = |column: &str| -> Result<usize, BenchmarkErrors> {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| BenchmarkErrors::MissingColumn {
                    column: column.to_string(),
                })
        };
        let mut dimensions: Vec<usize> = Vec::new();
        for d in schema.dimensions.iter() {
            dimensions.push(find(d)?);
        }
        let layout = Layout {
            name: find(schema.name_column)?,
            types_of_aid: find(schema.types_of_aid_column)?,
            scholarship_amounts: find(schema.scholarship_amounts_column)?,
            loans_offered: find(schema.loans_offered_column)?,
            cost_of_living_info: find(schema.cost_of_living_column)?,
            dimensions,
            rating: find(schema.rating_column)?,
        };
        debug!(
            "Builder::headers: level: {} headers: {:?}",
            self._level, headers
        );
        Ok(Builder {
            _level: self._level,
            _headers: headers.to_vec(),
            _layout: Some(layout),
            _records: Vec::new(),
            _names: HashSet::new(),
        })
    }

    /// Adds a data row.
    ///
    /// lineno: the position of the row in the source, used in error messages.
    pub fn add_row(&mut self, lineno: u64, cells: &[String]) -> Result<(), BenchmarkErrors> {
        let layout = match self._layout.as_ref() {
            Some(l) => l,
            None => {
                return Err(BenchmarkErrors::MissingColumn {
                    column: self._level.schema().name_column.to_string(),
                })
            }
        };
        if cells.len() != self._headers.len() {
            return Err(BenchmarkErrors::RowLength {
                lineno,
                expected: self._headers.len(),
                found: cells.len(),
            });
        }

        let name = cells[layout.name].clone();
        if name.trim().is_empty() {
            return Err(BenchmarkErrors::EmptyName { lineno });
        }

        let rating_s = cells[layout.rating].trim();
        let overall_rating = match rating_s.parse::<f64>() {
            Ok(x) if x.is_finite() => x,
            _ => {
                return Err(BenchmarkErrors::InvalidRating {
                    lineno,
                    value: cells[layout.rating].clone(),
                })
            }
        };
        if !(f64::from(MIN_SCORE)..=f64::from(MAX_SCORE)).contains(&overall_rating) {
            warn!(
                "add_row: line {}: rating {} of {:?} is outside of the usual scale",
                lineno, overall_rating, name
            );
        }

        if !self._names.insert(name.clone()) {
            warn!("add_row: line {}: duplicate institution {:?}", lineno, name);
        }

        self._records.push(InstitutionRecord {
            name,
            types_of_aid: cells[layout.types_of_aid].clone(),
            scholarship_amounts: cells[layout.scholarship_amounts].clone(),
            loans_offered: cells[layout.loans_offered].clone(),
            cost_of_living_info: cells[layout.cost_of_living_info].clone(),
            labels: layout.dimensions.iter().map(|i| cells[*i].clone()).collect(),
            overall_rating,
            cells: cells.to_vec(),
        });
        Ok(())
    }

    pub fn build(self) -> Dataset {
        Dataset {
            level: self._level,
            headers: self._headers,
            records: self._records,
        }
    }
}
