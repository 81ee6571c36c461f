// ********* Program levels and schemas ***********

use std::error::Error;
use std::fmt::Display;

/// The partition of the benchmarking data.
///
/// Each level has its own table layout and its own label vocabulary, and the two
/// are never merged.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum ProgramLevel {
    Undergraduate,
    Master,
}

/// The column layout expected for one program level.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Schema {
    pub name_column: &'static str,
    pub types_of_aid_column: &'static str,
    pub scholarship_amounts_column: &'static str,
    pub loans_offered_column: &'static str,
    pub cost_of_living_column: &'static str,
    /// The evaluation dimensions, in radar order.
    pub dimensions: &'static [&'static str],
    pub rating_column: &'static str,
}

impl Schema {
    /// All the columns that must be present in a source file.
    pub fn required_columns(&self) -> Vec<&'static str> {
        let mut cols = vec![
            self.name_column,
            self.types_of_aid_column,
            self.scholarship_amounts_column,
        ];
        cols.extend(self.dimensions.iter().copied());
        cols.extend([
            self.loans_offered_column,
            self.cost_of_living_column,
            self.rating_column,
        ]);
        cols
    }
}

pub const UNDERGRADUATE_SCHEMA: Schema = Schema {
    name_column: "University",
    types_of_aid_column: "Types of Aid",
    scholarship_amounts_column: "Scholarship Amounts",
    loans_offered_column: "Loans Offered",
    cost_of_living_column: "Cost of Living Info",
    dimensions: &[
        "Transparency of Info",
        "Application Process Clarity",
        "Data Disclosure",
        "Timeline Visibility",
        "Tools & Support",
        "Web UX & Accessibility",
    ],
    rating_column: "Overall Impression",
};

pub const MASTER_SCHEMA: Schema = Schema {
    name_column: "University",
    types_of_aid_column: "Types of Aid",
    scholarship_amounts_column: "Scholarship Amounts",
    loans_offered_column: "Loans Offered",
    cost_of_living_column: "Cost of Living Info",
    dimensions: &[
        "Transparency",
        "App Process Clarity",
        "Data Disclosure",
        "Timeline Visibility",
        "Tools & Support",
        "UX & Accessibility",
    ],
    rating_column: "Overall Rating",
};

impl ProgramLevel {
    pub const ALL: [ProgramLevel; 2] = [ProgramLevel::Undergraduate, ProgramLevel::Master];

    pub fn schema(&self) -> &'static Schema {
        match self {
            ProgramLevel::Undergraduate => &UNDERGRADUATE_SCHEMA,
            ProgramLevel::Master => &MASTER_SCHEMA,
        }
    }

    /// The name under which the ranking is offered for download.
    pub fn export_file_name(&self) -> &'static str {
        match self {
            ProgramLevel::Undergraduate => "benchmarking_undergraduate.csv",
            ProgramLevel::Master => "ranking_universidades.csv",
        }
    }

    /// Where the dataset lives when nothing else is configured.
    pub fn default_source_path(&self) -> &'static str {
        match self {
            ProgramLevel::Undergraduate => "data/benchmarking_undergraduate.csv",
            ProgramLevel::Master => "data/benchmarking_master.csv",
        }
    }

    pub fn score_table(&self) -> ScoreTable {
        match self {
            ProgramLevel::Undergraduate => ScoreTable::from_static(UNDERGRADUATE_SCORES),
            ProgramLevel::Master => ScoreTable::from_static(MASTER_SCORES),
        }
    }

    /// Parses the short identifiers used on the command line and in configuration files.
    pub fn parse(s: &str) -> Option<ProgramLevel> {
        match s.to_ascii_lowercase().as_str() {
            "undergraduate" | "grado" | "bachelor" => Some(ProgramLevel::Undergraduate),
            "master" | "máster" | "graduate" => Some(ProgramLevel::Master),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramLevel::Undergraduate => "undergraduate",
            ProgramLevel::Master => "master",
        }
    }
}

impl Display for ProgramLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ********* Score tables **********

/// The score of any label that a table does not know about.
pub const DEFAULT_SCORE: u8 = 3;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

pub const UNDERGRADUATE_SCORES: &[(&str, u8)] = &[
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

pub const MASTER_SCORES: &[(&str, u8)] = &[
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

/// A lookup table from qualitative labels to scores in 1..=5.
///
/// Matching is exact: no trimming, no case folding.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoreTable {
    entries: Vec<(String, u8)>,
}

impl ScoreTable {
    pub fn from_static(entries: &[(&str, u8)]) -> ScoreTable {
        ScoreTable {
            entries: entries.iter().map(|(l, s)| (l.to_string(), *s)).collect(),
        }
    }

    /// Adds or replaces the score of a label.
    ///
    /// Scores outside of 1..=5 are refused so that lookups always stay in range.
    pub fn with_entry(mut self, label: &str, score: u8) -> Result<ScoreTable, BenchmarkErrors> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(BenchmarkErrors::ScoreOutOfRange {
                label: label.to_string(),
                score: score as i64,
            });
        }
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((label.to_string(), score)),
        }
        Ok(self)
    }

    /// The score of a label, or `DEFAULT_SCORE` if the label is unknown.
    pub fn score(&self, label: &str) -> u8 {
        self.lookup(label).unwrap_or(DEFAULT_SCORE)
    }

    /// The configured score, without applying the default.
    pub fn lookup(&self, label: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, s)| *s)
    }

    pub fn entries(&self) -> &[(String, u8)] {
        &self.entries
    }
}

// ********* Errors **********

/// Errors that prevent a dataset from being served or encoded.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum BenchmarkErrors {
    MissingColumn {
        column: String,
    },
    RowLength {
        lineno: u64,
        expected: usize,
        found: usize,
    },
    EmptyName {
        lineno: u64,
    },
    InvalidRating {
        lineno: u64,
        value: String,
    },
    ScoreOutOfRange {
        label: String,
        score: i64,
    },
    Encoding(String),
}

impl Error for BenchmarkErrors {}

impl Display for BenchmarkErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenchmarkErrors::MissingColumn { column } => {
                write!(f, "missing expected column {:?}", column)
            }
            BenchmarkErrors::RowLength {
                lineno,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected {} fields, found {}",
                lineno, expected, found
            ),
            BenchmarkErrors::EmptyName { lineno } => {
                write!(f, "line {}: the institution name is empty", lineno)
            }
            BenchmarkErrors::InvalidRating { lineno, value } => {
                write!(f, "line {}: invalid overall rating {:?}", lineno, value)
            }
            BenchmarkErrors::ScoreOutOfRange { label, score } => write!(
                f,
                "score {} for label {:?} is outside of {}..={}",
                score, label, MIN_SCORE, MAX_SCORE
            ),
            BenchmarkErrors::Encoding(msg) => write!(f, "CSV encoding failed: {}", msg),
        }
    }
}
