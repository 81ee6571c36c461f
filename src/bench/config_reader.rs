use std::collections::BTreeMap;
use std::fs;

use serde::{Deserialize, Serialize};

use crate::bench::*;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "dashboardTitle")]
    pub dashboard_title: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(rename = "programLevel")]
    pub program_level: String,
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    /// Extra or replacement scores, on top of the table of the program level.
    #[serde(rename = "scoreTable")]
    pub score_table: Option<BTreeMap<String, i64>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(default)]
    pub sources: Vec<SourceSettings>,
}

impl SourceSettings {
    pub fn level(&self) -> BenchResult<ProgramLevel> {
        ProgramLevel::parse(&self.program_level).context(UnknownLevelSnafu {
            level: self.program_level.clone(),
        })
    }

    pub fn input_type(&self) -> BenchResult<Option<InputType>> {
        self.provider.as_deref().map(InputType::parse).transpose()
    }

    /// The table of the program level, with the overrides of this source.
    pub fn score_table(&self, level: ProgramLevel) -> BenchResult<ScoreTable> {
        let mut table = level.score_table();
        for (label, score) in self.score_table.iter().flatten() {
            let checked = u8::try_from(*score).map_err(|_| BenchmarkErrors::ScoreOutOfRange {
                label: label.clone(),
                score: *score,
            });
            table = checked
                .and_then(|s| table.with_entry(label, s))
                .context(InvalidScoreTableSnafu { level })?;
        }
        Ok(table)
    }
}

impl DashboardConfig {
    /// The settings of the source for a program level, if any.
    ///
    /// Every source is checked, so that a typo in a level is reported even when
    /// another level is requested.
    pub fn source(&self, level: ProgramLevel) -> BenchResult<Option<&SourceSettings>> {
        let mut res: Option<&SourceSettings> = None;
        for s in self.sources.iter() {
            let l = s.level()?;
            if l == level && res.is_none() {
                res = Some(s);
            } else if l == level {
                warn!(
                    "Several sources for the {} level, using {:?}",
                    level,
                    res.map(|r| &r.file_path)
                );
            }
        }
        Ok(res)
    }
}

pub fn read_config(path: &str) -> BenchResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    info!("config: {:?}", config);
    Ok(config)
}
