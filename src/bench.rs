use log::{debug, error, info, warn};

use aid_scoring::export::export_ranking;
use aid_scoring::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::bench::cache::DatasetCache;
use crate::bench::config_reader::*;
use crate::bench::content::{Section, DEFAULT_TITLE, RADAR_GUIDANCE};

pub mod cache;
pub mod config_reader;
mod content;
mod io_common;
mod io_csv;
mod io_xlsx;
mod render;

#[derive(Debug, Snafu)]
pub enum BenchError {
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading file {path} at line {lineno}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: u64,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The worksheet {worksheet} does not exist in {path}"))]
    MissingWorksheet { path: String, worksheet: String },
    #[snafu(display("The file {path} contains no data"))]
    EmptyExcel { path: String },
    #[snafu(display("Unexpected cell in {path} at line {lineno}: {content}"))]
    ExcelWrongCellType {
        path: String,
        lineno: u64,
        content: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the configuration {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error encoding the summary"))]
    EncodingJson { source: serde_json::Error },
    #[snafu(display("Error writing to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the reference {path}"))]
    ReadingReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid {level} dataset {path}: {source}"))]
    InvalidDataset {
        source: BenchmarkErrors,
        level: ProgramLevel,
        path: String,
    },
    #[snafu(display("Invalid score table for the {level} level: {source}"))]
    InvalidScoreTable {
        source: BenchmarkErrors,
        level: ProgramLevel,
    },
    #[snafu(display("Error encoding the {level} ranking: {source}"))]
    EncodingRanking {
        source: BenchmarkErrors,
        level: ProgramLevel,
    },
    #[snafu(display("Unknown input type {input_type:?}, expected csv or xlsx"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Unknown program level {level:?}"))]
    UnknownLevel { level: String },
    #[snafu(display("Unknown section {section:?}"))]
    UnknownSection { section: String },
    #[snafu(display("The exported ranking differs from the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type BenchResult<T> = Result<T, BenchError>;

/// The providers of benchmarking tables.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum InputType {
    Csv,
    Xlsx,
}

impl InputType {
    pub fn parse(s: &str) -> BenchResult<InputType> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(InputType::Csv),
            "xlsx" | "excel" => Ok(InputType::Xlsx),
            _ => UnknownInputTypeSnafu { input_type: s }.fail(),
        }
    }

    /// Guesses the provider from the file extension. Anything that is not a
    /// workbook is read as CSV.
    pub fn infer(path: &Path) -> InputType {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("xlsx") | Some("xlsm") => InputType::Xlsx,
            _ => InputType::Csv,
        }
    }
}

/// Where the table of one program level comes from. Also the cache key.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct DataSource {
    pub level: ProgramLevel,
    pub input_type: InputType,
    pub path: PathBuf,
    pub worksheet: Option<String>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ComparatorPage {
    pub source: DataSource,
    pub score_table: ScoreTable,
    pub selection: Selection,
}

/// Everything needed to render the dashboard, after merging the command line
/// with the configuration file.
#[derive(PartialEq, Debug, Clone)]
pub struct DashboardSettings {
    pub title: String,
    pub sections: Vec<Section>,
    pub pages: Vec<ComparatorPage>,
    pub out: Option<String>,
    pub output_directory: Option<PathBuf>,
    pub summary: Option<String>,
    pub reference: Option<String>,
}

impl DashboardSettings {
    fn page(&self, level: ProgramLevel) -> Option<&ComparatorPage> {
        self.pages.iter().find(|p| p.source.level == level)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RunReport {
    pub rendered_pages: Vec<Section>,
    pub failed_pages: Vec<Section>,
}

fn resolve_path(root: Option<&Path>, p: &str) -> PathBuf {
    let path = Path::new(p);
    match root {
        Some(r) if path.is_relative() => r.join(path),
        _ => path.to_path_buf(),
    }
}

fn resolve_page(
    args: &Args,
    config: &DashboardConfig,
    root: Option<&Path>,
    level: ProgramLevel,
) -> BenchResult<ComparatorPage> {
    let settings = config.source(level)?;
    let (cli_input, cli_selection) = match level {
        ProgramLevel::Undergraduate => (&args.undergraduate_input, &args.select_undergraduate),
        ProgramLevel::Master => (&args.master_input, &args.select_master),
    };

    let path = match (cli_input, settings) {
        (Some(p), _) => PathBuf::from(p),
        (None, Some(s)) => resolve_path(root, &s.file_path),
        (None, None) => PathBuf::from(level.default_source_path()),
    };
    let input_type = match (&args.input_type, settings) {
        (Some(t), _) => InputType::parse(t)?,
        (None, Some(s)) => s.input_type()?.unwrap_or_else(|| InputType::infer(&path)),
        (None, None) => InputType::infer(&path),
    };
    let worksheet = args
        .excel_worksheet_name
        .clone()
        .or_else(|| settings.and_then(|s| s.excel_worksheet_name.clone()));
    let score_table = match settings {
        Some(s) => s.score_table(level)?,
        None => level.score_table(),
    };
    let selection = match cli_selection {
        Some(names) => Selection::from_names(names.as_slice()),
        None => Selection::All,
    };

    Ok(ComparatorPage {
        source: DataSource {
            level,
            input_type,
            path,
            worksheet,
        },
        score_table,
        selection,
    })
}

pub fn resolve_settings(args: &Args) -> BenchResult<DashboardSettings> {
    let config = match &args.config {
        Some(p) => read_config(p)?,
        None => DashboardConfig::default(),
    };
    // Relative paths of the configuration are relative to its own directory.
    let root: Option<PathBuf> = args
        .config
        .as_ref()
        .and_then(|p| Path::new(p).parent())
        .map(|p| p.to_path_buf());

    let sections: Vec<Section> = match &args.section {
        Some(names) => names
            .iter()
            .map(|n| Section::parse(n).context(UnknownSectionSnafu { section: n.clone() }))
            .collect::<BenchResult<Vec<Section>>>()?,
        None => Section::ALL.to_vec(),
    };

    let mut pages: Vec<ComparatorPage> = Vec::new();
    for level in ProgramLevel::ALL {
        pages.push(resolve_page(args, &config, root.as_deref(), level)?);
    }

    let num_comparators = sections.iter().filter(|s| s.level().is_some()).count();
    if (args.out.is_some() || args.reference.is_some()) && num_comparators != 1 {
        whatever!(
            "--out and --reference require exactly one comparison section, {} requested",
            num_comparators
        );
    }

    let output_directory = match (&args.output_directory, &config.output_settings.output_directory) {
        (Some(d), _) => Some(PathBuf::from(d)),
        (None, Some(d)) => Some(resolve_path(root.as_deref(), d)),
        (None, None) => None,
    };

    let settings = DashboardSettings {
        title: config
            .output_settings
            .dashboard_title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        sections,
        pages,
        out: args.out.clone(),
        output_directory,
        summary: args.summary.clone(),
        reference: args.reference.clone(),
    };
    debug!("resolve_settings: {:?}", settings);
    Ok(settings)
}

/// Writes to a file, or to the dashboard output when the destination is `stdout`.
fn write_output(dest: &str, bytes: &[u8], w: &mut dyn Write) -> BenchResult<()> {
    if dest == "stdout" {
        w.write_all(bytes).context(WritingOutputSnafu { path: dest })
    } else {
        info!("Writing {} bytes to {:?}", bytes.len(), dest);
        fs::write(dest, bytes).context(WritingOutputSnafu { path: dest })
    }
}

fn check_reference(path: &str, export: &str) -> BenchResult<()> {
    let reference = fs::read_to_string(path).context(ReadingReferenceSnafu { path })?;
    if reference != export {
        warn!("Found differences with the reference export");
        print_diff(reference.as_str(), export, "\n");
        return ReferenceMismatchSnafu { path }.fail();
    }
    info!("The export matches the reference {:?}", path);
    Ok(())
}

/// The selected names that no institution of the dataset carries, sorted.
fn unknown_selections(dataset: &Dataset, selection: &Selection) -> Vec<String> {
    let known = dataset.names();
    let mut res: Vec<String> = match selection {
        Selection::All => Vec::new(),
        Selection::Only(names) => names
            .iter()
            .filter(|n| !known.contains(&n.as_str()))
            .cloned()
            .collect(),
    };
    res.sort();
    res
}

/// Renders one comparison page. Returns its JSON summary.
///
/// Only a failure to load the dataset is reported as a page failure, everything
/// else stops the run.
fn run_comparator(
    settings: &DashboardSettings,
    page: &ComparatorPage,
    cache: &mut DatasetCache,
    w: &mut dyn Write,
) -> BenchResult<Option<JSValue>> {
    let level = page.source.level;
    let dataset = match cache.get_or_load(&page.source) {
        Ok(ds) => ds,
        Err(e) => {
            error!("Could not load the {} dataset: {}", level, e);
            render::failure(w, level, &e).context(WritingOutputSnafu { path: "stdout" })?;
            return Ok(None);
        }
    };

    let unknown = unknown_selections(&dataset, &page.selection);
    if !unknown.is_empty() {
        warn!("Not in the {} dataset: {:?}", level, unknown);
        render::unknown_names(w, &unknown, &dataset.names())
            .context(WritingOutputSnafu { path: "stdout" })?;
    }

    let view = build_comparison(&dataset, &page.score_table, &page.selection);
    render::comparison(w, &view).context(WritingOutputSnafu { path: "stdout" })?;

    let export = export_ranking(&view).context(EncodingRankingSnafu { level })?;
    if let Some(out) = &settings.out {
        write_output(out, &export, w)?;
    } else if let Some(dir) = &settings.output_directory {
        fs::create_dir_all(dir).context(WritingOutputSnafu {
            path: dir.display().to_string(),
        })?;
        let p = dir.join(level.export_file_name());
        write_output(&p.display().to_string(), &export, w)?;
    }

    if let Some(reference) = &settings.reference {
        check_reference(reference, &String::from_utf8_lossy(&export))?;
    }

    Ok(Some(render::view_to_json(&view)))
}

/// Renders the requested sections in order.
///
/// A page whose dataset cannot be loaded shows a failure message and is listed in
/// the report; the other pages are still rendered.
pub fn run_sections(
    settings: &DashboardSettings,
    cache: &mut DatasetCache,
    w: &mut dyn Write,
) -> BenchResult<RunReport> {
    let mut report = RunReport::default();
    let mut summaries: Vec<JSValue> = Vec::new();
    render::title(w, &settings.title).context(WritingOutputSnafu { path: "stdout" })?;

    for section in settings.sections.iter() {
        render::section(w, *section).context(WritingOutputSnafu { path: "stdout" })?;
        let page = match section.level().and_then(|l| settings.page(l)) {
            Some(page) => page,
            None => {
                report.rendered_pages.push(*section);
                continue;
            }
        };
        match run_comparator(settings, page, cache, w)? {
            Some(js) => {
                summaries.push(js);
                report.rendered_pages.push(*section);
            }
            None => report.failed_pages.push(*section),
        }
    }

    if let Some(summary) = &settings.summary {
        let js = json!({ "title": settings.title, "pages": summaries });
        let pretty = serde_json::to_string_pretty(&js).context(EncodingJsonSnafu {})?;
        write_output(summary, format!("{}\n", pretty).as_bytes(), w)?;
    }

    info!(
        "run_sections: rendered: {:?} failed: {:?} cached datasets: {}",
        report.rendered_pages,
        report.failed_pages,
        cache.len()
    );
    Ok(report)
}

pub fn run_dashboard(args: &Args) -> BenchResult<RunReport> {
    let settings = resolve_settings(args)?;
    let mut cache = DatasetCache::new();
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    run_sections(&settings, &mut cache, &mut lock)
}
