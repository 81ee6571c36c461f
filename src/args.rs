use clap::Parser;

/// Compares the financial aid offer of universities, from benchmarking tables.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the data sources and the output settings.
    /// For more information about the file format, read the manual of the aid_scoring crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (overview, undergraduate, master or recommendations, repeatable) The sections to render.
    /// All the sections are rendered, in this order, when none is given.
    #[clap(short, long, value_parser)]
    pub section: Option<Vec<String>>,

    /// (file path) The undergraduate table. Overrides the configuration file.
    #[clap(long, value_parser)]
    pub undergraduate_input: Option<String>,

    /// (file path) The master table. Overrides the configuration file.
    #[clap(long, value_parser)]
    pub master_input: Option<String>,

    /// (csv or xlsx) The type of the inputs. By default, it is inferred from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (university names, repeatable) Restricts the undergraduate comparison to these universities.
    /// All the universities are compared when not specified. Passing the flag without any name
    /// selects no university.
    #[clap(long, value_parser, min_values = 0)]
    pub select_undergraduate: Option<Vec<String>>,

    /// (university names, repeatable) Restricts the master comparison to these universities.
    #[clap(long, value_parser, min_values = 0)]
    pub select_master: Option<Vec<String>>,

    /// (file path or 'stdout') If specified, the ranking is exported in CSV format to this location.
    /// Only valid when a single comparison section is rendered.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (directory) If specified, every ranking is exported there under its default file name.
    #[clap(long, value_parser)]
    pub output_directory: Option<String>,

    /// (file path or 'stdout') If specified, the views of the comparison sections are written in JSON format.
    #[clap(long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference CSV export. If provided, aidcompare checks that the exported ranking
    /// matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
