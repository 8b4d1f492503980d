use clap::Parser;

/// This is an expert pairwise-preference scoring program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON file describing the scoring session: the ordered catalog of
    /// alternatives, the expert name and the pairwise ratings (inline or in a separate
    /// CSV file). For more information about the file format, read the documentation.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path) A reference file containing the expected summary of a session in JSON
    /// format. If provided, priorank will check that the computed summary matches the
    /// reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the session will be
    /// written in JSON format to the given location. Setting this option overrides the
    /// path that may be specified in the configuration file.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
