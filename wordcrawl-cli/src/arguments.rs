use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Minimum log level: trace, debug, info, warn or error
    #[arg(default_value = "info")]
    pub log_level: String,

    /// Maximum number of words reported in the frequency table
    #[arg(default_value_t = 10)]
    pub word_limit: i64,

    /// Comma- or space-separated list of words to exclude from the count
    #[arg(default_value = "")]
    pub excluded_words: String,

    /// Override the page to crawl
    #[arg(long)]
    pub base_address: Option<String>,

    /// Emit the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
