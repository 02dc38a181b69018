// Command-line surface. Parsing only: positional inputs are collected as
// given and their count is checked when the operation is built, so an
// empty or mis-sized list surfaces as an arity error rather than a clap
// usage error.

use crate::api::{BASE_URL_ENV, DEFAULT_BASE_URL};
use crate::logging::LogLevel;
use crate::request::{NlpTask, DEFAULT_QUALITY};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI for the Wabel Tools service: image processing and NLP.
#[derive(Parser, Debug)]
#[command(name = "wabeltools")]
#[command(author, version)]
#[command(
    long_about = "wabeltools is a command-line client for the Wabel Tools service.\n\n\
    Start by storing your API key:\n    wabeltools init <apikey>\n\n\
    Then, for example:\n    wabeltools image local --quality 80 photo.jpg\n    \
    wabeltools image remote https://example.com/a.png https://example.com/b.png\n    \
    wabeltools nlp sentiment \"I love Wabel Tools!\""
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root URL of the API
    #[arg(long, value_name = "URL", env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// Where the API key is stored [default: ~/.wabeltools]
    #[arg(long, value_name = "PATH", env = "WABELTOOLS_KEY_FILE", global = true)]
    pub key_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", value_enum, ignore_case = true, global = true)]
    pub log_level: Option<LogLevel>,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and store your API key
    Init {
        /// API key from wabeltools.com; prompted for when omitted
        key: Option<String>,
    },

    /// List the cost of each service
    Costs,

    /// List the available services
    Services,

    /// Show your remaining tokens for the day
    Tokens,

    /// Image processing: compression, resizing
    #[command(subcommand)]
    Image(ImageCommand),

    /// Natural language processing tasks
    Nlp(NlpArgs),
}

#[derive(Subcommand, Debug)]
pub enum ImageCommand {
    /// Process images from local files
    Local {
        #[command(flatten)]
        options: ImageOptions,

        /// Image files; two or more are processed as one batch
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,
    },

    /// Process images from URLs
    Remote {
        #[command(flatten)]
        options: ImageOptions,

        /// Image URLs; two or more are processed as one batch
        #[arg(value_name = "URL")]
        urls: Vec<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ImageOptions {
    /// Quality of the processed image (1-100)
    #[arg(short, long, default_value_t = DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Directory the processed image or archive is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct NlpArgs {
    /// Task to run
    #[arg(value_enum)]
    pub task: NlpTask,

    /// Text to analyze (two texts for `wer`)
    #[arg(value_name = "TEXT")]
    pub texts: Vec<String>,
}
