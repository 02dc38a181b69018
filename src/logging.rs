// Diagnostic logging to stderr via `tracing`.
//
// Stdout is reserved for command output (NLP payloads, account info), so
// every log line goes to stderr.

use clap::ValueEnum;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Log level override, e.g. `WABELTOOLS_LOG=debug`.
pub const LOG_LEVEL_ENV: &str = "WABELTOOLS_LOG";

/// `json` switches to one JSON object per line.
pub const LOG_FORMAT_ENV: &str = "WABELTOOLS_LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "human" | "text" => Some(Self::Human),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    #[value(alias = "verbose")]
    Debug,
    Info,
    #[default]
    #[value(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    /// Parse an environment value. The command-line flag goes through clap.
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "verbose" | "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Resolve the effective level: explicit argument, then `WABELTOOLS_LOG`,
/// then the default. `--verbose` lifts the default to debug.
pub fn resolve_level(arg: Option<LogLevel>, verbose: bool) -> LogLevel {
    let env = std::env::var(LOG_LEVEL_ENV).ok();
    arg.or_else(|| env.as_deref().and_then(LogLevel::from_arg))
        .unwrap_or(if verbose { LogLevel::Debug } else { LogLevel::default() })
}

pub fn format_from_env() -> LogFormat {
    std::env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|v| LogFormat::from_arg(&v))
        .unwrap_or_default()
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(level: LogLevel, format: LogFormat) {
    let filter = EnvFilter::new(format!("wabeltools={}", level.as_filter()));
    let writer = BoxMakeWriter::new(std::io::stderr);

    match format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_writer(writer)
                .try_init()
                .ok();
        }
        LogFormat::Human => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_target(false)
                .without_time()
                .try_init()
                .ok();
        }
    }
}
