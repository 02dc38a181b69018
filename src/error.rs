// Error types shared by every layer of the client.
//
// Each variant is terminal for the current invocation: the binary prints
// the message and exits with the code returned by `Error::exit_code`.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Exit code for argument errors, matching clap's own usage errors.
pub const EXIT_USAGE: u8 = 2;

/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 1;

#[derive(Error, Debug)]
pub enum Error {
    /// No API key has been stored yet (or the stored one is empty).
    #[error("API key is not set. Run 'wabeltools init <key>' to set it.")]
    NotInitialized,

    /// The remote service refused the key, or the key cannot be sent.
    #[error("invalid API key: {reason}")]
    InvalidCredential { reason: String },

    /// Wrong number of positional inputs for the chosen operation.
    #[error("{operation} expects {expected}, got {got}")]
    ArityMismatch {
        operation: String,
        expected: Arity,
        got: usize,
    },

    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("cannot read {}", .path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Connectivity problem: DNS, refused connection, TLS, truncated body.
    #[error("error querying {url}")]
    NetworkFailure {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("request rejected: {status} {reason}{}", detail_suffix(.body))]
    RemoteRejected {
        status: u16,
        reason: String,
        body: String,
    },

    /// Output or credential could not be persisted.
    #[error("cannot write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid API base URL '{url}'")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Number of positional inputs an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    /// Whether `count` inputs satisfy this arity.
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (prefix, n) = match self {
            Self::Exactly(n) => ("exactly", *n),
            Self::AtLeast(n) => ("at least", *n),
        };
        let noun = if n == 1 { "argument" } else { "arguments" };
        write!(f, "{prefix} {n} {noun}")
    }
}

fn detail_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" - {body}")
    }
}

impl Error {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::ArityMismatch { .. } => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}
