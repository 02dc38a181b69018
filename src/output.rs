// Response materialization: persist image payloads to disk, print text
// payloads untouched.

use crate::api::InboundResponse;
use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Prefix of every file written for a processed image.
pub const OUTPUT_PREFIX: &str = "processed_";

/// Extension of the archive returned by batch endpoints.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// What a response body is, as declared by the operation that asked for
/// it. Never inferred from the body itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// One processed image.
    Binary { file_name: String },
    /// An archive of processed images, saved as-is.
    Archive { file_name: String },
    /// Text or JSON, printed to stdout.
    Text,
}

impl ResponseShape {
    /// `processed_<input base name>`.
    pub fn binary(input_name: &str) -> Self {
        Self::Binary {
            file_name: format!("{OUTPUT_PREFIX}{input_name}"),
        }
    }

    /// `processed_<count>_images.zip`.
    pub fn archive(count: usize) -> Self {
        Self::Archive {
            file_name: format!("{OUTPUT_PREFIX}{count}_images.{ARCHIVE_EXTENSION}"),
        }
    }
}

/// Result of materializing one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Materialized {
    Saved(PathBuf),
    Printed,
}

/// Writes responses into `output_dir` or onto a text sink.
#[derive(Debug, Clone)]
pub struct Materializer {
    output_dir: PathBuf,
}

impl Default for Materializer {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Materializer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn materialize<W: Write>(
        &self,
        shape: &ResponseShape,
        response: &InboundResponse,
        out: &mut W,
    ) -> Result<Materialized> {
        match shape {
            ResponseShape::Binary { file_name } | ResponseShape::Archive { file_name } => {
                let path = self.output_dir.join(file_name);
                write_atomically(&path, &response.body, OUTPUT_FILE_MODE)?;
                tracing::info!(path = %path.display(), size = response.body.len(), "saved response");
                Ok(Materialized::Saved(path))
            }
            ResponseShape::Text => {
                print_verbatim(out, &response.body)?;
                Ok(Materialized::Printed)
            }
        }
    }
}

fn print_verbatim<W: Write>(out: &mut W, body: &[u8]) -> Result<()> {
    let stdout_err = |source: std::io::Error| Error::Io {
        path: PathBuf::from("<stdout>"),
        source,
    };
    out.write_all(body).map_err(stdout_err)?;
    if !body.ends_with(b"\n") {
        out.write_all(b"\n").map_err(stdout_err)?;
    }
    out.flush().map_err(stdout_err)
}

/// Permission bits for processed images; the umask still applies.
const OUTPUT_FILE_MODE: u32 = 0o666;

/// Write to a sibling `.part` file created with `mode`, then rename it over
/// `path`. A failure at any step leaves `path` untouched and no `.part`
/// file behind.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8], mode: u32) -> Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    // `mode` only applies on creation, so a leftover `.part` must go first.
    let _ = fs::remove_file(&partial);

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let result = options
        .open(&partial)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&partial, path));
    result.map_err(|source| {
        let _ = fs::remove_file(&partial);
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}
