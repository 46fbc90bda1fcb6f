//! Error kinds raised while compiling and executing a SPAdes run.
//!
//! All validation errors are produced before any subprocess is started, so a
//! failed compile never leaves a half-finished assembly behind. Process
//! failures carry the captured stderr and the location of the full SPAdes log
//! so a human can pick up from where the run died.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpadesError {
    /// A library descriptor did not have a valid shape, e.g. a paired-end
    /// record with both an interleaved file and a left/right pair.
    #[error("malformed library: {0}")]
    MalformedLibrary(String),

    /// The requested mode is incompatible with the supplied libraries.
    #[error("invalid library combination: {0}")]
    InvalidLibraryCombination(String),

    /// Hybrid assembly was requested without any long-read input.
    #[error("hybrid assembly requires at least one PacBio or Nanopore long-read library")]
    MissingLongRead,

    /// Could not create the run's output directory.
    #[error("failed to create output directory {path:?}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// SPAdes itself exited with a non-zero status.
    #[error("SPAdes failed (exit code {code:?}): {stderr}\nFull log: {log_path:?}")]
    ExternalProcessFailure {
        code: Option<i32>,
        stderr: String,
        log_path: PathBuf,
    },
}
