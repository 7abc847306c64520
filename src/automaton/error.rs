use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading patterns from a file.
///
/// Building from in-memory patterns never fails; only I/O can.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The pattern file could not be opened or read, or was not valid UTF-8.
    #[error("failed to read patterns from {}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}
