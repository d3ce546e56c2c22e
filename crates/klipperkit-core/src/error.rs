//! Error handling for KlipperKit
//!
//! The post-processing transform itself never fails: configuration
//! problems and unparseable startup blocks are surfaced as comments in
//! the output stream. The error type here covers the file boundary only:
//! getting a G-code stream into and out of memory.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Stream I/O error type
///
/// Represents failures while reading or writing a G-code file.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The output file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Result type alias for stream operations.
pub type Result<T> = std::result::Result<T, Error>;
