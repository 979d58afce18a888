//! Loading and normalization of OpenAPI specification documents.
//!
//! A [DocumentFile] is read from disk, then [normalize] turns it into the
//! JSON payload sent to the catalog. Normalization is a pure function: the
//! same file always yields the same payload or the same error kind.

mod loader;
mod normalizer;

pub use loader::*;
pub use normalizer::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::StdError;

/// Error tied with reading or normalizing a specification document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Error raised when the given path does not resolve to an existing file.
    #[error("document not found: '{}'", .0.display())]
    FileNotFound(PathBuf),

    /// Error raised when the file exists but its content could not be read.
    #[error("could not read document: '{}'", .0.display())]
    UnreadableDocument(PathBuf, #[source] StdError),

    /// Error raised when a YAML document fails to parse.
    #[error("invalid YAML document: '{0}'")]
    InvalidYaml(String, #[source] StdError),

    /// Error raised when a JSON document fails to parse.
    #[error("invalid JSON document: '{0}'")]
    InvalidJson(String, #[source] StdError),

    /// Error raised when the document extension is outside the supported set.
    #[error(
        "unsupported document extension '{extension}', supported extensions are: .yaml, .yml, .json"
    )]
    UnsupportedFormat {
        /// The offending extension, lowercased, without the leading dot.
        extension: String,
    },
}
