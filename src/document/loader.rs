use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use slog::{Logger, debug};

use super::DocumentError;

/// A specification document read from disk, with the metadata needed by the
/// normalization and upload stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    /// Path the document was read from.
    pub path: PathBuf,

    /// Full document content, read as UTF-8 text.
    pub raw_content: String,

    /// File extension, lowercased, without the leading dot (empty when the
    /// file has no extension).
    pub extension: String,

    /// File name component of the path.
    pub file_name: String,

    /// Size of the file on disk.
    pub size_in_bytes: u64,
}

impl DocumentFile {
    /// Read a specification document from the given path.
    ///
    /// Fails with [DocumentError::FileNotFound] when the path does not
    /// resolve to an existing file.
    pub fn read(path: &Path, logger: &Logger) -> Result<Self, DocumentError> {
        debug!(logger, "Reading document '{}'", path.display());
        if !path.is_file() {
            return Err(DocumentError::FileNotFound(path.to_path_buf()));
        }

        let raw_content = fs::read_to_string(path)
            .map_err(|e| DocumentError::UnreadableDocument(path.to_path_buf(), anyhow!(e)))?;
        let size_in_bytes = fs::metadata(path)
            .map_err(|e| DocumentError::UnreadableDocument(path.to_path_buf(), anyhow!(e)))?
            .len();
        let extension = path
            .extension()
            .map(|extension| extension.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        debug!(
            logger,
            "Read document '{file_name}' ({size_in_bytes} bytes, extension '{extension}')"
        );

        Ok(Self {
            path: path.to_path_buf(),
            raw_content,
            extension,
            file_name,
            size_in_bytes,
        })
    }
}
