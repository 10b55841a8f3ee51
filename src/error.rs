//! Manifest format error taxonomy.
//!
//! All format operations (`load`/`save`, registry dispatch) fail with a
//! [`ManifestError`]. Errors are determined purely by input content and are
//! never retried; they propagate unmodified to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by manifest format detection, loading and saving.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file does not exist.
    #[error("manifest not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The manifest exists but is malformed or failed validation.
    ///
    /// `detail` is either the XML parser's own message or the source
    /// fragment of the smallest element that failed validation, so the
    /// offending markup can be located directly.
    #[error("{}: {detail}", .path.display())]
    Invalid { path: PathBuf, detail: String },

    /// The requested operation is not supported for this path, either
    /// because no registered format accepts it or because the format is
    /// import-only.
    #[error("{}: incompatible manifest format", .0.display())]
    IncompatibleFormat(PathBuf),
}
