//! Workspace Manifest SDK - canonical manifest model and format converters
//!
//! Provides unified interfaces for:
//! - The canonical manifest model ([`ManifestSpec`] and friends) with
//!   field-level validation
//! - Manifest format detection and dispatch via a pluggable registry
//! - Importing the XML manifest dialect of the `repo` multi-repository
//!   tool

pub mod error;
pub mod format;
pub mod import;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use error::ManifestError;
pub use format::{ManifestFormat, ManifestFormatManager};
pub use import::RepoManifestFormat;
pub use models::{Defaults, FileRef, MANIFEST_VERSION, ManifestSpec, ProjectSpec, Remote};
pub use validation::{ValidationError, ValidationResult};
