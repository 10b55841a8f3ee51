//! Manifest format abstraction and registry.
//!
//! A [`ManifestFormat`] turns on-disk manifests of one dialect into the
//! canonical [`ManifestSpec`] (and back, for formats that support
//! writing). The [`ManifestFormatManager`] holds the registered formats
//! in order and dispatches by path compatibility.

use std::path::Path;

use crate::error::ManifestError;
use crate::models::ManifestSpec;

/// One manifest dialect.
pub trait ManifestFormat {
    /// Whether the file at `path` is handled by this format. Pure
    /// function of the path; performs no I/O.
    fn is_compatible(&self, path: &Path) -> bool;

    /// Load the manifest at `path` into the canonical model.
    fn load(&self, path: &Path) -> Result<ManifestSpec, ManifestError>;

    /// Write `manifest` to `path`. Import-only formats fail with
    /// [`ManifestError::IncompatibleFormat`].
    fn save(&self, manifest: &ManifestSpec, path: &Path) -> Result<(), ManifestError>;
}

/// Ordered registry of manifest formats.
pub struct ManifestFormatManager {
    formats: Vec<Box<dyn ManifestFormat>>,
}

impl ManifestFormatManager {
    /// Registry with no formats. Use [`Default`] for the built-in set.
    pub fn empty() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// Append a format. Earlier registrations win when several formats
    /// accept the same path.
    pub fn register(&mut self, format: Box<dyn ManifestFormat>) {
        self.formats.push(format);
    }

    /// First registered format compatible with `path`.
    pub fn find(&self, path: &Path) -> Option<&dyn ManifestFormat> {
        self.formats
            .iter()
            .map(Box::as_ref)
            .find(|format| format.is_compatible(path))
    }

    /// Load `path` with the first compatible format.
    pub fn load(&self, path: &Path) -> Result<ManifestSpec, ManifestError> {
        match self.find(path) {
            Some(format) => format.load(path),
            None => Err(ManifestError::IncompatibleFormat(path.to_path_buf())),
        }
    }

    /// Save `manifest` to `path` with the first compatible format.
    pub fn save(&self, manifest: &ManifestSpec, path: &Path) -> Result<(), ManifestError> {
        match self.find(path) {
            Some(format) => format.save(manifest, path),
            None => Err(ManifestError::IncompatibleFormat(path.to_path_buf())),
        }
    }
}

impl Default for ManifestFormatManager {
    /// Registry with all built-in formats.
    fn default() -> Self {
        let mut manager = Self::empty();
        manager.register(Box::new(crate::import::RepoManifestFormat));
        manager
    }
}
