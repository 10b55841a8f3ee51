//! Format converters for foreign manifest dialects.
//!
//! Currently provides:
//! - Repo XML (`.xml`): the manifest dialect of the `repo`
//!   multi-repository tool (import-only)

pub mod repo;

pub use repo::RepoManifestFormat;
