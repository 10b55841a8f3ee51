//! Canonical manifest model.
//!
//! Every type here is constructed through a validated `new` so no value
//! that violates the field rules in [`crate::validation`] can enter a
//! [`ManifestSpec`].

pub mod manifest;
pub mod project;
pub mod remote;

pub use manifest::{Defaults, MANIFEST_VERSION, ManifestSpec};
pub use project::{FileRef, ProjectSpec};
pub use remote::Remote;
