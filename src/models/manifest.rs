//! Canonical manifest model: defaults, remotes and the dependency list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::project::{FileRef, ProjectSpec};
use super::remote::Remote;
use crate::validation::{
    ValidationError, ValidationResult, validate_group_filter, validate_remote_name,
    validate_revision,
};

/// Manifest schema version understood by this SDK.
pub const MANIFEST_VERSION: &str = "1.0";

/// Fallback remote and revision applied to projects that omit them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Defaults {
    /// Remote used when a project names none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    /// Revision used when a project names none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl Defaults {
    /// Validated constructor. Both fields are optional but must be
    /// well-formed when present.
    pub fn new(remote: Option<String>, revision: Option<String>) -> ValidationResult<Self> {
        if let Some(remote) = &remote {
            validate_remote_name(remote)?;
        }
        if let Some(revision) = &revision {
            validate_revision(revision)?;
        }
        Ok(Self { remote, revision })
    }
}

/// The canonical manifest consumed by the workspace manager.
///
/// Ordering of `remotes` and `dependencies` is significant: it is the
/// resolution precedence applied during workspace sync.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ManifestSpec {
    /// Manifest schema version
    #[serde(default = "default_version")]
    pub version: String,
    /// Group filters applied before sync; `+group` includes, `-group`
    /// excludes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_filters: Vec<String>,
    /// Remotes in resolution order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remotes: Vec<Remote>,
    /// Fallback remote/revision
    #[serde(default)]
    pub defaults: Defaults,
    /// Project dependencies in resolution order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<ProjectSpec>,
    /// Manifest-level file copies, applied from the main project
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub copyfiles: Vec<FileRef>,
    /// Manifest-level symlinks, applied from the main project
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linkfiles: Vec<FileRef>,
}

fn default_version() -> String {
    MANIFEST_VERSION.to_string()
}

impl Default for ManifestSpec {
    fn default() -> Self {
        Self {
            version: default_version(),
            group_filters: Vec::new(),
            remotes: Vec::new(),
            defaults: Defaults::default(),
            dependencies: Vec::new(),
            copyfiles: Vec::new(),
            linkfiles: Vec::new(),
        }
    }
}

impl ManifestSpec {
    /// Validated constructor.
    ///
    /// Remote names must be unique and every group filter must be a
    /// signed group name.
    pub fn new(
        defaults: Defaults,
        remotes: Vec<Remote>,
        dependencies: Vec<ProjectSpec>,
        group_filters: Vec<String>,
    ) -> ValidationResult<Self> {
        for filter in &group_filters {
            validate_group_filter(filter)?;
        }
        let mut seen = HashSet::new();
        for remote in &remotes {
            if !seen.insert(remote.name.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "remote name",
                    value: remote.name.clone(),
                });
            }
        }
        Ok(Self {
            version: default_version(),
            group_filters,
            remotes,
            defaults,
            dependencies,
            copyfiles: Vec::new(),
            linkfiles: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_rejects_duplicate_remote_names() {
        let remotes = vec![
            Remote::new(Some("origin".into()), Some("url1".into())).unwrap(),
            Remote::new(Some("origin".into()), Some("url2".into())).unwrap(),
        ];
        let err =
            ManifestSpec::new(Defaults::default(), remotes, Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Duplicate {
                field: "remote name",
                ..
            }
        ));
    }

    #[test]
    fn test_manifest_rejects_unsigned_group_filter() {
        let err = ManifestSpec::new(
            Defaults::default(),
            Vec::new(),
            Vec::new(),
            vec!["notdefault".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat("group filter", _)));
    }

    #[test]
    fn test_default_manifest_version() {
        assert_eq!(ManifestSpec::default().version, "1.0");
    }
}
