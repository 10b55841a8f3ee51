//! Project model: one repository checked out into the workspace, plus the
//! file copies and symlinks applied after checkout.

use serde::{Deserialize, Serialize};

use crate::validation::{
    ValidationError, ValidationResult, validate_group, validate_path, validate_project_name,
    validate_remote_name, validate_revision,
};

/// A source/destination pair describing a file copied or symlinked from a
/// checked-out project into the workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRef {
    /// Path relative to the project checkout
    pub src: String,
    /// Path relative to the workspace root
    pub dest: String,
}

impl FileRef {
    /// Validated constructor. Both paths are required and must stay inside
    /// the workspace.
    pub fn new(src: Option<String>, dest: Option<String>) -> ValidationResult<Self> {
        let src = src.ok_or(ValidationError::Missing("file src"))?;
        validate_path("file src", &src)?;
        let dest = dest.ok_or(ValidationError::Missing("file dest"))?;
        validate_path("file dest", &dest)?;
        Ok(Self { src, dest })
    }
}

/// A project dependency of the manifest.
///
/// Optional fields fall back to the manifest [`Defaults`] during workspace
/// sync; resolution itself happens outside this SDK.
///
/// [`Defaults`]: crate::models::Defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectSpec {
    /// Project name, resolved to a URL relative to the remote's base
    pub name: String,
    /// Checkout path relative to the workspace root; `name` stands in
    /// when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Remote override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    /// Revision override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Group tags controlling optional inclusion during sync
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    /// Files copied from the checkout into the workspace
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub copyfiles: Vec<FileRef>,
    /// Files symlinked from the checkout into the workspace
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linkfiles: Vec<FileRef>,
    /// Whether the project's own manifest is fetched and merged
    #[serde(default)]
    pub recursive: bool,
}

impl ProjectSpec {
    /// Validated constructor.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: Option<String>,
        path: Option<String>,
        remote: Option<String>,
        revision: Option<String>,
        groups: Vec<String>,
        copyfiles: Vec<FileRef>,
        linkfiles: Vec<FileRef>,
        recursive: bool,
    ) -> ValidationResult<Self> {
        let name = name.ok_or(ValidationError::Missing("project name"))?;
        validate_project_name(&name)?;
        if let Some(path) = &path {
            validate_path("project path", path)?;
        }
        if let Some(remote) = &remote {
            validate_remote_name(remote)?;
        }
        if let Some(revision) = &revision {
            validate_revision(revision)?;
        }
        for group in &groups {
            validate_group(group)?;
        }
        Ok(Self {
            name,
            path,
            remote,
            revision,
            groups,
            copyfiles,
            linkfiles,
            recursive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_requires_name() {
        let err = ProjectSpec::new(
            None,
            None,
            None,
            None,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::Missing("project name")));
    }

    #[test]
    fn test_file_ref_rejects_escaping_dest() {
        let err = FileRef::new(Some("copy".into()), Some("../outside".into())).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat("file dest", _)));
    }
}
