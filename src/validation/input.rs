//! Input validation for manifest field values.
//!
//! These functions are applied by the model constructors before a value is
//! accepted into the canonical manifest. They are the only semantic checks
//! this SDK performs; anything beyond field shape (URL reachability,
//! revision existence) is a workspace-sync concern.
//!
//! # Security
//!
//! Path validation rejects absolute paths and parent-directory traversal so
//! a hostile manifest cannot place files outside the workspace.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Maximum length for names (remotes, projects, groups, revisions)
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length for paths and URL bases
pub const MAX_PATH_LENGTH: usize = 4096;

static RE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[a-zA-Z0-9_][a-zA-Z0-9_.-]*\z").expect("Invalid regex"));
static RE_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[a-zA-Z0-9_][a-zA-Z0-9_-]*\z").expect("Invalid regex"));
static RE_GROUP_FILTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[-+][a-zA-Z0-9_][a-zA-Z0-9_-]*\z").expect("Invalid regex"));

/// Errors that can occur during field validation.
#[derive(Debug, Clone, Error, Serialize)]
pub enum ValidationError {
    /// A required value was not provided
    #[error("{0} is required")]
    Missing(&'static str),

    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input contains invalid characters
    #[error("{field} contains invalid characters: {reason}")]
    InvalidCharacters { field: &'static str, reason: String },

    /// Input has invalid format
    #[error("{0}: {1}")]
    InvalidFormat(&'static str, String),

    /// A value that must be unique appeared twice
    #[error("duplicate {field}: {value}")]
    Duplicate { field: &'static str, value: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a remote name.
///
/// # Examples
///
/// ```
/// use workspace_manifest_sdk::validation::validate_remote_name;
///
/// assert!(validate_remote_name("origin").is_ok());
/// assert!(validate_remote_name("").is_err());
/// assert!(validate_remote_name("my remote").is_err());
/// ```
pub fn validate_remote_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Empty("remote name"));
    }
    check_length("remote name", name, MAX_NAME_LENGTH)?;
    if !RE_NAME.is_match(name) {
        return Err(ValidationError::InvalidFormat(
            "remote name",
            format!("'{name}' must match {}", RE_NAME.as_str()),
        ));
    }
    Ok(())
}

/// Validate a project name.
///
/// Project names resolve to URLs relative to a remote base, so `/` is
/// allowed, but they must stay relative and free of traversal segments.
pub fn validate_project_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Empty("project name"));
    }
    check_length("project name", name, MAX_NAME_LENGTH)?;
    check_relative("project name", name)?;
    Ok(())
}

/// Validate a workspace-relative path (project checkout path, file src/dest).
pub fn validate_path(field: &'static str, path: &str) -> ValidationResult<()> {
    if path.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    check_length(field, path, MAX_PATH_LENGTH)?;
    check_relative(field, path)?;
    Ok(())
}

/// Validate a revision (branch, tag or commit id).
pub fn validate_revision(revision: &str) -> ValidationResult<()> {
    if revision.is_empty() {
        return Err(ValidationError::Empty("revision"));
    }
    check_length("revision", revision, MAX_NAME_LENGTH)?;
    if let Some(c) = revision.chars().find(|c| c.is_whitespace()) {
        return Err(ValidationError::InvalidCharacters {
            field: "revision",
            reason: format!("invalid character: '{c}'"),
        });
    }
    Ok(())
}

/// Validate a remote URL base.
pub fn validate_url_base(url_base: &str) -> ValidationResult<()> {
    if url_base.is_empty() {
        return Err(ValidationError::Empty("remote url-base"));
    }
    check_length("remote url-base", url_base, MAX_PATH_LENGTH)?;
    if let Some(c) = url_base.chars().find(|c| c.is_whitespace()) {
        return Err(ValidationError::InvalidCharacters {
            field: "remote url-base",
            reason: format!("invalid character: '{c}'"),
        });
    }
    Ok(())
}

/// Validate a group name.
///
/// # Examples
///
/// ```
/// use workspace_manifest_sdk::validation::validate_group;
///
/// assert!(validate_group("notdefault").is_ok());
/// assert!(validate_group("ci-only").is_ok());
/// assert!(validate_group("-notdefault").is_err());
/// ```
pub fn validate_group(group: &str) -> ValidationResult<()> {
    if group.is_empty() {
        return Err(ValidationError::Empty("group"));
    }
    check_length("group", group, MAX_NAME_LENGTH)?;
    if !RE_GROUP.is_match(group) {
        return Err(ValidationError::InvalidFormat(
            "group",
            format!("'{group}' must match {}", RE_GROUP.as_str()),
        ));
    }
    Ok(())
}

/// Validate a group filter: a group name prefixed with `+` (include) or
/// `-` (exclude).
pub fn validate_group_filter(filter: &str) -> ValidationResult<()> {
    if filter.is_empty() {
        return Err(ValidationError::Empty("group filter"));
    }
    check_length("group filter", filter, MAX_NAME_LENGTH)?;
    if !RE_GROUP_FILTER.is_match(filter) {
        return Err(ValidationError::InvalidFormat(
            "group filter",
            format!("'{filter}' must match {}", RE_GROUP_FILTER.as_str()),
        ));
    }
    Ok(())
}

fn check_length(field: &'static str, value: &str, max: usize) -> ValidationResult<()> {
    if value.len() > max {
        return Err(ValidationError::TooLong {
            field,
            max,
            actual: value.len(),
        });
    }
    Ok(())
}

fn check_relative(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.starts_with('/') {
        return Err(ValidationError::InvalidFormat(
            field,
            "must be relative".to_string(),
        ));
    }
    if value.contains('\\') {
        return Err(ValidationError::InvalidCharacters {
            field,
            reason: "backslashes are not allowed".to_string(),
        });
    }
    if let Some(c) = value.chars().find(|c| c.is_whitespace()) {
        return Err(ValidationError::InvalidCharacters {
            field,
            reason: format!("invalid character: '{c}'"),
        });
    }
    if value.split('/').any(|segment| segment == "..") {
        return Err(ValidationError::InvalidFormat(
            field,
            "parent-directory traversal is not allowed".to_string(),
        ));
    }
    Ok(())
}
