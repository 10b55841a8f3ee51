//! Validation logic for manifest field values.

pub mod input;

pub use input::{
    MAX_NAME_LENGTH, MAX_PATH_LENGTH, ValidationError, ValidationResult, validate_group,
    validate_group_filter, validate_path, validate_project_name, validate_remote_name,
    validate_revision, validate_url_base,
};
