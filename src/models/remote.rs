//! Remote model: a named base URL that project URLs resolve against.

use serde::{Deserialize, Serialize};

use crate::validation::{
    ValidationError, ValidationResult, validate_remote_name, validate_url_base,
};

/// A named remote. Projects reference remotes by name; the order of
/// remotes in a manifest governs resolution precedence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Remote {
    /// Remote name, referenced by projects and defaults
    pub name: String,
    /// Base URL; project names are resolved relative to this
    #[serde(rename = "url-base")]
    pub url_base: String,
}

impl Remote {
    /// Validated constructor. Both fields are required; `None` means the
    /// source document did not provide the value.
    pub fn new(name: Option<String>, url_base: Option<String>) -> ValidationResult<Self> {
        let name = name.ok_or(ValidationError::Missing("remote name"))?;
        validate_remote_name(&name)?;
        let url_base = url_base.ok_or(ValidationError::Missing("remote url-base"))?;
        validate_url_base(&url_base)?;
        Ok(Self { name, url_base })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_requires_name_and_url_base() {
        assert!(Remote::new(Some("origin".into()), Some("../repos".into())).is_ok());
        assert!(matches!(
            Remote::new(None, Some("../repos".into())),
            Err(ValidationError::Missing("remote name"))
        ));
        assert!(matches!(
            Remote::new(Some("origin".into()), None),
            Err(ValidationError::Missing("remote url-base"))
        ));
    }
}
