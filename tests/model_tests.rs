//! Canonical model tests

use workspace_manifest_sdk::{
    Defaults, FileRef, ManifestSpec, ProjectSpec, Remote, ValidationError,
};

mod constructors {
    use super::*;

    #[test]
    fn test_remote_validates_name() {
        let err = Remote::new(Some("my remote".into()), Some("url".into())).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat("remote name", _)));
    }

    #[test]
    fn test_project_validates_empty_name() {
        let err = ProjectSpec::new(
            Some(String::new()),
            None,
            None,
            None,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::Empty("project name")));
    }

    #[test]
    fn test_project_validates_groups() {
        let err = ProjectSpec::new(
            Some("dep".into()),
            None,
            None,
            None,
            vec!["good".to_string(), "no good".to_string()],
            Vec::new(),
            Vec::new(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat("group", _)));
    }

    #[test]
    fn test_project_validates_absolute_path() {
        let err = ProjectSpec::new(
            Some("dep".into()),
            Some("/etc/passwd".into()),
            None,
            None,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat("project path", _)));
    }

    #[test]
    fn test_file_ref_requires_both_ends() {
        assert!(matches!(
            FileRef::new(None, Some("dest".into())),
            Err(ValidationError::Missing("file src"))
        ));
        assert!(matches!(
            FileRef::new(Some("src".into()), None),
            Err(ValidationError::Missing("file dest"))
        ));
    }

    #[test]
    fn test_defaults_validates_revision() {
        let err = Defaults::new(None, Some("two words".into())).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCharacters {
                field: "revision",
                ..
            }
        ));
    }

    #[test]
    fn test_manifest_accepts_valid_parts() {
        let remotes = vec![Remote::new(Some("origin".into()), Some("url".into())).unwrap()];
        let deps = vec![
            ProjectSpec::new(
                Some("dep".into()),
                None,
                Some("origin".into()),
                Some("main".into()),
                vec!["ci".to_string()],
                Vec::new(),
                Vec::new(),
                false,
            )
            .unwrap(),
        ];
        let manifest = ManifestSpec::new(
            Defaults::default(),
            remotes,
            deps,
            vec!["-notdefault".to_string()],
        )
        .unwrap();
        assert_eq!(manifest.version, "1.0");
        assert_eq!(manifest.dependencies.len(), 1);
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_remote_serializes_url_base_kebab() {
        let remote = Remote::new(Some("origin".into()), Some("../repos".into())).unwrap();
        let value = serde_json::to_value(&remote).unwrap();
        assert_eq!(value["url-base"], "../repos");
    }

    #[test]
    fn test_manifest_serializes_group_filters_kebab() {
        let manifest = ManifestSpec::new(
            Defaults::default(),
            Vec::new(),
            Vec::new(),
            vec!["-notdefault".to_string()],
        )
        .unwrap();
        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(value["group-filters"][0], "-notdefault");
        assert_eq!(value["version"], "1.0");
    }

    #[test]
    fn test_manifest_round_trips_through_json() {
        let remotes = vec![Remote::new(Some("origin".into()), Some("url".into())).unwrap()];
        let manifest = ManifestSpec::new(
            Defaults::new(Some("origin".into()), Some("main".into())).unwrap(),
            remotes,
            Vec::new(),
            vec!["-notdefault".to_string()],
        )
        .unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        let restored: ManifestSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(manifest, restored);
    }
}
