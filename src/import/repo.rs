//! Repo manifest importer.
//!
//! Converts the XML manifest dialect of the `repo` multi-repository tool
//! into a canonical [`ManifestSpec`]. The conversion is one-directional:
//! `save` always fails, this dialect is a legacy import path rather than a
//! persistence target.
//!
//! Nested `<project>` elements inherit their ancestor's name as a name
//! prefix and the ancestor's path (or, absent a path, its name) as a path
//! prefix; the nested tree is flattened into a pre-order dependency list.
//! Unknown attributes and elements are tolerated and reported once per
//! load call.

use std::collections::HashSet;
use std::io;
use std::ops::Range;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::{Document, Node};
use tracing::{debug, info};

use crate::error::ManifestError;
use crate::format::ManifestFormat;
use crate::models::{Defaults, FileRef, ManifestSpec, ProjectSpec, Remote};
use crate::validation::ValidationError;

/// Separator between entries of a `groups` attribute: a comma or a
/// whitespace character, followed by optional further whitespace.
static RE_GROUP_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\s]\s*").expect("Invalid regex"));

/// The `repo` tool hides `notdefault` projects unless asked for them;
/// imported manifests carry the equivalent exclusion explicitly.
const DEFAULT_GROUP_FILTER: &str = "-notdefault";

/// The `repo` XML manifest format (import-only).
#[derive(Debug, Clone, Copy, Default)]
pub struct RepoManifestFormat;

impl ManifestFormat for RepoManifestFormat {
    fn is_compatible(&self, path: &Path) -> bool {
        path.extension().is_some_and(|extension| extension == "xml")
    }

    fn load(&self, path: &Path) -> Result<ManifestSpec, ManifestError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound(path.to_path_buf()));
            }
            Err(err) => {
                return Err(ManifestError::Invalid {
                    path: path.to_path_buf(),
                    detail: err.to_string(),
                });
            }
        };

        // roxmltree resolves no external entities and bounds internal
        // entity expansion, so a hostile manifest cannot trigger file or
        // network access during parsing.
        let document = Document::parse(&text).map_err(|err| ManifestError::Invalid {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;
        let root = document.root_element();
        if root.tag_name().name() != "manifest" {
            return Err(ManifestError::Invalid {
                path: path.to_path_buf(),
                detail: format!(
                    "Root element is '{}'. Expecting 'manifest'",
                    root.tag_name().name()
                ),
            });
        }

        Converter::new(path)
            .convert_manifest(root)
            .map_err(|err| err.into_manifest_error(path, &text))
    }

    fn save(&self, _manifest: &ManifestSpec, path: &Path) -> Result<(), ManifestError> {
        Err(ManifestError::IncompatibleFormat(path.to_path_buf()))
    }
}

/// Validation failure tied to the source element that produced it.
struct ConvertError {
    range: Range<usize>,
    source: ValidationError,
}

impl ConvertError {
    fn new(node: Node<'_, '_>, source: ValidationError) -> Self {
        Self {
            range: node.range(),
            source,
        }
    }

    /// The user-facing diagnostic echoes the offending source fragment;
    /// the field-level cause is only logged.
    fn into_manifest_error(self, path: &Path, text: &str) -> ManifestError {
        debug!("{}: {}", path.display(), self.source);
        ManifestError::Invalid {
            path: path.to_path_buf(),
            detail: text[self.range].trim().to_string(),
        }
    }
}

/// Attributes accumulated from `<default>` elements. A document may carry
/// several; the last value written for a key wins.
#[derive(Default)]
struct DefaultsRecord {
    remote: Option<String>,
    revision: Option<String>,
}

/// Name/path prefix a nested `<project>` inherits from its ancestors.
struct Scope {
    name: String,
    path: String,
}

/// State for one `load` call: the source path (for diagnostics) and the
/// set of already-reported ignored keys.
struct Converter<'p> {
    path: &'p Path,
    ignored: HashSet<String>,
}

impl<'p> Converter<'p> {
    fn new(path: &'p Path) -> Self {
        Self {
            path,
            ignored: HashSet::new(),
        }
    }

    fn convert_manifest(mut self, root: Node<'_, '_>) -> Result<ManifestSpec, ConvertError> {
        let mut defaults = DefaultsRecord::default();
        let mut remotes = Vec::new();
        let mut dependencies = Vec::new();

        for element in root.children().filter(|node| node.is_element()) {
            match element.tag_name().name() {
                "default" => self.convert_default(&mut defaults, element),
                "remote" => remotes.push(self.convert_remote(element)?),
                "project" => dependencies.extend(self.convert_project(element, None)?),
                tag => self.ignore(tag.to_string()),
            }
        }

        Defaults::new(defaults.remote, defaults.revision)
            .and_then(|defaults| {
                ManifestSpec::new(
                    defaults,
                    remotes,
                    dependencies,
                    vec![DEFAULT_GROUP_FILTER.to_string()],
                )
            })
            .map_err(|source| ConvertError::new(root, source))
    }

    fn convert_default(&mut self, record: &mut DefaultsRecord, element: Node<'_, '_>) {
        for attribute in element.attributes() {
            match attribute.name() {
                "remote" => record.remote = Some(attribute.value().to_string()),
                "revision" => record.revision = Some(attribute.value().to_string()),
                name => self.ignore(format!("default.{name}")),
            }
        }
    }

    fn convert_remote(&mut self, element: Node<'_, '_>) -> Result<Remote, ConvertError> {
        let mut name = None;
        let mut url_base = None;
        for attribute in element.attributes() {
            match attribute.name() {
                "name" => name = Some(attribute.value().to_string()),
                "fetch" => url_base = Some(attribute.value().to_string()),
                other => self.ignore(format!("remote.{other}")),
            }
        }
        Remote::new(name, url_base).map_err(|source| ConvertError::new(element, source))
    }

    /// Convert one `<project>` element and its nested projects into a
    /// pre-order list: the project itself first, then every descendant
    /// subtree in document order.
    fn convert_project(
        &mut self,
        element: Node<'_, '_>,
        scope: Option<&Scope>,
    ) -> Result<Vec<ProjectSpec>, ConvertError> {
        let mut name = None;
        let mut path = None;
        let mut remote = None;
        let mut revision = None;
        let mut groups = Vec::new();

        for attribute in element.attributes() {
            let value = attribute.value();
            match attribute.name() {
                "name" => {
                    name = Some(match scope {
                        Some(scope) => format!("{}{}", scope.name, value),
                        None => value.to_string(),
                    });
                }
                "path" => {
                    path = Some(match scope {
                        Some(scope) => format!("{}/{}", scope.path, value),
                        None => value.to_string(),
                    });
                }
                "remote" => remote = Some(value.to_string()),
                "revision" => revision = Some(value.to_string()),
                "groups" => groups = split_groups(value),
                // Historical quirk of the source tool: unknown project
                // attributes are reported under the `default.` prefix.
                other => self.ignore(format!("default.{other}")),
            }
        }

        // Prefix seen by nested projects: this project's resolved name,
        // and its resolved path where present, else the name again.
        let child_scope = Scope {
            name: name.clone().unwrap_or_default(),
            path: path
                .clone()
                .or_else(|| name.clone())
                .unwrap_or_default(),
        };

        let mut copyfiles = Vec::new();
        let mut linkfiles = Vec::new();
        let mut subprojects = Vec::new();
        for child in element.children().filter(|node| node.is_element()) {
            match child.tag_name().name() {
                "copyfile" => copyfiles.push(self.convert_file(child, "project.copyfile")?),
                "linkfile" => linkfiles.push(self.convert_file(child, "project.linkfile")?),
                "project" => {
                    subprojects.extend(self.convert_project(child, Some(&child_scope))?);
                }
                tag => self.ignore(format!("project.{tag}")),
            }
        }

        // This dialect has no remote-fetched nested manifests, so
        // `recursive` is always false.
        let project = ProjectSpec::new(
            name, path, remote, revision, groups, copyfiles, linkfiles, false,
        )
        .map_err(|source| ConvertError::new(element, source))?;

        let mut flattened = Vec::with_capacity(1 + subprojects.len());
        flattened.push(project);
        flattened.append(&mut subprojects);
        Ok(flattened)
    }

    fn convert_file(
        &mut self,
        element: Node<'_, '_>,
        prefix: &str,
    ) -> Result<FileRef, ConvertError> {
        let mut src = None;
        let mut dest = None;
        for attribute in element.attributes() {
            match attribute.name() {
                "src" => src = Some(attribute.value().to_string()),
                "dest" => dest = Some(attribute.value().to_string()),
                other => self.ignore(format!("{prefix}.{other}")),
            }
        }
        FileRef::new(src, dest).map_err(|source| ConvertError::new(element, source))
    }

    fn ignore(&mut self, key: String) {
        if !self.ignored.contains(&key) {
            info!("{}: Ignoring '{}'", self.path.display(), key);
            self.ignored.insert(key);
        }
    }
}

fn split_groups(raw: &str) -> Vec<String> {
    RE_GROUP_SEPARATOR
        .split(raw)
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_groups() {
        assert_eq!(split_groups("a,b  c"), vec!["a", "b", "c"]);
        assert_eq!(split_groups("abc,cde fgh"), vec!["abc", "cde", "fgh"]);
        assert_eq!(split_groups(" lone "), vec!["lone"]);
        assert!(split_groups("").is_empty());
        assert!(split_groups(" ,, ").is_empty());
    }

    #[test]
    fn test_ignore_suppresses_repeated_keys() {
        let path = Path::new("manifest.xml");
        let mut converter = Converter::new(path);
        converter.ignore("default.upstream".to_string());
        converter.ignore("default.upstream".to_string());
        converter.ignore("remote.review".to_string());
        assert_eq!(converter.ignored.len(), 2);
    }

    #[test]
    fn test_is_compatible_is_case_sensitive() {
        let format = RepoManifestFormat;
        assert!(format.is_compatible(Path::new("default.xml")));
        assert!(format.is_compatible(Path::new("some/dir/manifest.xml")));
        assert!(!format.is_compatible(Path::new("default.XML")));
        assert!(!format.is_compatible(Path::new("manifest.toml")));
        assert!(!format.is_compatible(Path::new("manifest")));
    }
}
