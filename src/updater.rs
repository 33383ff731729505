//! Appends a new version entry to a listing by copying the latest one.

use crate::config::ToolConfig;
use crate::io::{write_atomic, PathUtils};
use crate::manifest::{derive_record, to_pretty_string, Manifest, Version};
use crate::{ManifestError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Record fields that hold digests of the download and cannot be rewritten
const CHECKSUM_FIELDS: &[&str] = &["zipSHA256"];

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub manifest_path: PathBuf,
    pub new_version: String,
    /// Destination; the source is overwritten when unset
    pub output_path: Option<PathBuf>,
    pub dry_run: bool,
}

impl UpdateRequest {
    pub fn new(manifest_path: impl Into<PathBuf>, new_version: impl Into<String>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            new_version: new_version.into(),
            output_path: None,
            dry_run: false,
        }
    }

    pub fn with_output(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn destination(&self) -> &Path {
        self.output_path.as_deref().unwrap_or(self.manifest_path.as_path())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    /// Version of the record the new one was copied from
    pub template_version: String,
    pub new_version: String,
    pub output_path: PathBuf,
    /// Fields other than `version` whose text was rewritten
    pub rewritten_fields: Vec<String>,
    /// The serialized listing, as written (or as it would be written)
    pub document: String,
    pub written: bool,
}

/// Result of applying a version to an in-memory listing
#[derive(Debug, Clone)]
pub struct Applied {
    pub template_version: String,
    pub rewritten_fields: Vec<String>,
}

pub struct Updater {
    config: ToolConfig,
}

impl Updater {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Read, extend and write one listing
    pub fn update(&self, request: &UpdateRequest) -> Result<UpdateOutcome> {
        // Reject bad input before any file is touched
        let new_version = Version::parse(&request.new_version)?;

        let source_text = self.read_manifest(&request.manifest_path)?;
        let mut manifest = Manifest::parse(&source_text, &request.manifest_path)?;

        let applied = self.apply(&mut manifest, &new_version, &request.manifest_path)?;

        let indent = self.config.indent_for(&source_text);
        debug!("Serializing with {} indentation", indent);
        let document = to_pretty_string(manifest.as_value(), indent)?;

        let output_path = request.destination().to_path_buf();
        if request.dry_run {
            info!("Dry run, not writing {}", output_path.display());
        } else {
            write_atomic(&output_path, document.as_bytes())?;
            info!(
                "Added version {} to {} in {}",
                new_version,
                self.config.package_id,
                output_path.display()
            );
        }

        Ok(UpdateOutcome {
            template_version: applied.template_version,
            new_version: new_version.to_string(),
            output_path,
            rewritten_fields: applied.rewritten_fields,
            document,
            written: !request.dry_run,
        })
    }

    /// Insert `new_version` into the configured package of `manifest`.
    ///
    /// `source` only names the listing in error messages.
    pub fn apply(&self, manifest: &mut Manifest, new_version: &Version, source: &Path) -> Result<Applied> {
        let package_id = &self.config.package_id;
        let mut versions = manifest.versions_mut(package_id)?;

        if versions.contains(new_version.as_str())? {
            return Err(ManifestError::DuplicateVersion {
                version: new_version.to_string(),
                path: source.to_path_buf(),
            });
        }

        let template = versions.latest()?;
        debug!(
            "Using {} (position {} of {}) as template for {}",
            template.version,
            template.index,
            versions.len(),
            new_version
        );
        if *new_version < template.version {
            warn!(
                "New version {} sorts below the latest version {}",
                new_version, template.version
            );
        }

        let (record, rewritten_fields) =
            derive_record(&template.record, template.version.as_str(), new_version.as_str())?;

        for field in CHECKSUM_FIELDS {
            if record.get(*field).is_some() {
                warn!(
                    "'{}' was copied from {} unchanged and must be updated by hand",
                    field, template.version
                );
            }
        }

        versions.insert_after(template.index, new_version.as_str(), record);

        Ok(Applied {
            template_version: template.version.to_string(),
            rewritten_fields,
        })
    }

    fn read_manifest(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                ManifestError::NotFound {
                    path: path.to_path_buf(),
                    hint: PathUtils::not_found_hint(&cwd, &self.config.manifest_path),
                }
            }
            _ => ManifestError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        String::from_utf8(bytes).map_err(|e| {
            ManifestError::Format(format!("{} is not valid UTF-8: {}", path.display(), e))
        })
    }
}

/// Append `new_version` to the default package of the listing at
/// `manifest_path`, writing to `output_path` or back to the source.
pub fn update(manifest_path: &Path, new_version: &str, output_path: Option<&Path>) -> Result<UpdateOutcome> {
    let mut request = UpdateRequest::new(manifest_path, new_version);
    if let Some(output_path) = output_path {
        request = request.with_output(output_path);
    }
    Updater::new(ToolConfig::default()).update(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn updater() -> Updater {
        Updater::new(ToolConfig::default().with_overrides(Some("com.example.tool".into()), None, None))
    }

    fn manifest(versions: serde_json::Value) -> Manifest {
        let text = json!({ "packages": { "com.example.tool": { "versions": versions } } }).to_string();
        Manifest::parse(&text, Path::new("vpm.json")).unwrap()
    }

    #[test]
    fn test_apply_appends_after_latest() {
        let mut listing = manifest(json!({
            "0.3.1": { "version": "0.3.1", "url": "https://example.com/0.3.1/pkg-0.3.1.zip" }
        }));
        let applied = updater()
            .apply(&mut listing, &Version::parse("0.3.2").unwrap(), Path::new("vpm.json"))
            .unwrap();

        assert_eq!(applied.template_version, "0.3.1");
        assert_eq!(applied.rewritten_fields, vec!["url".to_string()]);
        assert_eq!(
            listing.as_value()["packages"]["com.example.tool"]["versions"],
            json!({
                "0.3.1": { "version": "0.3.1", "url": "https://example.com/0.3.1/pkg-0.3.1.zip" },
                "0.3.2": { "version": "0.3.2", "url": "https://example.com/0.3.2/pkg-0.3.2.zip" }
            })
        );
    }

    #[test]
    fn test_apply_rejects_duplicate() {
        let mut listing = manifest(json!([{ "version": "0.3.1", "url": "u/0.3.1" }]));
        let before = listing.clone();
        let err = updater()
            .apply(&mut listing, &Version::parse("0.3.1").unwrap(), Path::new("vpm.json"))
            .unwrap_err();

        assert_eq!(err.kind(), "DuplicateVersionError");
        assert_eq!(listing, before);
    }

    #[test]
    fn test_apply_inserts_after_highest_not_last() {
        let mut listing = manifest(json!([
            { "version": "0.2.0", "url": "u/0.2.0" },
            { "version": "0.1.5", "url": "u/0.1.5" }
        ]));
        updater()
            .apply(&mut listing, &Version::parse("0.2.1").unwrap(), Path::new("vpm.json"))
            .unwrap();

        let versions: Vec<_> = listing.as_value()["packages"]["com.example.tool"]["versions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|record| record["version"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(versions, vec!["0.2.0", "0.2.1", "0.1.5"]);
    }

    #[test]
    fn test_invalid_version_checked_before_reading() {
        let request = UpdateRequest::new("/definitely/not/here.json", "not-a-version");
        let err = updater().update(&request).unwrap_err();
        assert_eq!(err.kind(), "InvalidVersionError");
    }

    #[test]
    fn test_destination_defaults_to_source() {
        let request = UpdateRequest::new("a.json", "1.0.0");
        assert_eq!(request.destination(), Path::new("a.json"));
        let request = request.with_output("b.json");
        assert_eq!(request.destination(), Path::new("b.json"));
    }
}
