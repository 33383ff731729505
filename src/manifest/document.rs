use super::version::Version;
use crate::{ManifestError, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// A parsed VPM listing.
///
/// The document is kept as an ordered `serde_json::Value` so that keys and
/// records we never touch are written back exactly as they were read.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    root: Value,
}

impl Manifest {
    /// Parse listing text. `source` is only used for error messages.
    pub fn parse(text: &str, source: &Path) -> Result<Self> {
        let root: Value = serde_json::from_str(text).map_err(|e| ManifestError::Json {
            path: source.to_path_buf(),
            source: e,
        })?;
        if !root.is_object() {
            return Err(ManifestError::Format(format!(
                "top level of {} must be a JSON object",
                source.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    fn packages(&self) -> Result<&Map<String, Value>> {
        self.root
            .get("packages")
            .and_then(Value::as_object)
            .ok_or_else(|| ManifestError::Format("missing 'packages' object".to_string()))
    }

    /// Ids of every package in the listing, in document order
    pub fn package_ids(&self) -> Vec<String> {
        self.packages()
            .map(|packages| packages.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Borrow the version collection of one package
    pub fn versions_mut(&mut self, package_id: &str) -> Result<VersionList<'_>> {
        let available = self.package_ids();
        self.packages()?;

        let package = self
            .root
            .get_mut("packages")
            .and_then(Value::as_object_mut)
            .and_then(|packages| packages.get_mut(package_id))
            .ok_or_else(|| {
                ManifestError::Format(format!(
                    "package '{}' not found (available: {})",
                    package_id,
                    if available.is_empty() {
                        "none".to_string()
                    } else {
                        available.join(", ")
                    }
                ))
            })?;

        match package.get_mut("versions") {
            Some(Value::Object(map)) => Ok(VersionList::Keyed(map)),
            Some(Value::Array(records)) => Ok(VersionList::Listed(records)),
            Some(_) => Err(ManifestError::Format(format!(
                "'versions' of package '{package_id}' must be an object or an array"
            ))),
            None => Err(ManifestError::Format(format!(
                "package '{package_id}' has no 'versions'"
            ))),
        }
    }
}

/// The versions of one package.
///
/// VPM listings key records by version string; plain lists of records are
/// accepted too.
#[derive(Debug)]
pub enum VersionList<'a> {
    Keyed(&'a mut Map<String, Value>),
    Listed(&'a mut Vec<Value>),
}

/// The record a new version is derived from
#[derive(Debug, Clone)]
pub struct Template {
    pub index: usize,
    pub version: Version,
    pub record: Value,
}

impl VersionList<'_> {
    pub fn len(&self) -> usize {
        match self {
            VersionList::Keyed(map) => map.len(),
            VersionList::Listed(records) => records.len(),
        }
    }

    /// Version strings in document order.
    ///
    /// Keyed listings are identified by their keys alone; list entries need
    /// a string `version` field.
    pub fn versions(&self) -> Result<Vec<String>> {
        match self {
            VersionList::Keyed(map) => Ok(map.keys().cloned().collect()),
            VersionList::Listed(records) => records
                .iter()
                .map(|record| record_version(record).map(str::to_string))
                .collect(),
        }
    }

    pub fn contains(&self, version: &str) -> Result<bool> {
        Ok(self.versions()?.iter().any(|v| v == version))
    }

    /// The record with the highest version precedence.
    ///
    /// Ties keep the later record, which is the newest for append-only lists.
    pub fn latest(&self) -> Result<Template> {
        let mut best: Option<(usize, Version)> = None;
        for (index, raw) in self.versions()?.iter().enumerate() {
            let version = Version::parse(raw).map_err(|e| {
                ManifestError::Format(format!("existing entry has unparseable version: {e}"))
            })?;
            if best.as_ref().map_or(true, |(_, current)| version >= *current) {
                best = Some((index, version));
            }
        }

        let (index, version) =
            best.ok_or_else(|| ManifestError::Format("package has no versions".to_string()))?;
        let record = match self {
            VersionList::Keyed(map) => map.values().nth(index).cloned(),
            VersionList::Listed(records) => records.get(index).cloned(),
        }
        .ok_or_else(|| ManifestError::Format("template record disappeared".to_string()))?;

        // Only the template's own `version` has to match its key
        let declared = record_version(&record)?;
        if declared != version.as_str() {
            return Err(ManifestError::Format(format!(
                "Latest entry version '{declared}' does not match key '{version}'."
            )));
        }

        Ok(Template {
            index,
            version,
            record,
        })
    }

    /// Insert `record` directly after position `index`
    pub fn insert_after(&mut self, index: usize, version: &str, record: Value) {
        match self {
            VersionList::Keyed(map) => {
                let existing = std::mem::take(&mut **map);
                let position = index.min(existing.len().saturating_sub(1));
                let mut pending = Some((version.to_string(), record));
                for (i, (key, value)) in existing.into_iter().enumerate() {
                    map.insert(key, value);
                    if i == position {
                        if let Some((key, value)) = pending.take() {
                            map.insert(key, value);
                        }
                    }
                }
                if let Some((key, value)) = pending {
                    map.insert(key, value);
                }
            }
            VersionList::Listed(records) => {
                let position = (index + 1).min(records.len());
                records.insert(position, record);
            }
        }
    }
}

fn record_version(record: &Value) -> Result<&str> {
    record
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| ManifestError::Format("version entry has no string 'version' field".to_string()))
}

/// Build the record for `new_version` from `template`.
///
/// `version` is set outright. Every other top-level string field that
/// mentions the old version has all occurrences replaced; nested values are
/// copied verbatim. Returns the record and the names of rewritten fields.
pub fn derive_record(template: &Value, old_version: &str, new_version: &str) -> Result<(Value, Vec<String>)> {
    let fields = template
        .as_object()
        .ok_or_else(|| ManifestError::Format("version entry must be a JSON object".to_string()))?;

    if let Some(Value::String(url)) = fields.get("url") {
        if !url.contains(old_version) {
            return Err(ManifestError::Format(format!(
                "Latest version '{old_version}' not found in URL '{url}'."
            )));
        }
    }

    let mut derived = Map::new();
    let mut rewritten = Vec::new();
    for (key, value) in fields {
        let value = match value {
            _ if key == "version" => Value::String(new_version.to_string()),
            Value::String(text) if text.contains(old_version) => {
                rewritten.push(key.clone());
                Value::String(text.replace(old_version, new_version))
            }
            other => other.clone(),
        };
        derived.insert(key.clone(), value);
    }
    if !derived.contains_key("version") {
        derived.insert("version".to_string(), Value::String(new_version.to_string()));
    }

    Ok((Value::Object(derived), rewritten))
}
