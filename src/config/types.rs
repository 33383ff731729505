use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::io::paths::{DEFAULT_MANIFEST_PATH, DEFAULT_PACKAGE_ID};
use crate::manifest::Indent;

/// Settings for the version updater
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Package id under `packages` whose versions are managed
    pub package_id: String,

    /// Listing read when no path is given on the command line
    pub manifest_path: PathBuf,

    /// Spaces per indentation level; detected from the source when unset
    pub indent: Option<usize>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            package_id: DEFAULT_PACKAGE_ID.to_string(),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            indent: None,
        }
    }
}

impl ToolConfig {
    /// Apply command-line values on top of this configuration
    pub fn with_overrides(
        mut self,
        package_id: Option<String>,
        manifest_path: Option<PathBuf>,
        indent: Option<usize>,
    ) -> Self {
        if let Some(package_id) = package_id {
            self.package_id = package_id;
        }
        if let Some(manifest_path) = manifest_path {
            self.manifest_path = manifest_path;
        }
        if indent.is_some() {
            self.indent = indent;
        }
        self
    }

    /// Indentation for output, falling back to what `source` uses
    pub fn indent_for(&self, source: &str) -> Indent {
        match self.indent {
            Some(width) => Indent::Spaces(width),
            None => Indent::detect(source),
        }
    }
}
