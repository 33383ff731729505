use super::types::ToolConfig;
use crate::{ManifestError, Result};
use std::path::Path;

/// Loads [`ToolConfig`] from YAML files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a configuration file. Keys that are absent keep their defaults.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<ToolConfig> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ManifestError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml(&contents).map_err(|e| match e {
            ManifestError::Config(msg) => ManifestError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<ToolConfig> {
        if contents.trim().is_empty() {
            return Ok(ToolConfig::default());
        }

        let config: ToolConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| ManifestError::Config(format!("Failed to parse config: {}", e)))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &ToolConfig) -> Result<()> {
        if config.package_id.trim().is_empty() {
            return Err(ManifestError::Config("package_id must not be empty".to_string()));
        }
        if config.manifest_path.as_os_str().is_empty() {
            return Err(ManifestError::Config("manifest_path must not be empty".to_string()));
        }
        if config.indent == Some(0) {
            return Err(ManifestError::Config("indent must be at least 1".to_string()));
        }
        Ok(())
    }
}
