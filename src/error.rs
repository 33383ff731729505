use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Input file not found: {}.{hint}", path.display())]
    NotFound { path: PathBuf, hint: String },

    #[error("Failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected manifest structure: {0}")]
    Format(String),

    #[error("Version {version} already exists in {}.", path.display())]
    DuplicateVersion { version: String, path: PathBuf },

    #[error("Version '{version}' is invalid. {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ManifestError {
    /// Stable name of the failure kind, shown to the operator
    pub fn kind(&self) -> &'static str {
        match self {
            ManifestError::NotFound { .. } | ManifestError::Unreadable { .. } => "NotFoundError",
            ManifestError::Json { .. } | ManifestError::Format(_) => "FormatError",
            ManifestError::DuplicateVersion { .. } => "DuplicateVersionError",
            ManifestError::InvalidVersion { .. } => "InvalidVersionError",
            ManifestError::Write { .. } => "WriteError",
            ManifestError::Config(_) => "ConfigError",
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, ManifestError>;
