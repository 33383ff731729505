//! VPM listing model: parsing, version precedence and record derivation

pub mod document;
pub mod format;
pub mod version;

pub use document::{derive_record, Manifest, Template, VersionList};
pub use format::{to_pretty_string, Indent};
pub use version::Version;
