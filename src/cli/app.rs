use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Add a new version entry to a VPM listing by copying the latest one
#[derive(Parser, Debug)]
#[command(name = "vpm-add-version")]
#[command(version)]
#[command(about = "Add a new version entry to a VPM listing by copying the latest one")]
#[command(
    long_about = "Duplicates the latest version entry of a package in a VPM listing, \
                  rewrites its version number and download URL for the given version, \
                  and writes the listing back (or to --output)."
)]
pub struct Cli {
    /// New version string, e.g. 0.3.2
    #[arg(value_name = "VERSION")]
    pub new_version: String,

    /// Path to the input VPM listing [default: develop/vpm-ochibi-chans-converter-tool-dev.json]
    #[arg(long, visible_alias = "manifest", value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Path to write the updated listing (defaults to the input path)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Package id whose versions are updated [default: jp.aramaa.ochibi-chans-converter-tool]
    #[arg(long, value_name = "ID")]
    pub package: Option<String>,

    /// YAML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Spaces per indentation level (detected from the input by default)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=16))]
    pub indent: Option<u16>,

    /// Print the updated listing instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Set log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}
