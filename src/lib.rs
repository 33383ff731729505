pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod manifest;
pub mod updater;

pub use error::{ManifestError, Result};
pub use updater::{update, UpdateOutcome, UpdateRequest, Updater};
