use super::CommandHandler;
use crate::cli::Cli;
use crate::config::{ConfigLoader, ToolConfig};
use crate::updater::{UpdateOutcome, UpdateRequest, Updater};
use crate::Result;
use std::io::Write;
use std::path::PathBuf;

/// Handler for adding a version to a listing
#[derive(Debug, Clone)]
pub struct AddVersionCommand {
    pub new_version: String,
    pub path: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub package: Option<String>,
    pub config_path: Option<PathBuf>,
    pub indent: Option<usize>,
    pub dry_run: bool,
}

impl CommandHandler for AddVersionCommand {
    fn execute(&self) -> Result<()> {
        let outcome = self.run()?;

        if outcome.written {
            println!(
                "Added version {} based on {} to {}.",
                outcome.new_version,
                outcome.template_version,
                outcome.output_path.display()
            );
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(outcome.document.as_bytes()).map_err(|e| {
                crate::ManifestError::Write {
                    path: PathBuf::from("<stdout>"),
                    source: e,
                }
            })?;
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "add-version"
    }
}

impl From<Cli> for AddVersionCommand {
    fn from(cli: Cli) -> Self {
        Self {
            new_version: cli.new_version,
            path: cli.path,
            output: cli.output,
            package: cli.package,
            config_path: cli.config,
            indent: cli.indent.map(usize::from),
            dry_run: cli.dry_run,
        }
    }
}

impl AddVersionCommand {
    pub fn new(new_version: impl Into<String>) -> Self {
        Self {
            new_version: new_version.into(),
            path: None,
            output: None,
            package: None,
            config_path: None,
            indent: None,
            dry_run: false,
        }
    }

    /// Configuration from defaults, the optional config file and flags
    pub fn resolve_config(&self) -> Result<ToolConfig> {
        let base = match &self.config_path {
            Some(path) => ConfigLoader::load_file(path)?,
            None => ToolConfig::default(),
        };
        Ok(base.with_overrides(self.package.clone(), self.path.clone(), self.indent))
    }

    /// Perform the update without printing anything
    pub fn run(&self) -> Result<UpdateOutcome> {
        let config = self.resolve_config()?;
        tracing::debug!(
            "Running {} for package {} on {}",
            self.name(),
            config.package_id,
            config.manifest_path.display()
        );

        let mut request = UpdateRequest::new(config.manifest_path.clone(), self.new_version.clone())
            .with_dry_run(self.dry_run);
        if let Some(output) = &self.output {
            request = request.with_output(output.clone());
        }

        Updater::new(config).update(&request)
    }
}
