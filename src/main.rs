use clap::Parser;
use vpm_add_version::{
    cli::commands::{add_version::AddVersionCommand, CommandHandler},
    cli::Cli,
    logging,
};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level.to_filter_directive());

    let command = AddVersionCommand::from(cli);
    if let Err(error) = command.execute() {
        tracing::debug!("{} failed: {:?}", command.name(), error);
        eprintln!("Error: {}: {}", error.kind(), error);
        std::process::exit(error.exit_code());
    }
}
