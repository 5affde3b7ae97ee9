use clap::Parser;

use courier_rs::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;

    tracing::debug!(
        name = %settings.application.name,
        version = %settings.application.version,
        "Starting"
    );

    execute_command(&cli, settings).await?;

    Ok(())
}
