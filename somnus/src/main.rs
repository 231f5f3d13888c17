// somnus/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use somnus_core::infrastructure::config::load_pipeline_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug somnus run ... to see the details. Logs go to stderr so
    // stdout stays the user-facing report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_dir = cli.project_dir;

    // Defaults -> somnus.yaml -> SOMNUS_* env; flags are applied per command
    let config = load_pipeline_config(&project_dir)?;
    debug!(project_dir = %project_dir.display(), ?config, "Configuration loaded");

    match cli.command {
        Commands::Download {
            input_path,
            output_path,
        } => commands::download::execute(&config, input_path, output_path).await?,

        Commands::Clean { source, dest, seed } => {
            commands::clean::execute(&project_dir, &config, source, dest, seed)?
        }

        Commands::Eda {
            input_file,
            output_dir,
        } => commands::eda::execute(&project_dir, &config, input_file, output_dir)?,

        Commands::Model {
            input_file,
            output_prefix,
        } => commands::model::execute(&project_dir, &config, input_file, output_prefix)?,

        Commands::Run { input_path } => {
            commands::run::execute(&project_dir, &config, input_path).await?
        }
    }

    Ok(())
}
