//! Prediksi - Main entry point

use clap::Parser;
use prediksi::cli::{cmd_analyze, cmd_info, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prediksi=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { data } => {
            cmd_info(&data)?;
        }
        Commands::Analyze {
            data,
            target,
            scaling,
            plots,
            id_column,
            seed,
            json,
        } => {
            cmd_analyze(&data, &target, &scaling, plots, &id_column, seed, json)?;
        }
    }

    Ok(())
}
