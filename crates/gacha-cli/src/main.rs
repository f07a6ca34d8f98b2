mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use gacha_core::config::AppConfig;
use gacha_core::error::GachaError;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("gacha: {e}");
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = logging::init(&config);

    match commands::run(cli, config).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig, GachaError> {
    match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}
