// Atelier
// Main entry point for the atelier binary

use atelier_engine::cli::{Cli, Command};
use atelier_engine::config::Config;
use atelier_engine::handlers::{
    handle_doctor, handle_features, handle_request, handle_run, OutputFormat,
};
use atelier_engine::telemetry::init_telemetry_with_level;
use clap::Parser;
use sdk::errors::{EngineError, ErrorExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = &result {
        if let Some(engine_error) = e.downcast_ref::<EngineError>() {
            eprintln!("hint: {}", engine_error.user_hint());
        }
    }

    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // Load configuration (or use custom path if provided)
    let config = if let Some(config_path) = &cli.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load_or_create()?
    };

    // --log wins over the config file; RUST_LOG wins over both
    let level = cli.log.as_deref().unwrap_or(&config.core.log_level);
    init_telemetry_with_level(level);

    tracing::info!("Atelier v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Features => handle_features(format),

        Command::Run {
            feature,
            text,
            style,
        } => {
            tracing::info!("Running feature: {}", feature);
            handle_run(&feature, &text, &style, &config, format).await
        }

        Command::Request {
            feature,
            text,
            style,
        } => handle_request(&feature, &text, &style, format),

        Command::Doctor => {
            tracing::info!("Running diagnostics...");
            handle_doctor(&config, format)
        }
    }
}
