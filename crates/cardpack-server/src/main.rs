//! # Cardpack
//!
//! Command-line entry point for the draw engine.
//!
//! ```text
//! cardpack draw <PACK_ID>
//! cardpack history <PACK_ID> [--limit N]
//! cardpack odds <PACK_ID>
//! ```
//!
//! Results are written to stdout as JSON. Failures are written as an error
//! body and exit non-zero.

use cardpack_config::ConfigLoader;
use cardpack_core::{CardpackResult, ErrorResponse};
use cardpack_server::app::AppBuilder;
use cardpack_server::cli::Cli;
use cardpack_server::startup::{init_observability, log_startup_info};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.error_code(), "Command failed: {}", e);
            print_json(&ErrorResponse::from_error(&e), cli.pretty);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> CardpackResult<()> {
    let config = ConfigLoader::new(&cli.config_dir)?.get().await;

    init_observability(&config)?;
    log_startup_info(&config);

    let app = AppBuilder::new().with_config(config).build().await?;
    let mut events = if cli.events {
        app.subscribe_events()
    } else {
        None
    };

    let result = app.execute(&cli.command).await;

    if let Some(rx) = events.as_mut() {
        while let Ok(envelope) = rx.try_recv() {
            match serde_json::to_string(&envelope) {
                Ok(line) => eprintln!("{}", line),
                Err(e) => error!("Failed to encode event: {}", e),
            }
        }
    }

    app.shutdown().await;

    print_json(&result?, cli.pretty);
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    match encoded {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to encode output: {}", e),
    }
}
