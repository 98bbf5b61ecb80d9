//! fabnet: bring a Hyperledger Fabric topology up on Docker.

use std::process::ExitCode;

use clap::Parser;
use fabnet_cli::{commands, Cli};
use fabnet_telemetry::{init_logging, TelemetryConfig};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &cli.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    if let Err(err) = init_logging(&telemetry) {
        eprintln!("fabnet: {err}");
        return ExitCode::FAILURE;
    }

    match commands::run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "fabnet failed");
            ExitCode::FAILURE
        }
    }
}
