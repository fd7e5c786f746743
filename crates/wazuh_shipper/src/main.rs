use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use jumpcloud::{JumpCloudClient, JumpCloudClientOptions};
use wazuh_shipper::{run_once, ConfigFile, FileSink, RunOutcome, ShipperError};

#[derive(Debug, Parser)]
#[command(name = "wazuh_shipper")]
#[command(about = "Ships JumpCloud Directory Insights events into a Wazuh-ingested log file")]
struct Cli {
    /// Path to the JSON config file holding the API key, optional base URL
    /// and org id, and the polling cursor.
    config: PathBuf,

    /// Path to the append-only log file read by the Wazuh agent.
    log: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(RunOutcome::NoEvents) => {
            info!("no new events; cursor left untouched");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Shipped {
            written,
            failed,
            next_cursor,
        }) => {
            info!(written, failed, %next_cursor, "run complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("run failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunOutcome, ShipperError> {
    let mut config = ConfigFile::load(&cli.config)?;
    let client = JumpCloudClient::new(JumpCloudClientOptions {
        api_key: config.api_key.clone(),
        base_url: config.base_url.clone(),
        org_id: config.org_id.clone(),
    })?;
    let mut sink = FileSink::open(&cli.log)
        .await
        .map_err(|source| ShipperError::OpenSink {
            path: cli.log.clone(),
            source,
        })?;

    run_once(&client, &mut config, &mut sink).await
}
