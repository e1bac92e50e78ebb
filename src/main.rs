//! # order-relay
//!
//! Reads an employee order document, runs the relay pipeline and prints the
//! outcome as JSON on stdout: the provider's receipt on success, an
//! [`ErrorReport`] (with a non-zero exit code) on failure.

use clap::Parser;
use order_relay::clients::SubmitError;
use order_relay::lifecycle::{
    read_input, setup_tracing, Config, ErrorReport, OrderPipeline, PipelineError,
};
use order_relay::mapping::RecordPolicy;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Submit employee lunch orders to the provider in one bulk request.
///
/// API settings come from the environment (BASE_API_URL, CLIENT_API_KEY,
/// MAX_RETRIES, ...); the flags below take precedence.
#[derive(Parser, Debug)]
#[command(name = "order-relay", version)]
struct Cli {
    /// Employee order document.
    #[arg(env = "EMPLOYEE_ORDERS_PATH", default_value = "data/employee_orders.xml")]
    input: PathBuf,

    /// Build and print the batch without submitting it.
    #[arg(long)]
    dry_run: bool,

    /// Provider base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Local menu snapshot used when the live menu is unavailable.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// What to do with an employee whose order cannot be mapped: abort or skip.
    #[arg(long)]
    policy: Option<RecordPolicy>,

    /// Leave out employees whose IsAttending is false.
    #[arg(long)]
    skip_absent: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let report = ErrorReport::from(&e);
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{json}"),
                Err(_) => println!("{e}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, PipelineError> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(snapshot) = cli.snapshot {
        config.snapshot_path = snapshot;
    }
    if let Some(policy) = cli.policy {
        config.record_policy = policy;
    }
    config.skip_absent |= cli.skip_absent;

    let pipeline = OrderPipeline::from_config(&config)?;

    if cli.dry_run {
        let raw = read_input(&cli.input).await?;
        let prepared = pipeline.prepare(&raw).await?;
        info!(
            source = %prepared.menu_source,
            orders = prepared.build.batch.len(),
            skipped = prepared.build.skipped.len(),
            "Dry run, nothing submitted"
        );
        return render(&prepared.build.batch);
    }

    let receipt = pipeline.run_file(&cli.input).await?;
    render(&receipt)
}

fn render<T: Serialize>(value: &T) -> Result<String, PipelineError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PipelineError::Submit(SubmitError::Encode(e.to_string())))
}
