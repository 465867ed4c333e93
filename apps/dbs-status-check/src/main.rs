use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dbs_update_service::{StatusCheckResult, UpdateService, UpdateServiceConfig};
use serde::Serialize;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<Vec<PathBuf>>,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, default_value = "info")]
    trace_level: String,

    #[arg(long)]
    trace_json: bool,

    certificate_id: String,
    surname: String,
    date_of_birth: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusCheckOutput {
    #[serde(flatten)]
    result: StatusCheckResult,
    is_current: bool,
    is_clear: bool,
}

impl From<StatusCheckResult> for StatusCheckOutput {
    fn from(result: StatusCheckResult) -> Self {
        Self {
            is_current: result.is_current(),
            is_clear: result.is_clear(),
            result,
        }
    }
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();

    initialize_tracing(&cli.trace_level, cli.trace_json);

    let mut config_files = cli.config.take().unwrap_or_default();
    config_files.insert(0, "config/config.yml".into());

    let config = match UpdateServiceConfig::from_files(&config_files) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "Failed creating config");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(%error, "Failed to start runtime");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(run(cli, config))
}

async fn run(cli: Cli, config: UpdateServiceConfig) -> ExitCode {
    let result = match UpdateService::from_config(config) {
        Ok(service) => {
            service
                .get_certificate_status(&cli.certificate_id, &cli.surname, cli.date_of_birth)
                .await
        }
        Err(error) => Err(error),
    };

    let result = match result {
        Ok(result) => result,
        Err(error) => {
            let code = error.error_code();
            tracing::error!(?code, reason = code.msg(), "Status check failed: {error}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&StatusCheckOutput::from(result)) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "Failed to serialize result");
            ExitCode::FAILURE
        }
    }
}

fn initialize_tracing(trace_level: &str, trace_json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(trace_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let tracing_layer = tracing_subscriber::registry().with(filter);

    // stdout carries the result
    if trace_json {
        tracing_layer
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_layer
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    };
}
