mod cli;
mod commands;
mod config;

use std::sync::Arc;

use adapters::stacks::StacksClient;
use clap::Parser;
use common::logger::{LogFormat, TraceId, init_logger, root_span};
use tracing::{Instrument, debug};

use cli::Cli;
use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::from_env().with_overrides(&cli);

    init_logger(
        "swapview",
        if cfg.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
    );
    debug!(api = %cfg.api_url, deployer = %cfg.swap_deployer, network = ?cfg.network, "config loaded");

    let client = Arc::new(StacksClient::new(cfg.client_config())?);
    let trace_id = TraceId::new();
    let span = root_span(cli.command.name(), &trace_id);

    commands::run(cli.command, client, &cfg).instrument(span).await
}
