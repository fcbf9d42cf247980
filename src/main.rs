//! telemetry-echo: log POSTed JSON and echo its declared length.
//!
//! Binds `0.0.0.0:8095` unless a config file says otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use telemetry_echo::config::load_or_default;
use telemetry_echo::lifecycle::{signals, Shutdown};
use telemetry_echo::observability::init_logging;
use telemetry_echo::{net, EchoServer};

#[derive(Parser)]
#[command(name = "telemetry-echo")]
#[command(about = "Diagnostic server that logs POSTed JSON and echoes its Content-Length", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            eprintln!("telemetry-echo: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability)?;

    tracing::info!("telemetry-echo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.limits.max_body_bytes,
        request_timeout_secs = config.limits.request_timeout_secs,
        "Configuration loaded"
    );

    let listener = net::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signalled();
    signals::spawn_signal_handler(shutdown);

    EchoServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
