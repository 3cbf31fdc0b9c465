//! Agent discovery daemon.
//!
//! Usage:
//!
//! ```text
//! portolan [--interval <secs>] [--consul-addr <addr>] [--docker-host <addr>] [--once]
//! ```
//!
//! Every `interval` seconds the daemon lists the local Docker containers,
//! identifies the agent protocol each one speaks, and registers the agents
//! with the Consul agent at `CONSUL_HTTP_ADDR`. Run `portolan --help` for
//! the full list of flags and their environment variables.

use clap::Parser;
use portolan::config::{Cli, DaemonConfig};
use portolan::daemon::HttpDaemon;
use portolan::telemetry;
use tokio::runtime::Builder;
use tracing::{error, info};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    let config = DaemonConfig::from_cli(Cli::parse())?;
    telemetry::init_tracing()?;

    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run(config))
}

async fn run(config: DaemonConfig) -> Result<(), BoxError> {
    info!(
        docker = %config.docker_url,
        consul = %config.consul_url,
        interval_secs = config.interval.as_secs(),
        "starting agent discovery"
    );
    let daemon = HttpDaemon::connect(&config)?;

    if config.once {
        let outcome = daemon.run_round().await?;
        info!(
            discovered = outcome.round.len(),
            registered = outcome.sync.registered.len(),
            failed = outcome.sync.failed.len(),
            "single round complete"
        );
        return Ok(());
    }

    daemon.run(shutdown_signal()).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "cannot listen for shutdown signal; running until killed");
        std::future::pending::<()>().await;
    }
}
