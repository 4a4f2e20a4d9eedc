use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod probe;
mod server_time;
mod valkey_client;

use config::ProbeConfig;
use error::ErrorKind;
use probe::Probe;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── 1. Read the endpoint ─────────────────────────────────────
    let config = ProbeConfig::from_env();

    // ── 2. Connect ───────────────────────────────────────────────
    let conn = match valkey_client::connect(&config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(valkey_addr = %config.addr, error = %e, "Creating Valkey client failed");
            return;
        }
    };

    // ── 3. Ping, then poll TIME until something breaks ───────────
    let mut probe = Probe::new(conn, config.poll_interval);

    if let Err(e) = probe.run(shutdown_signal()).await {
        match e.kind() {
            ErrorKind::Handshake => error!(error = %e, "Ping failed"),
            ErrorKind::Query => error!(error = %e, "Getting time from valkey failed"),
            ErrorKind::Connection => {
                error!(valkey_addr = %config.addr, error = %e, "Valkey connection failed")
            }
        }
    }

    // `probe` drops here, closing the connection on every exit path,
    // Ctrl-C included.
}

/// Resolves on Ctrl-C. If the handler cannot be installed the probe
/// simply runs until it hits an error.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl-C"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await
        }
    }
}
