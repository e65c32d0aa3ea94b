use std::sync::Arc;
use std::time::Duration;
use syke::{run_status_server, wait_for_signal, Config, HttpPingProbe, StatusEngine};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Default port for the status endpoint
const STATUS_PORT: u16 = 8080;

/// Resource/display name from env (default: status)
fn get_name() -> String {
    std::env::var("SYKE_NAME").unwrap_or_else(|_| "status".to_string())
}

/// Status endpoint port from env (default: 8080)
fn get_port() -> u16 {
    std::env::var("SYKE_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(STATUS_PORT)
}

/// Version string rendered into response bodies (default: none)
fn get_version() -> String {
    std::env::var("SYKE_VERSION").unwrap_or_default()
}

/// Optional URL the health probe pings (default: always healthy)
fn get_ping_url() -> Option<String> {
    std::env::var("SYKE_PING_URL").ok()
}

/// Whole-second duration from env, falling back to the given default
fn get_secs(key: &str, default_secs: u64) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(default_secs))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting syke status endpoint");

    // Hard scope: cancelled only when the process is told to exit now
    let lifetime = CancellationToken::new();

    let mut builder = Config::builder()
        .name(get_name())
        .version(get_version())
        .frequency(get_secs("SYKE_FREQUENCY_SECS", 1))
        .check_timeout(get_secs("SYKE_TIMEOUT_SECS", 10))
        .shutdown_delay(get_secs("SYKE_SHUTDOWN_DELAY_SECS", 0))
        .lifetime(lifetime.clone());

    if let Some(url) = get_ping_url() {
        info!(url = %url, "Health probe pings HTTP dependency");
        builder = builder.probe(Arc::new(HttpPingProbe::new(url)));
    }

    let engine = Arc::new(StatusEngine::new(builder.build()));

    // Polling loop
    let listen_engine = Arc::clone(&engine);
    let mut listen_handle = tokio::spawn(async move { listen_engine.listen().await });

    // Status server, torn down with the hard scope
    let port = get_port();
    let server_engine = Arc::clone(&engine);
    let server_shutdown = lifetime.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = run_status_server(port, server_engine, server_shutdown).await {
            error!(error = %e, "Status server error");
        }
    });

    let signal = wait_for_signal().await;
    info!(signal = signal, "Initiating graceful shutdown");

    // Stop health checks; the engine publishes Stopping and waits out the
    // shutdown delay while the endpoint still answers 503 to drain traffic.
    // A second signal cuts the delay short.
    engine.close();
    tokio::select! {
        result = &mut listen_handle => {
            if let Err(e) = result {
                error!(error = %e, "Listen task failed");
            }
        }
        signal = wait_for_signal() => {
            info!(signal = signal, "Second signal, cutting shutdown delay short");
            lifetime.cancel();
            if let Err(e) = listen_handle.await {
                error!(error = %e, "Listen task failed");
            }
        }
    }

    // Tear down the HTTP surface last so the Stopping state stays visible
    // through the delay.
    lifetime.cancel();
    if let Err(e) = server_handle.await {
        error!(error = %e, "Server task failed");
    }

    info!("syke shut down gracefully");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
