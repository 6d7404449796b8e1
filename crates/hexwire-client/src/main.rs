//! hexwire client binary.
//!
//! - Loads `hexwire.yaml` (or the path given as the first argument)
//! - Connects to the configured game server and logs every inbound event
//! - Closes gracefully on Ctrl-C

use tracing_subscriber::{fmt, EnvFilter};

use hexwire_core::error::{HexwireError, Result};
use hexwire_client::{app_state, config};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hexwire.yaml".to_string());
    let cfg = config::load_from_file(&path)?;

    let app = app_state::ClientApp::new(cfg);
    app.start();

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| HexwireError::Internal(format!("ctrl-c handler failed: {e}")))?;

    tracing::info!("shutting down");
    app.shutdown();
    // Give the session task a moment to complete the close handshake.
    tokio::time::sleep(std::time::Duration::from_millis(250)).await;
    Ok(())
}
