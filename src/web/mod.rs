//! Web server for the flowmeter dashboard and WiFi settings.
//!
//! Pages are rendered on the server; `/get_liters` and `/network_info`
//! return JSON for scripts and the dashboard's live liters display.

pub mod config;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod session;
pub mod state;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::create_app;
pub use session::SessionStore;
pub use state::AppState;

use crate::error::{PanelError, Result};
use tracing::info;

/// Start the web server with the provided configuration and state.
pub async fn start_web_server(config: WebConfig, state: AppState) -> Result<()> {
    let app = create_app(state, &config);

    let addr = config.socket_addr()?;

    info!("Starting flowpanel web server on http://{}", addr);
    info!("Dashboard available at http://{}/", addr);
    info!("Liters endpoint: http://{}/get_liters", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PanelError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| PanelError::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}
