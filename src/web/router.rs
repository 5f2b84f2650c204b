//! Web application router and middleware setup.

use crate::web::config::WebConfig;
use crate::web::handlers;
use crate::web::state::AppState;
use axum::{
    routing::{get, get_service, post},
    Router,
};
use std::path::PathBuf;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

/// Create the main axum application with all routes and middleware.
pub fn create_app(state: AppState, config: &WebConfig) -> Router {
    let mut app = Router::new()
        // Pages
        .route("/", get(handlers::dashboard).post(handlers::update_dashboard))
        .route(
            "/wifi-auth",
            get(handlers::wifi_auth_page).post(handlers::wifi_auth),
        )
        .route(
            "/wifi-settings",
            get(handlers::wifi_settings_page).post(handlers::update_wifi_settings),
        )
        .route("/update_ap", post(handlers::update_ap))
        // JSON endpoints
        .route("/network_info", get(handlers::network_info))
        .route("/get_liters", get(handlers::get_liters))
        .route("/api/health", get(handlers::health_check))
        .with_state(state);

    // Add static file serving if path is configured
    if let Some(static_path) = &config.static_path {
        let static_path = PathBuf::from(static_path);

        if static_path.exists() {
            info!("Serving static files from: {:?}", static_path);
            app = app.nest_service("/static", get_service(ServeDir::new(&static_path)));
        } else {
            tracing::warn!("Static path {:?} does not exist, not serving /static", static_path);
        }
    }

    // Add middleware layers
    let service_builder = ServiceBuilder::new().layer(TraceLayer::new_for_http());

    // Add CORS if enabled
    if config.enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app.layer(service_builder)
}
