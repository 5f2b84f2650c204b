//! HTTP handlers for pages and JSON endpoints.

use crate::network::NetworkSnapshot;
use crate::web::pages;
use crate::web::state::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Json, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

/// Message shown when the WiFi password is wrong.
pub const WRONG_PASSWORD_MESSAGE: &str = "Incorrect password. Try again.";

/// Dashboard form: either a counter reset or new flowmeter settings.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardForm {
    pub reset_flow: Option<String>,
    pub density: Option<String>,
    pub magnet_offset: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
}

/// New access-point credentials.
#[derive(Debug, Default, Deserialize)]
pub struct ApForm {
    #[serde(default)]
    pub ap_ssid: String,
    #[serde(default)]
    pub ap_password: String,
}

/// GET `/`
pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let (config, network) = tokio::join!(state.flow_store.load(), state.inspector.snapshot());
    Html(pages::dashboard(&config, &network, state.counter.current_volume()))
}

/// POST `/`
pub async fn update_dashboard(
    State(state): State<AppState>,
    Form(form): Form<DashboardForm>,
) -> Redirect {
    if form.reset_flow.is_some() {
        info!("Resetting flowmeter counter at {} pulses", state.counter.count());
        state.counter.reset();
    } else {
        let mut config = state.flow_store.load().await;
        config.density = form.density.unwrap_or_default();
        config.magnet_offset = form.magnet_offset.unwrap_or_default();
        if let Err(e) = state.flow_store.save(&config).await {
            warn!("Error saving flowmeter config: {}", e);
        }
    }
    Redirect::to("/")
}

/// GET `/wifi-auth`
pub async fn wifi_auth_page() -> Html<String> {
    Html(pages::wifi_auth(None))
}

/// POST `/wifi-auth`
pub async fn wifi_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<PasswordForm>,
) -> Response {
    if form.password == state.config.wifi_password {
        let jar = state.sessions.authenticate(jar).await;
        (jar, Redirect::to("/wifi-settings")).into_response()
    } else {
        warn!("Rejected WiFi settings password attempt");
        Html(pages::wifi_auth(Some(WRONG_PASSWORD_MESSAGE))).into_response()
    }
}

/// GET `/wifi-settings`
pub async fn wifi_settings_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    if !state.sessions.is_authenticated(&jar).await {
        return Redirect::to("/wifi-auth").into_response();
    }
    let network = state.inspector.snapshot().await;
    Html(pages::wifi_settings(&network)).into_response()
}

/// POST `/wifi-settings`
pub async fn update_wifi_settings(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ApForm>,
) -> Redirect {
    if !state.sessions.is_authenticated(&jar).await {
        return Redirect::to("/wifi-auth");
    }
    apply_ap_update(&state, &form).await;
    Redirect::to("/wifi-settings")
}

/// POST `/update_ap`
///
/// Older form target that skips the session check unless
/// `require_auth_for_update_ap` is set.
pub async fn update_ap(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ApForm>,
) -> Redirect {
    if state.config.require_auth_for_update_ap {
        if !state.sessions.is_authenticated(&jar).await {
            return Redirect::to("/wifi-auth");
        }
    } else {
        warn!("/update_ap called without authentication check");
    }
    apply_ap_update(&state, &form).await;
    Redirect::to("/")
}

async fn apply_ap_update(state: &AppState, form: &ApForm) -> bool {
    let ssid = form.ap_ssid.trim();
    let password = form.ap_password.trim();
    if ssid.is_empty() || password.is_empty() {
        warn!("SSID and password cannot be empty");
        return false;
    }

    let updated = state.ap_editor.update(ssid, password).await;
    if updated {
        info!("AP settings updated successfully");
    } else {
        warn!("Failed to update AP settings");
    }
    updated
}

/// GET `/network_info`
pub async fn network_info(State(state): State<AppState>) -> Json<NetworkSnapshot> {
    Json(state.inspector.snapshot().await)
}

/// GET `/get_liters`
pub async fn get_liters(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "liters": state.counter.current_volume() }))
}

/// GET `/api/health`
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "flowpanel",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "pulses": state.counter.count(),
        "sessions": state.sessions.len().await,
    }))
}
