//! # Flowpanel - Flowmeter and WiFi Control Panel
//!
//! A small Raspberry Pi web panel that counts pulses from a liquid flowmeter
//! and edits the access point the device hosts.
//!
//! ## Features
//!
//! - **Pulse counting**: rising edges on a GPIO pin converted to liters (feature-gated)
//! - **Flowmeter settings**: density and magnet offset persisted as JSON
//! - **Network status**: MAC address, current WiFi, visible networks, AP state
//! - **AP editing**: rewrites hostapd's SSID and passphrase behind a password
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowpanel::{start_web_server, AppState, PanelConfig, PulseCounter, WebConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PanelConfig::default();
//!     let counter = Arc::new(PulseCounter::new(config.liters_per_pulse));
//!     let state = AppState::new(config, counter);
//!
//!     start_web_server(WebConfig::default(), state).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod network;
pub mod web;

// Re-export public API
pub use config::PanelConfig;
pub use error::{PanelError, Result};
pub use flow::{DefaultPulseInput, FlowConfig, FlowConfigStore, PulseCounter, PulseInput};
pub use network::{
    random_locally_administered_mac, rewrite_hostapd_config, AccessPointEditor, ApStatus, CommandOutput, CommandRunner,
    NetworkInspector, NetworkSnapshot, SystemCommandRunner,
};
pub use web::{create_app, start_web_server, AppState, WebConfig};

/// The default web server port
pub const DEFAULT_WEB_PORT: u16 = 3333;
