//! Data structures for network state.

use serde::{Deserialize, Serialize};

/// Placeholder reported when a value could not be determined.
pub const UNKNOWN: &str = "Unknown";

/// Access-point link state and configured network name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApStatus {
    /// Whether the AP interface is in state UP
    pub active: bool,
    /// `ssid=` value from the hostapd config, empty when unknown or inactive
    pub ssid: String,
}

impl ApStatus {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn active(ssid: impl Into<String>) -> Self {
        Self {
            active: true,
            ssid: ssid.into(),
        }
    }
}

/// Everything the dashboard shows about the network, gathered per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// MAC address of the client interface
    pub current_mac: String,
    /// SSID the client interface is associated with
    pub current_ssid: String,
    /// Visible SSIDs, sorted and without duplicates
    pub available_networks: Vec<String>,
    /// Whether the access point is up
    pub ap_status: bool,
    /// SSID the access point is configured with
    pub ap_ssid: String,
}

impl NetworkSnapshot {
    pub fn new(
        current_mac: String,
        current_ssid: String,
        available_networks: Vec<String>,
        ap: ApStatus,
    ) -> Self {
        Self {
            current_mac,
            current_ssid,
            available_networks,
            ap_status: ap.active,
            ap_ssid: ap.ssid,
        }
    }
}

impl Default for NetworkSnapshot {
    fn default() -> Self {
        Self {
            current_mac: UNKNOWN.to_string(),
            current_ssid: UNKNOWN.to_string(),
            available_networks: Vec::new(),
            ap_status: false,
            ap_ssid: String::new(),
        }
    }
}
