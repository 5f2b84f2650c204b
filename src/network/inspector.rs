//! Read-only network state queries.
//!
//! Each query shells out to a standard tool and degrades to a sentinel value
//! when the tool is missing, fails, or prints something unexpected.

use crate::config::PanelConfig;
use crate::network::command::CommandRunner;
use crate::network::data::{ApStatus, NetworkSnapshot, UNKNOWN};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

lazy_static! {
    static ref LINK_ETHER: Regex =
        Regex::new(r"link/ether\s+((?:[0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2})").unwrap();
}

/// Queries `ip` and `nmcli` for the state shown on the dashboard.
pub struct NetworkInspector {
    runner: Arc<dyn CommandRunner>,
    client_interface: String,
    ap_interface: String,
    hostapd_conf_path: PathBuf,
}

impl NetworkInspector {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        client_interface: impl Into<String>,
        ap_interface: impl Into<String>,
        hostapd_conf_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            client_interface: client_interface.into(),
            ap_interface: ap_interface.into(),
            hostapd_conf_path: hostapd_conf_path.into(),
        }
    }

    pub fn from_config(runner: Arc<dyn CommandRunner>, config: &PanelConfig) -> Self {
        Self::new(
            runner,
            config.client_interface.clone(),
            config.ap_interface.clone(),
            config.hostapd_conf_path.clone(),
        )
    }

    /// MAC address of `interface`, or `"Unknown"`.
    pub async fn current_mac(&self, interface: &str) -> String {
        match self.runner.stdout_of("ip", &["link", "show", interface]).await {
            Ok(output) => parse_mac(&output).unwrap_or_else(|| {
                warn!("Could not parse MAC address for interface {}", interface);
                UNKNOWN.to_string()
            }),
            Err(e) => {
                warn!("Error retrieving MAC for {}: {}", interface, e);
                UNKNOWN.to_string()
            }
        }
    }

    /// SSID of the active WiFi connection, or `"Unknown"`.
    pub async fn current_ssid(&self) -> String {
        match self
            .runner
            .stdout_of("nmcli", &["-t", "-f", "ACTIVE,SSID", "dev", "wifi"])
            .await
        {
            Ok(output) => parse_active_ssid(&output).unwrap_or_else(|| UNKNOWN.to_string()),
            Err(e) => {
                warn!("Error getting current SSID: {}", e);
                UNKNOWN.to_string()
            }
        }
    }

    /// Visible SSIDs, sorted and deduplicated. Empty on failure.
    pub async fn available_networks(&self) -> Vec<String> {
        match self
            .runner
            .stdout_of("nmcli", &["-t", "-f", "SSID", "dev", "wifi"])
            .await
        {
            Ok(output) => parse_ssid_list(&output),
            Err(e) => {
                warn!("Error getting available networks: {}", e);
                Vec::new()
            }
        }
    }

    /// Whether the AP interface is up, and the SSID hostapd is configured with.
    pub async fn ap_status(&self) -> ApStatus {
        let output = match self
            .runner
            .stdout_of("ip", &["addr", "show", self.ap_interface.as_str()])
            .await
        {
            Ok(output) => output,
            Err(e) => {
                warn!("Error checking {} status: {}", self.ap_interface, e);
                return ApStatus::inactive();
            }
        };

        if !is_link_up(&output) {
            return ApStatus::inactive();
        }

        match tokio::fs::read_to_string(&self.hostapd_conf_path).await {
            Ok(content) => ApStatus::active(parse_hostapd_ssid(&content).unwrap_or_default()),
            Err(e) => {
                warn!("Error reading hostapd config {:?}: {}", self.hostapd_conf_path, e);
                ApStatus::active("")
            }
        }
    }

    /// Run every query concurrently.
    pub async fn snapshot(&self) -> NetworkSnapshot {
        let (current_mac, current_ssid, available_networks, ap) = tokio::join!(
            self.current_mac(&self.client_interface),
            self.current_ssid(),
            self.available_networks(),
            self.ap_status(),
        );
        NetworkSnapshot::new(current_mac, current_ssid, available_networks, ap)
    }

    pub fn client_interface(&self) -> &str {
        &self.client_interface
    }
}

/// Extract the address following `link/ether` in `ip link show` output.
pub fn parse_mac(output: &str) -> Option<String> {
    LINK_ETHER
        .captures(output)
        .map(|caps| caps[1].to_ascii_lowercase())
}

/// Find the SSID of the row marked `yes` in `nmcli -t -f ACTIVE,SSID` output.
pub fn parse_active_ssid(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (active, ssid) = line.split_once(':')?;
        (active == "yes").then(|| unescape_terse(ssid))
    })
}

/// Non-blank SSIDs from `nmcli -t -f SSID` output, sorted and deduplicated.
pub fn parse_ssid_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether `ip addr show` output reports the link as UP.
pub fn is_link_up(output: &str) -> bool {
    output.contains("state UP")
}

/// Value of the first `ssid=` line of a hostapd config.
pub fn parse_hostapd_ssid(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("ssid="))
        .map(|value| value.trim().to_string())
}

// nmcli terse mode escapes ':' and '\' inside values.
fn unescape_terse(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}
