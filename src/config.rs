//! Device-level configuration shared by every component.
//!
//! A single [`PanelConfig`] is built at startup (usually from CLI flags) and
//! handed to the components that need it.

use std::path::PathBuf;
use std::time::Duration;

/// Default shared secret guarding the WiFi settings pages.
pub const DEFAULT_WIFI_PASSWORD: &str = "3333";

/// Default location of the persisted flowmeter settings.
pub const DEFAULT_FLOW_CONFIG_PATH: &str = "flowmeter_config.json";

/// Default hostapd configuration file.
pub const DEFAULT_HOSTAPD_CONF: &str = "/etc/hostapd/hostapd.conf";

/// Default BCM pin the flowmeter is wired to.
pub const DEFAULT_FLOW_GPIO_PIN: u8 = 17;

/// Default liters per flowmeter pulse.
pub const DEFAULT_LITERS_PER_PULSE: f64 = 0.0025;

/// Default upper bound for any external command, in seconds.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 10;

/// Configuration for the flowmeter and network components.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Password required before the WiFi settings page is shown
    pub wifi_password: String,
    /// JSON file holding density and magnet offset
    pub flow_config_path: PathBuf,
    /// hostapd configuration file that is read and rewritten
    pub hostapd_conf_path: PathBuf,
    /// Directory for the temporary hostapd file
    pub temp_dir: PathBuf,
    /// Client WiFi interface
    pub client_interface: String,
    /// Access-point interface
    pub ap_interface: String,
    /// systemd unit restarted after an AP change
    pub ap_service: String,
    /// Prefix for commands that need root (`None` runs them directly)
    pub privilege_command: Option<String>,
    /// BCM pin number of the flowmeter input
    pub flow_gpio_pin: u8,
    /// Liters represented by one pulse
    pub liters_per_pulse: f64,
    /// Timeout applied to every external command
    pub command_timeout: Duration,
    /// Whether `/update_ap` also requires an authenticated session
    pub require_auth_for_update_ap: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            wifi_password: DEFAULT_WIFI_PASSWORD.to_string(),
            flow_config_path: PathBuf::from(DEFAULT_FLOW_CONFIG_PATH),
            hostapd_conf_path: PathBuf::from(DEFAULT_HOSTAPD_CONF),
            temp_dir: std::env::temp_dir(),
            client_interface: "wlan0".to_string(),
            ap_interface: "wlan0_ap".to_string(),
            ap_service: "hostapd".to_string(),
            privilege_command: Some("sudo".to_string()),
            flow_gpio_pin: DEFAULT_FLOW_GPIO_PIN,
            liters_per_pulse: DEFAULT_LITERS_PER_PULSE,
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
            require_auth_for_update_ap: false,
        }
    }
}

impl PanelConfig {
    pub fn with_wifi_password(mut self, password: impl Into<String>) -> Self {
        self.wifi_password = password.into();
        self
    }

    pub fn with_flow_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.flow_config_path = path.into();
        self
    }

    pub fn with_hostapd_conf_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.hostapd_conf_path = path.into();
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn with_client_interface(mut self, interface: impl Into<String>) -> Self {
        self.client_interface = interface.into();
        self
    }

    pub fn with_ap_interface(mut self, interface: impl Into<String>) -> Self {
        self.ap_interface = interface.into();
        self
    }

    pub fn with_ap_service(mut self, service: impl Into<String>) -> Self {
        self.ap_service = service.into();
        self
    }

    /// Set the privilege prefix. An empty string disables it.
    pub fn with_privilege_command(mut self, command: Option<String>) -> Self {
        self.privilege_command = command.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_flow_gpio_pin(mut self, pin: u8) -> Self {
        self.flow_gpio_pin = pin;
        self
    }

    pub fn with_liters_per_pulse(mut self, factor: f64) -> Self {
        self.liters_per_pulse = factor;
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn with_require_auth_for_update_ap(mut self, required: bool) -> Self {
        self.require_auth_for_update_ap = required;
        self
    }
}
