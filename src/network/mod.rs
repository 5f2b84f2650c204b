//! Network inspection and access-point configuration.
//!
//! This module wraps the OS networking tools the panel depends on: `ip` for
//! link state and MAC addresses, `nmcli` for WiFi scans, and hostapd plus
//! systemd for the access point the device hosts.

pub mod command;
pub mod data;
pub mod hostapd;
pub mod inspector;
pub mod mac;

// Re-export commonly used items
pub use command::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use data::{ApStatus, NetworkSnapshot, UNKNOWN};
pub use hostapd::{rewrite_hostapd_config, AccessPointEditor};
pub use inspector::NetworkInspector;
pub use mac::random_locally_administered_mac;
