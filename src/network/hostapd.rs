//! Access-point configuration editing.

use crate::config::PanelConfig;
use crate::error::{PanelError, Result};
use crate::network::command::{CommandOutput, CommandRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

const SSID_KEY: &str = "ssid=";
const PASSPHRASE_KEY: &str = "wpa_passphrase=";

/// Rewrites the SSID and passphrase in hostapd's config and restarts the service.
pub struct AccessPointEditor {
    runner: Arc<dyn CommandRunner>,
    conf_path: PathBuf,
    temp_dir: PathBuf,
    service: String,
    privilege_command: Option<String>,
    lock: Mutex<()>,
}

impl AccessPointEditor {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        conf_path: impl Into<PathBuf>,
        temp_dir: impl Into<PathBuf>,
        service: impl Into<String>,
        privilege_command: Option<String>,
    ) -> Self {
        Self {
            runner,
            conf_path: conf_path.into(),
            temp_dir: temp_dir.into(),
            service: service.into(),
            privilege_command,
            lock: Mutex::new(()),
        }
    }

    pub fn from_config(runner: Arc<dyn CommandRunner>, config: &PanelConfig) -> Self {
        Self::new(
            runner,
            config.hostapd_conf_path.clone(),
            config.temp_dir.clone(),
            config.ap_service.clone(),
            config.privilege_command.clone(),
        )
    }

    pub fn conf_path(&self) -> &Path {
        &self.conf_path
    }

    /// Apply a new SSID and passphrase.
    ///
    /// Returns `true` only when the file was replaced, the new values were read
    /// back, and the service restarted cleanly. Failures are logged.
    pub async fn update(&self, ssid: &str, passphrase: &str) -> bool {
        if let Err(e) = validate_value("SSID", ssid).and(validate_value("passphrase", passphrase)) {
            warn!("Refusing AP update: {}", e);
            return false;
        }

        let _guard = self.lock.lock().await;
        match self.try_update(ssid, passphrase).await {
            Ok(()) => {
                info!(
                    "Updated {:?} with SSID '{}' and restarted {}",
                    self.conf_path, ssid, self.service
                );
                true
            }
            Err(e) => {
                error!("Failed to update {:?}: {}", self.conf_path, e);
                false
            }
        }
    }

    async fn try_update(&self, ssid: &str, passphrase: &str) -> Result<()> {
        let content = tokio::fs::read_to_string(&self.conf_path).await?;
        let rewritten = rewrite_hostapd_config(&content, ssid, passphrase);

        // Removed on drop, whichever way this function exits.
        let temp_path = tempfile::Builder::new()
            .prefix("hostapd_")
            .suffix(".conf")
            .tempfile_in(&self.temp_dir)?
            .into_temp_path();
        tokio::fs::write(&temp_path, rewritten).await?;

        let from = temp_path.to_string_lossy().into_owned();
        let to = self.conf_path.to_string_lossy().into_owned();
        let moved = self.run_privileged("mv", &[from.as_str(), to.as_str()]).await?;
        if !moved.success() {
            return Err(PanelError::command_error(
                "mv",
                format!("could not replace {}: {}", to, moved.stderr.trim()),
            ));
        }

        let written = tokio::fs::read_to_string(&self.conf_path).await?;
        if !written.contains(&format!("{}{}", SSID_KEY, ssid))
            || !written.contains(&format!("{}{}", PASSPHRASE_KEY, passphrase))
        {
            return Err(PanelError::verification_error(format!(
                "new values not present in {}",
                to
            )));
        }

        let restarted = self
            .run_privileged("systemctl", &["restart", self.service.as_str()])
            .await?;
        if !restarted.success() {
            return Err(PanelError::command_error(
                "systemctl",
                format!("restart {} failed: {}", self.service, restarted.stderr.trim()),
            ));
        }

        Ok(())
    }

    async fn run_privileged(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        match &self.privilege_command {
            Some(prefix) => {
                let mut full = Vec::with_capacity(args.len() + 1);
                full.push(program);
                full.extend_from_slice(args);
                self.runner.run(prefix, &full).await
            }
            None => self.runner.run(program, args).await,
        }
    }
}

fn validate_value(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PanelError::config_error(format!("{} must not be empty", name)));
    }
    if value.contains(['\n', '\r']) {
        return Err(PanelError::config_error(format!(
            "{} must not contain line breaks",
            name
        )));
    }
    Ok(())
}

/// Replace the `ssid=` and `wpa_passphrase=` lines, keeping everything else as is.
pub fn rewrite_hostapd_config(content: &str, ssid: &str, passphrase: &str) -> String {
    let mut out = String::with_capacity(content.len() + ssid.len() + passphrase.len());
    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches(['\r', '\n']);
        let ending = &line[body.len()..];
        if body.starts_with(SSID_KEY) {
            out.push_str(SSID_KEY);
            out.push_str(ssid);
            out.push_str(ending);
        } else if body.starts_with(PASSPHRASE_KEY) {
            out.push_str(PASSPHRASE_KEY);
            out.push_str(passphrase);
            out.push_str(ending);
        } else {
            out.push_str(line);
        }
    }
    out
}
