//! Shared application state handed to every handler.

use crate::config::PanelConfig;
use crate::flow::{FlowConfigStore, PulseCounter};
use crate::network::{AccessPointEditor, CommandRunner, NetworkInspector, SystemCommandRunner};
use crate::web::session::SessionStore;
use std::sync::Arc;

/// Components the HTTP handlers operate on.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PanelConfig>,
    pub counter: Arc<PulseCounter>,
    pub flow_store: Arc<FlowConfigStore>,
    pub inspector: Arc<NetworkInspector>,
    pub ap_editor: Arc<AccessPointEditor>,
    pub sessions: SessionStore,
}

impl AppState {
    /// Build state that talks to the real OS tools.
    pub fn new(config: PanelConfig, counter: Arc<PulseCounter>) -> Self {
        let runner = Arc::new(SystemCommandRunner::new(config.command_timeout));
        Self::with_runner(config, counter, runner)
    }

    /// Build state around a custom [`CommandRunner`].
    pub fn with_runner(
        config: PanelConfig,
        counter: Arc<PulseCounter>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            flow_store: Arc::new(FlowConfigStore::new(config.flow_config_path.clone())),
            inspector: Arc::new(NetworkInspector::from_config(runner.clone(), &config)),
            ap_editor: Arc::new(AccessPointEditor::from_config(runner, &config)),
            sessions: SessionStore::new(),
            counter,
            config: Arc::new(config),
        }
    }
}
