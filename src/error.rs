//! Error handling for the flowpanel crate.

/// A specialized `Result` type for flowpanel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

/// The main error type for flowpanel operations.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// External command failed to start, timed out or exited non-zero
    #[error("Command `{program}` failed: {message}")]
    Command { program: String, message: String },

    /// GPIO operation failed
    #[error("GPIO error: {0}")]
    Gpio(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A written file did not contain what was written
    #[error("Verification failed: {0}")]
    Verification(String),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),
}

impl PanelError {
    /// Create a new command error
    pub fn command_error(program: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Command {
            program: program.into(),
            message: msg.into(),
        }
    }

    /// Create a new GPIO error
    pub fn gpio_error(msg: impl Into<String>) -> Self {
        Self::Gpio(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new verification error
    pub fn verification_error(msg: impl Into<String>) -> Self {
        Self::Verification(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }
}
