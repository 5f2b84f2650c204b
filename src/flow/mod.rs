//! Flowmeter pulse counting and settings persistence.

pub mod counter;
pub mod gpio;
pub mod store;

// Re-export commonly used items
pub use counter::PulseCounter;
pub use gpio::{DefaultPulseInput, PulseInput};
pub use store::{FlowConfig, FlowConfigStore};
