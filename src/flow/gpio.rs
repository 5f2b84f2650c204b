//! GPIO binding for the flowmeter input pin.
//!
//! The real implementation uses `rppal` interrupts and is feature-gated so the
//! crate still builds on machines without Raspberry Pi GPIO. Without the
//! `gpio` feature the default provider refuses to start.

use crate::error::{PanelError, Result};
use crate::flow::counter::PulseCounter;
use std::sync::Arc;

/// A live connection between an input pin and a [`PulseCounter`].
///
/// Dropping the value detaches the interrupt.
pub trait PulseInput {
    /// BCM number of the monitored pin.
    fn pin(&self) -> u8;
}

#[cfg(feature = "gpio")]
mod raspberry_pi {
    use super::*;
    use rppal::gpio::{Gpio, InputPin, Level, Trigger};

    /// Rising-edge pulse input backed by rppal.
    pub struct RaspberryPiPulseInput {
        // Holding the pin keeps the interrupt thread alive.
        _input: InputPin,
        pin: u8,
    }

    impl RaspberryPiPulseInput {
        /// Configure `pin` as a pulled-down input and count rising edges into `counter`.
        pub fn attach(pin: u8, counter: Arc<PulseCounter>) -> Result<Self> {
            let gpio = Gpio::new().map_err(|e| {
                PanelError::gpio_error(format!("Failed to initialize GPIO: {}", e))
            })?;

            let mut input = gpio
                .get(pin)
                .map_err(|e| PanelError::gpio_error(format!("Failed to access pin {}: {}", pin, e)))?
                .into_input_pulldown();

            input
                .set_async_interrupt(Trigger::RisingEdge, move |level: Level| {
                    if level == Level::High {
                        counter.on_rising_edge();
                    }
                })
                .map_err(|e| {
                    PanelError::gpio_error(format!(
                        "Failed to register interrupt on pin {}: {}",
                        pin, e
                    ))
                })?;

            tracing::info!("Counting rising edges on GPIO {}", pin);

            Ok(Self { _input: input, pin })
        }
    }

    impl PulseInput for RaspberryPiPulseInput {
        fn pin(&self) -> u8 {
            self.pin
        }
    }
}

#[cfg(not(feature = "gpio"))]
mod mock {
    use super::*;

    /// Placeholder used when the crate is built without GPIO support.
    pub struct MockPulseInput {
        pin: u8,
    }

    impl MockPulseInput {
        pub fn attach(pin: u8, _counter: Arc<PulseCounter>) -> Result<Self> {
            Err(PanelError::gpio_error(format!(
                "GPIO not available on this build (attempted to attach pin {})",
                pin
            )))
        }
    }

    impl PulseInput for MockPulseInput {
        fn pin(&self) -> u8 {
            self.pin
        }
    }
}

// Re-export the appropriate pulse input
#[cfg(feature = "gpio")]
pub use raspberry_pi::RaspberryPiPulseInput as DefaultPulseInput;

#[cfg(not(feature = "gpio"))]
pub use mock::MockPulseInput as DefaultPulseInput;

#[cfg(test)]
mod tests {
    #[cfg(not(feature = "gpio"))]
    #[test]
    fn test_mock_pulse_input_refuses_to_attach() {
        use super::*;

        let counter = Arc::new(PulseCounter::default());
        let result = DefaultPulseInput::attach(17, counter);
        match result {
            Err(PanelError::Gpio(msg)) => assert!(msg.contains("pin 17")),
            _ => panic!("mock input must fail to attach"),
        }
    }
}
