//! Flowmeter pulse counter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts flowmeter pulses and converts them to liters.
///
/// The counter is shared between the GPIO interrupt thread, which calls
/// [`PulseCounter::on_rising_edge`], and the HTTP handlers, which read and
/// reset it. All access goes through a single atomic.
#[derive(Debug)]
pub struct PulseCounter {
    pulses: AtomicU64,
    liters_per_pulse: f64,
}

impl PulseCounter {
    /// Create a counter starting at zero.
    pub fn new(liters_per_pulse: f64) -> Self {
        Self {
            pulses: AtomicU64::new(0),
            liters_per_pulse,
        }
    }

    /// Record one rising edge on the flowmeter input.
    pub fn on_rising_edge(&self) {
        self.pulses.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of pulses seen since start or the last reset.
    pub fn count(&self) -> u64 {
        self.pulses.load(Ordering::Relaxed)
    }

    /// Liters per pulse this counter was created with.
    pub fn liters_per_pulse(&self) -> f64 {
        self.liters_per_pulse
    }

    /// Flowed volume in liters, rounded to three decimals.
    pub fn current_volume(&self) -> f64 {
        round_to_millis(self.count() as f64 * self.liters_per_pulse)
    }

    /// Set the pulse count back to zero.
    pub fn reset(&self) {
        self.pulses.store(0, Ordering::Relaxed);
    }
}

impl Default for PulseCounter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LITERS_PER_PULSE)
    }
}

fn round_to_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
