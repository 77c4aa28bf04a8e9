// In crates/strategies/src/sma_crossover.rs

use crate::types::SmaCrossoverSettings;
use crate::{Result, Signal, SmaSource};

/// The SMA crossover classifier.
///
/// Compares the fast SMA now and one period ago against the slow SMA now.
/// It holds no state between calls, so the same input always yields the same
/// signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmaCrossover {
    settings: SmaCrossoverSettings,
}

impl SmaCrossover {
    /// Creates a new `SmaCrossover` from validated settings.
    pub fn new(settings: SmaCrossoverSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &SmaCrossoverSettings {
        &self.settings
    }

    /// The series length a source must reach before `generate` may sample it.
    pub fn required_len(&self) -> usize {
        self.settings.required_len()
    }

    /// Classifies the latest crossover of the fast SMA over the slow SMA.
    ///
    /// The caller must have checked `source.is_valid()` against
    /// `required_len()`; this performs no checks of its own.
    pub fn generate<S: SmaSource + ?Sized>(&self, source: &S) -> Signal {
        let current_fast = source.sma(self.settings.fast_period, 0);
        let previous_fast = source.sma(self.settings.fast_period, 1);
        let current_slow = source.sma(self.settings.slow_period, 0);

        // Equality one period ago counts for either direction; equality now never does.
        let prev_at_or_above = previous_fast >= current_slow;
        let prev_at_or_below = previous_fast <= current_slow;
        let current_below = current_fast < current_slow;
        let current_above = current_fast > current_slow;

        let signal = if current_below && prev_at_or_above {
            Signal::Sell
        } else if current_above && prev_at_or_below {
            Signal::Buy
        } else {
            Signal::Neutral
        };

        tracing::debug!(
            current_fast,
            previous_fast,
            current_slow,
            %signal,
            "Assessed SMA crossover"
        );

        signal
    }
}

impl Default for SmaCrossover {
    fn default() -> Self {
        Self {
            settings: SmaCrossoverSettings::default(),
        }
    }
}
