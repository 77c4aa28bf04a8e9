// In crates/strategies/src/types.rs

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Window lengths for the SMA crossover.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SmaCrossoverSettings {
    /// The short-term window (SMA(8) by default).
    #[serde(default = "default_fast_period")]
    pub fast_period: usize,
    /// The long-term window (SMA(55) by default).
    #[serde(default = "default_slow_period")]
    pub slow_period: usize,
}

impl SmaCrossoverSettings {
    pub fn validate(&self) -> Result<()> {
        if self.fast_period == 0 {
            return Err(Error::InvalidParameters("fast_period must be at least 1".into()));
        }
        if self.slow_period <= self.fast_period {
            return Err(Error::InvalidParameters(format!(
                "slow_period ({}) must be greater than fast_period ({})",
                self.slow_period, self.fast_period
            )));
        }
        Ok(())
    }

    /// The shortest series that can supply every sample the crossover takes.
    ///
    /// The fast window is also read one period back, so it needs one extra close.
    pub fn required_len(&self) -> usize {
        (self.fast_period + 1).max(self.slow_period)
    }
}

impl Default for SmaCrossoverSettings {
    fn default() -> Self {
        Self {
            fast_period: default_fast_period(),
            slow_period: default_slow_period(),
        }
    }
}

// Helper functions for serde defaults.
fn default_fast_period() -> usize { 8 }
fn default_slow_period() -> usize { 55 }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MIN_PRICE_DATA_LENGTH;

    #[test]
    fn defaults_require_min_price_data_length() {
        let settings = SmaCrossoverSettings::default();
        assert_eq!(settings.fast_period, 8);
        assert_eq!(settings.slow_period, 55);
        assert_eq!(settings.required_len(), MIN_PRICE_DATA_LENGTH);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn required_len_covers_previous_fast_window() {
        let settings = SmaCrossoverSettings { fast_period: 9, slow_period: 10 };
        assert_eq!(settings.required_len(), 10);

        let settings = SmaCrossoverSettings { fast_period: 10, slow_period: 10 };
        assert_eq!(settings.required_len(), 11);
    }

    #[test]
    fn rejects_bad_windows() {
        let zero = SmaCrossoverSettings { fast_period: 0, slow_period: 55 };
        assert!(zero.validate().is_err());

        let inverted = SmaCrossoverSettings { fast_period: 55, slow_period: 8 };
        assert_eq!(
            inverted.validate(),
            Err(Error::InvalidParameters(
                "slow_period (8) must be greater than fast_period (55)".into()
            ))
        );
    }
}
