// In crates/core-types/src/period.rs

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A candle interval supported by the upstream ticker API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    FourHours,
    OneDay,
}

impl Period {
    pub const ALL: [Period; 8] = [
        Period::OneMinute,
        Period::FiveMinutes,
        Period::FifteenMinutes,
        Period::ThirtyMinutes,
        Period::OneHour,
        Period::TwoHours,
        Period::FourHours,
        Period::OneDay,
    ];

    /// The wire token for this interval (e.g. `"30m"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneMinute => "1m",
            Period::FiveMinutes => "5m",
            Period::FifteenMinutes => "15m",
            Period::ThirtyMinutes => "30m",
            Period::OneHour => "1h",
            Period::TwoHours => "2h",
            Period::FourHours => "4h",
            Period::OneDay => "1d",
        }
    }

    /// The length of a single candle.
    pub fn duration(&self) -> Duration {
        const MINUTE: u64 = 60;
        const HOUR: u64 = 60 * MINUTE;

        let secs = match self {
            Period::OneMinute => MINUTE,
            Period::FiveMinutes => 5 * MINUTE,
            Period::FifteenMinutes => 15 * MINUTE,
            Period::ThirtyMinutes => 30 * MINUTE,
            Period::OneHour => HOUR,
            Period::TwoHours => 2 * HOUR,
            Period::FourHours => 4 * HOUR,
            Period::OneDay => 24 * HOUR,
        };
        Duration::from_secs(secs)
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::InvalidPeriod(s.to_string()))
    }
}

impl TryFrom<String> for Period {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.as_str().to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
