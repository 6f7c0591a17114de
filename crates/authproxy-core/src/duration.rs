// crates/authproxy-core/src/duration.rs
// ============================================================================
// Module: Human Durations
// Description: Human-readable duration strings such as `1h30m` or `250ms`.
// Purpose: Decode and canonically encode durations used in connector config.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A human duration is one or more `<digits><unit>` terms with units `ms`,
//! `s`, `m`, `h`, or `d` (`^([0-9]+(ms|s|m|h|d))+$`). Values are whole
//! milliseconds held in a `u64`, so every value has an exact text form and
//! every accepted text has an exact value. Encoding is canonical and
//! largest-unit-first: `90s` decodes equal to `1m30s`.
//!
//! A [`Duration`] converts only when it is a whole number of milliseconds
//! that fits in a `u64`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Regular expression equivalent of the accepted grammar.
pub const HUMAN_DURATION_PATTERN: &str = "^([0-9]+(ms|s|m|h|d))+$";

/// Unit table ordered largest first, in milliseconds.
const UNITS: [(&str, u64); 5] =
    [("d", 86_400_000), ("h", 3_600_000), ("m", 60_000), ("s", 1_000), ("ms", 1)];

/// Milliseconds per second.
const MILLIS_PER_SEC: u64 = 1_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Human duration parse and conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// Input was empty.
    #[error("duration is empty")]
    Empty,
    /// Input did not match the duration grammar.
    #[error("invalid duration '{0}': expected terms like 30s, 5m, 1h30m, 250ms")]
    Malformed(String),
    /// Input exceeds the representable range.
    #[error("duration '{0}' is out of range")]
    Overflow(String),
    /// Duration has a sub-millisecond remainder.
    #[error("duration of {0} nanoseconds is not a whole number of milliseconds")]
    SubMillisecond(u128),
}

// ============================================================================
// SECTION: Human Duration
// ============================================================================

/// Whole-millisecond duration with a human-readable text form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HumanDuration(u64);

impl HumanDuration {
    /// Creates a duration from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Creates a duration from whole seconds.
    #[must_use]
    pub fn from_secs(secs: u32) -> Self {
        Self(u64::from(secs) * MILLIS_PER_SEC)
    }

    /// Returns the duration in milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Returns the equivalent [`Duration`].
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true when the duration is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<Duration> for HumanDuration {
    type Error = DurationError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        if value.subsec_nanos() % 1_000_000 != 0 {
            return Err(DurationError::SubMillisecond(value.as_nanos()));
        }
        u64::try_from(value.as_millis())
            .map(Self)
            .map_err(|_| DurationError::Overflow(format!("{}s", value.as_secs())))
    }
}

impl From<HumanDuration> for Duration {
    fn from(value: HumanDuration) -> Self {
        value.as_duration()
    }
}

impl FromStr for HumanDuration {
    type Err = DurationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(DurationError::Empty);
        }
        let overflow = || DurationError::Overflow(input.to_string());
        let bytes = input.as_bytes();
        let mut pos = 0;
        let mut total: u64 = 0;
        while pos < bytes.len() {
            let digits_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos == digits_start {
                return Err(DurationError::Malformed(input.to_string()));
            }
            let amount: u64 = input[digits_start .. pos].parse().map_err(|_| overflow())?;
            let (unit_len, unit_ms) =
                match_unit(&input[pos ..]).ok_or_else(|| DurationError::Malformed(input.to_string()))?;
            pos += unit_len;
            total = amount
                .checked_mul(unit_ms)
                .and_then(|term| total.checked_add(term))
                .ok_or_else(overflow)?;
        }
        Ok(Self(total))
    }
}

/// Matches the unit at the start of `rest`, returning its length and size.
fn match_unit(rest: &str) -> Option<(usize, u64)> {
    if rest.starts_with("ms") {
        return Some((2, 1));
    }
    UNITS
        .iter()
        .find(|(unit, _)| unit.len() == 1 && rest.starts_with(*unit))
        .map(|(unit, unit_ms)| (unit.len(), *unit_ms))
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut remaining = self.0;
        if remaining == 0 {
            return f.write_str("0s");
        }
        for (unit, unit_ms) in UNITS {
            let amount = remaining / unit_ms;
            if amount > 0 {
                write!(f, "{amount}{unit}")?;
                remaining %= unit_ms;
            }
        }
        Ok(())
    }
}

impl Serialize for HumanDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HumanDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
