// Copyright (c) 2024 Mike Tsao

//! Wall-clock time, in the two resolutions the compilers care about.

use super::round_half_up;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Represents the [seconds](https://en.wikipedia.org/wiki/Second) unit of time.
/// Configs describe timing in seconds.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Seconds(pub f64);
impl Seconds {
    /// Zero seconds.
    pub const fn zero() -> Seconds {
        Seconds(0.0)
    }

    /// Converts to whole milliseconds, rounding half up. Negative and NaN
    /// durations don't exist on an actuator, so they become zero.
    pub fn to_millis(&self) -> Milliseconds {
        Milliseconds::from_f64(self.0 * 1000.0)
    }
}

/// Whole milliseconds. Everything that leaves the compilers (pulse widths,
/// event offsets, curve times) is expressed in this unit.
#[derive(Synonym, Serialize, Deserialize)]
pub struct Milliseconds(pub u32);
#[allow(missing_docs)]
impl Milliseconds {
    pub const fn zero() -> Self {
        Self(0)
    }

    fn from_f64(ms: f64) -> Self {
        let ms = round_half_up(ms);
        if ms.is_nan() || ms <= 0.0 {
            Self::zero()
        } else {
            Self(ms.min(u32::MAX as f64) as u32)
        }
    }

    /// Scales this span by a ratio and rounds the result half up.
    pub fn scaled_by(&self, ratio: f64) -> Self {
        Self::from_f64(self.0 as f64 * ratio)
    }

    pub fn saturating_add(&self, rhs: Milliseconds) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    pub fn as_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.0 as u64)
    }
}
