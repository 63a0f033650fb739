// Copyright (c) 2024 Mike Tsao

use core::fmt::Display;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// An f64 held within `LOWER..=UPPER`. Out-of-range values are clamped
/// silently whenever one is made.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RangedF64<const LOWER: i8, const UPPER: i8>(pub f64);
#[allow(missing_docs)]
impl<const LOWER: i8, const UPPER: i8> RangedF64<LOWER, UPPER> {
    /// The highest valid value.
    pub const MAX: f64 = UPPER as f64;
    /// The lowest valid value.
    pub const MIN: f64 = LOWER as f64;
    /// A zero value.
    pub const ZERO: f64 = 0.0;

    pub fn new(value: f64) -> Self {
        Self(Self::clamped(value))
    }
    pub const fn maximum() -> Self {
        Self(Self::MAX)
    }
    pub const fn minimum() -> Self {
        Self(Self::MIN)
    }
    pub const fn zero() -> Self {
        Self(Self::ZERO)
    }
    /// Returns the value rounded to the given number of decimal places. The
    /// exact decimal value of the f64 is what gets rounded, so 0.015 (really
    /// 0.01499...) goes down. Exact midpoints such as 0.125 go up. The result
    /// is clamped again, so it never leaves the range.
    pub fn rounded_to_places(&self, places: u8) -> Self {
        Decimal::from_f64_retain(self.0)
            .map(|d| {
                d.round_dp_with_strategy(places as u32, RoundingStrategy::MidpointAwayFromZero)
            })
            .and_then(|d| d.to_f64())
            .map(Self::new)
            .unwrap_or(*self)
    }

    // NaN has no place in a range, so it collapses to the lower bound.
    fn clamped(value: f64) -> f64 {
        if value.is_nan() {
            Self::MIN
        } else {
            value.clamp(Self::MIN, Self::MAX)
        }
    }
}
impl<const LOWER: i8, const UPPER: i8> Display for RangedF64<LOWER, UPPER> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("{}", self.0))
    }
}
impl<const LOWER: i8, const UPPER: i8> From<f64> for RangedF64<LOWER, UPPER> {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// A [Normal] is a RangedF64 whose range is [0.0, 1.0]. Envelope time and
/// intensity ratios live here.
pub type Normal = RangedF64<0, 1>;
impl Default for Normal {
    fn default() -> Self {
        Self(0.0)
    }
}

/// A [Level] is an integer percentage in [0, 100]. Event-level intensity and
/// frequency use this scale; 50 is the actuator's resonant center when the
/// [Level] describes a frequency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(u8);
impl Level {
    /// The highest valid value.
    pub const MAX: u8 = 100;
    /// The resonant center of the frequency scale.
    pub const CENTER: Level = Level(50);

    /// Clamps any integer into range.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }

    /// Rounds (half up) and clamps a real value into range.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Self(0)
        } else {
            Self::new(round_half_up(value.clamp(i64::MIN as f64, i64::MAX as f64)) as i64)
        }
    }

    #[allow(missing_docs)]
    pub fn value(&self) -> u8 {
        self.0
    }
}
impl Display for Level {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("{}", self.0))
    }
}
impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Self::new(value as i64)
    }
}

/// Rounds to the nearest integer, with halves going toward positive infinity.
/// -10.5 becomes -10, not -11 as [f64::round()] would have it. Every rounding
/// that ends up in an exported document goes through here.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
