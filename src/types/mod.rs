// Copyright (c) 2024 Mike Tsao

//! Common data types used throughout the system.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{CrossbeamChannel, Level, Milliseconds, Normal, Seconds};
}

pub use {
    channels::CrossbeamChannel,
    ranges::{round_half_up, Level, Normal, RangedF64},
    time::{Milliseconds, Seconds},
};

mod channels;
mod ranges;
mod time;
