// Copyright (c) 2024 Mike Tsao

//! The value objects that describe a haptic effect. They are produced whole by
//! the analyzer and read by everything else.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        Envelope, EnvelopeBuilder, EnvelopeEndpoint, EnvelopePoint, VibrationConfig,
        VibrationConfigBuilder, VibrationType,
    };
}

pub use config::{VibrationConfig, VibrationConfigBuilder, VibrationType};
pub use envelope::{Envelope, EnvelopeBuilder, EnvelopeEndpoint, EnvelopePoint};

mod config;
mod envelope;
