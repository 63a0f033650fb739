// Copyright (c) 2024 Mike Tsao

//! The two compilers. Both are pure functions of a [VibrationConfig]: one
//! produces a [PulseTrain] for immediate preview, and the other produces a
//! [WaveformDocument] for storage and interchange. Neither knows about the
//! other.
//!
//! [VibrationConfig]: crate::elements::VibrationConfig

/// The most commonly used imports.
pub mod prelude {
    pub use super::{compile_pulse_train, compile_waveform, PulseTrain, WaveformDocument};
}

pub use pulse_train::{compile_pulse_train, PulseTrain};
pub use waveform::{
    compile_waveform, compile_waveform_with, ContinuousEvent, ContinuousParameters, CurvePoint,
    HapticEvent, PatternEntry, TransientEvent, TransientParameters, WaveformDocument,
    WaveformMetadata,
};

mod pulse_train;
mod waveform;
