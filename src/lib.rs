// Copyright (c) 2024 Mike Tsao

#![deny(missing_docs, unused_imports, unused_variables)]
#![allow(rustdoc::private_intra_doc_links)]

//! Text2Vibe turns a parametric description of a haptic effect into something
//! a vibration motor can play.
//!
//! A [VibrationConfig](elements::VibrationConfig) describes one effect: its
//! kind, timing, repetition, intensity, frequency, and (for continuous
//! effects) an [Envelope](elements::Envelope). From a config, this crate
//! produces two things.
//!
//! * A [PulseTrain](cores::PulseTrain), an on/off pattern of millisecond
//! durations for previewing the effect on an actuator right away. See
//! [compile_pulse_train()](cores::compile_pulse_train).
//! * A [WaveformDocument](cores::WaveformDocument), the event-based HE 1.0
//! JSON representation for storage and interchange. See
//! [compile_waveform()](cores::compile_waveform).
//!
//! An [ActuationSession](orchestration::ActuationSession) plays pulse trains
//! one at a time, and a [Workbench](orchestration::Workbench) ties analysis,
//! preview, and export together.

/// A collection of imports that are useful to users of this crate. `use
/// text2vibe::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::{
        cores::prelude::*, elements::prelude::*, orchestration::prelude::*,
        traits::prelude::*, types::prelude::*, util::prelude::*,
    };
}

pub use {
    cores::{compile_pulse_train, compile_waveform},
    orchestration::Workbench,
};

pub mod cores;
pub mod elements;
pub mod error;
pub mod orchestration;
pub mod traits;
pub mod types;
pub mod util;
