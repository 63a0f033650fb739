// Copyright (c) 2024 Mike Tsao

//! The traits at the edges of the system: the actuator, the analyzer, the
//! export sink, and the plumbing shared by channel-based services.

use crate::prelude::*;
use crossbeam::channel::{Receiver, Sender};

/// Quick import of all important traits.
pub mod prelude {
    pub use super::{AnalyzesText, ExportsWaveforms, HasSettings, ProvidesService, Vibrates};
}

/// A vibration actuator, physical or simulated.
///
/// `drive()` starts playing an alternating on/off pattern of millisecond
/// durations, beginning with "on". The call returns immediately; the actuator
/// plays the pattern on its own. `stop()` silences it at once.
pub trait Vibrates: Send + core::fmt::Debug {
    #[allow(missing_docs)]
    fn drive(&mut self, pattern: &[u32]);
    #[allow(missing_docs)]
    fn stop(&mut self);
}

/// Turns free text into a [VibrationConfig]. Implementations are usually
/// remote services. An `Err` means no usable config came back, and its message
/// is shown to the user.
pub trait AnalyzesText {
    #[allow(missing_docs)]
    fn analyze(&mut self, text: &str) -> anyhow::Result<VibrationConfig>;
}

/// Somewhere to put exported documents: a named byte stream.
pub trait ExportsWaveforms {
    /// Stores `bytes` under `name`, replacing anything already there.
    fn write(&mut self, name: &str, bytes: &[u8]) -> anyhow::Result<()>;
}

/// Each app should have a Settings struct that is composed of subsystems having
/// their own settings. Implementing [HasSettings] helps the composed struct
/// manage its parts.
pub trait HasSettings {
    /// Whether the current state of this struct has been saved to disk.
    fn has_been_saved(&self) -> bool;
    /// Call this whenever the struct changes.
    fn needs_save(&mut self);
    /// Call this after a load() or a save().
    fn mark_clean(&mut self);
}

/// Service methods.
///
/// A service is something that usually runs in its own thread as a daemon and
/// that communicates with clients by crossbeam channels. It accepts Inputs and
/// produces Events.
pub trait ProvidesService<I: core::fmt::Debug, E: core::fmt::Debug> {
    /// The sender side of the Input channel. Use this to send commands to the
    /// service.
    fn sender(&self) -> &Sender<I>;

    /// A convenience method to send Inputs to the service.
    fn send_input(&self, input: I) {
        if let Err(e) = self.sender().try_send(input) {
            log::warn!("While sending: {e:?}");
        }
    }

    /// The receiver side of the Event channel. Integrate this into a listener
    /// loop to respond to events.
    fn receiver(&self) -> &Receiver<E>;
}
