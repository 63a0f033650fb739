// Copyright (c) 2024 Mike Tsao

//! Stateful coordination: the single actuation session, and the workbench
//! that wires analysis, preview, and export around the current config.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{ActuationSession, ActuationState, AnalysisStatus, Workbench};
}

pub use session::{ActuationSession, ActuationState, SessionEvent};
pub use workbench::{AnalysisStatus, Workbench};

mod session;
mod workbench;
