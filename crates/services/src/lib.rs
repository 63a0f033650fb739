// Copyright (c) 2024 Mike Tsao

//! Services that wrap haptic hardware, or pretend to, behind crossbeam
//! channels.

#![deny(missing_docs)]

/// The most commonly used imports.
pub mod prelude {
    pub use super::{ActuatorService, ActuatorServiceEvent, ActuatorServiceInput};
}

pub use actuator::{ActuatorService, ActuatorServiceEvent, ActuatorServiceInput};

mod actuator;
