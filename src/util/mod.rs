// Copyright (c) 2024 Mike Tsao

//! System utilities.

/// Commonly used imports.
pub mod prelude {
    pub use super::{DirectorySink, MemorySink, WorkbenchSettings};
}

pub use export::{export_file_name, DirectorySink, MemorySink};
pub use settings::WorkbenchSettings;

mod export;
mod settings;
