// Copyright (c) 2024 Mike Tsao

//! Persistent settings for a [Workbench](crate::orchestration::Workbench).

use crate::{cores::WaveformMetadata, prelude::*};
use anyhow::Context;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contains persistent workbench settings.
#[derive(Debug, Clone, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct WorkbenchSettings {
    /// Used as the export name when the config doesn't carry one.
    #[derivative(Default(value = "Self::DEFAULT_FALLBACK_FILENAME.to_string()"))]
    fallback_filename: String,

    /// Where [DirectorySink](crate::util::DirectorySink) writes documents.
    #[derivative(Default(value = "PathBuf::from(\".\")"))]
    export_directory: PathBuf,

    /// Prefixed to the effect name in the document description.
    #[derivative(Default(
        value = "WaveformMetadata::DEFAULT_DESCRIPTION_PREFIX.to_string()"
    ))]
    description_prefix: String,

    #[serde(skip)]
    has_been_saved: bool,
}
impl HasSettings for WorkbenchSettings {
    fn has_been_saved(&self) -> bool {
        self.has_been_saved
    }

    fn needs_save(&mut self) {
        self.has_been_saved = false;
    }

    fn mark_clean(&mut self) {
        self.has_been_saved = true;
    }
}
#[allow(missing_docs)]
impl WorkbenchSettings {
    pub const DEFAULT_FALLBACK_FILENAME: &'static str = "haptic_effect";

    pub fn fallback_filename(&self) -> &str {
        &self.fallback_filename
    }

    /// Updates the field and marks the struct eligible to save.
    pub fn set_fallback_filename(&mut self, name: &str) {
        if name != self.fallback_filename {
            self.fallback_filename = name.to_string();
            self.needs_save();
        }
    }

    pub fn export_directory(&self) -> &Path {
        &self.export_directory
    }

    /// Updates the field and marks the struct eligible to save.
    pub fn set_export_directory(&mut self, directory: PathBuf) {
        if directory != self.export_directory {
            self.export_directory = directory;
            self.needs_save();
        }
    }

    pub fn description_prefix(&self) -> &str {
        &self.description_prefix
    }

    /// Updates the field and marks the struct eligible to save.
    pub fn set_description_prefix(&mut self, prefix: &str) {
        if prefix != self.description_prefix {
            self.description_prefix = prefix.to_string();
            self.needs_save();
        }
    }

    /// Reads settings from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let mut settings: Self = serde_json::from_str(&json)?;
        settings.mark_clean();
        Ok(settings)
    }

    /// Writes settings to a JSON file.
    pub fn save(&mut self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        self.mark_clean();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = WorkbenchSettings::default();
        assert_eq!(s.fallback_filename(), "haptic_effect");
        assert_eq!(s.export_directory(), Path::new("."));
        assert_eq!(s.description_prefix(), "Text2Vibe");
        assert!(!s.has_been_saved());
    }

    #[test]
    fn setters_mark_dirty_only_on_change() {
        let mut s = WorkbenchSettings::default();
        s.mark_clean();
        s.set_fallback_filename("haptic_effect");
        assert!(s.has_been_saved(), "an identical value isn't a change");
        s.set_description_prefix("Buzz");
        assert!(!s.has_been_saved());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut s = WorkbenchSettings::default();
        s.set_export_directory(dir.path().to_path_buf());
        s.set_fallback_filename("untitled");
        s.save(&path).unwrap();
        assert!(s.has_been_saved());

        let loaded = WorkbenchSettings::load(&path).unwrap();
        assert_eq!(loaded.export_directory(), dir.path());
        assert_eq!(loaded.fallback_filename(), "untitled");
        assert!(loaded.has_been_saved());
    }

    #[test]
    fn partial_file_takes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"description-prefix": "Lab"}"#).unwrap();

        let loaded = WorkbenchSettings::load(&path).unwrap();
        assert_eq!(loaded.description_prefix(), "Lab");
        assert_eq!(loaded.fallback_filename(), "haptic_effect");
    }
}
