// Copyright (c) 2024 Mike Tsao

//! Places to put exported waveform documents.

use crate::prelude::*;
use anyhow::{anyhow, Context};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

/// Returns `<stem>.he`.
pub fn export_file_name(stem: &str) -> String {
    format!("{stem}.{}", WaveformDocument::FILE_EXTENSION)
}

/// Writes each document as a file in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
}
impl DirectorySink {
    #[allow(missing_docs)]
    pub fn new_with(directory: PathBuf) -> Self {
        Self { directory }
    }

    /// A sink pointing at the configured export directory.
    pub fn from_settings(settings: &WorkbenchSettings) -> Self {
        Self::new_with(settings.export_directory().to_path_buf())
    }

    #[allow(missing_docs)]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}
impl ExportsWaveforms for DirectorySink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> anyhow::Result<()> {
        // Names come from the analyzer, so they must not escape the directory.
        if name.is_empty() || Path::new(name).file_name() != Some(name.as_ref()) {
            return Err(anyhow!("'{name}' is not a plain file name"));
        }
        std::fs::create_dir_all(&self.directory)
            .with_context(|| format!("creating {}", self.directory.display()))?;
        let path = self.directory.join(name);
        std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Keeps documents in memory. Clones share the same storage, so a caller can
/// hand one clone to a [Workbench](crate::orchestration::Workbench) and read
/// from another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}
impl MemorySink {
    /// Returns a copy of the named file's contents.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// The names of every stored file, sorted.
    pub fn names(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
impl ExportsWaveforms for MemorySink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> anyhow::Result<()> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_get_the_he_extension() {
        assert_eq!(export_file_name("machine_gun"), "machine_gun.he");
    }

    #[test]
    fn directory_sink_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new_with(dir.path().join("nested"));
        sink.write("a.he", b"{}").unwrap();
        assert_eq!(
            std::fs::read(dir.path().join("nested").join("a.he")).unwrap(),
            b"{}"
        );

        sink.write("a.he", b"[]").unwrap();
        assert_eq!(
            std::fs::read(dir.path().join("nested").join("a.he")).unwrap(),
            b"[]",
            "a second write should replace the first"
        );
    }

    #[test]
    fn directory_sink_rejects_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new_with(dir.path().to_path_buf());
        assert!(sink.write("../escape.he", b"{}").is_err());
        assert!(sink.write("sub/dir.he", b"{}").is_err());
        assert!(sink.write("", b"{}").is_err());
    }

    #[test]
    fn directory_sink_from_settings() {
        let mut settings = WorkbenchSettings::default();
        settings.set_export_directory(PathBuf::from("/tmp/exports"));
        assert_eq!(
            DirectorySink::from_settings(&settings).directory(),
            Path::new("/tmp/exports")
        );
    }

    #[test]
    fn memory_sink_clones_share_storage() {
        let reader = MemorySink::default();
        let mut writer = reader.clone();
        writer.write("b.he", b"2").unwrap();
        writer.write("a.he", b"1").unwrap();
        assert_eq!(reader.names(), vec!["a.he", "b.he"]);
        assert_eq!(reader.get("a.he"), Some(b"1".to_vec()));
        assert_eq!(reader.get("missing.he"), None);
    }
}
