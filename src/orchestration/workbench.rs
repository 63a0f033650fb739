// Copyright (c) 2024 Mike Tsao

use crate::{
    cores::{compile_waveform_with, WaveformMetadata},
    error::WorkbenchError,
    prelude::*,
    util::export_file_name,
};

/// The outcome of the most recent analysis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AnalysisStatus {
    /// Nothing has been analyzed yet.
    #[default]
    Idle,
    #[allow(missing_docs)]
    Success,
    /// The analyzer failed; the message is meant for the user.
    Error(String),
}

/// Wires an analyzer, an actuation session, and an export sink around the
/// current [VibrationConfig].
///
/// Until an analysis succeeds there is no current config, and both
/// [Workbench::preview()] and [Workbench::export()] decline to do anything.
pub struct Workbench {
    analyzer: Box<dyn AnalyzesText>,
    session: ActuationSession,
    sink: Box<dyn ExportsWaveforms>,
    settings: WorkbenchSettings,

    config: Option<VibrationConfig>,
    status: AnalysisStatus,
    debug_log: Option<String>,
}
impl core::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Workbench")
            .field("session", &self.session)
            .field("settings", &self.settings)
            .field("config", &self.config)
            .field("status", &self.status)
            .finish()
    }
}
impl Workbench {
    /// Heads the debug log's copy of the compiled document.
    pub const DEBUG_LOG_HEADER: &'static str = "[IEEE 2861.3 HE 1.0 JSON]";

    #[allow(missing_docs)]
    pub fn new_with(
        analyzer: Box<dyn AnalyzesText>,
        session: ActuationSession,
        sink: Box<dyn ExportsWaveforms>,
        settings: WorkbenchSettings,
    ) -> Self {
        Self {
            analyzer,
            session,
            sink,
            settings,
            config: None,
            status: Default::default(),
            debug_log: None,
        }
    }

    /// Asks the analyzer for a config describing `text`. Blank text is
    /// ignored.
    ///
    /// The debug log is cleared first. On success the result becomes the
    /// current config, its document is written to the debug log, and it's
    /// previewed right away. On failure the previous config stays current.
    pub fn analyze(&mut self, text: &str) -> Result<(), WorkbenchError> {
        if text.trim().is_empty() {
            log::debug!("ignoring blank analysis request");
            return Ok(());
        }
        self.debug_log = None;

        let config = match self.analyzer.analyze(text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("analysis of {} chars failed: {e:#}", text.len());
                let message = e.to_string();
                self.status = AnalysisStatus::Error(message.clone());
                return Err(WorkbenchError::AnalyzerFailure(message));
            }
        };
        log::info!(
            "analyzed as {} effect '{}'",
            config.vibration_type(),
            config.effect()
        );

        self.debug_log = match self.document_for(&config) {
            Ok(document) => match document.to_json() {
                Ok(json) => Some(format!("{}\n{json}", Self::DEBUG_LOG_HEADER)),
                Err(e) => Some(format!("[System] {e}")),
            },
            Err(e) => Some(format!("[System] {e}")),
        };
        self.status = AnalysisStatus::Success;
        self.config = Some(config);
        self.preview();
        Ok(())
    }

    /// Plays the current config's pulse train. Returns `None` if there's no
    /// current config.
    pub fn preview(&mut self) -> Option<ActuationState> {
        let config = self.config.as_ref()?;
        Some(self.session.play(config))
    }

    /// Compiles the current config and hands the document to the sink. Returns
    /// the file name it was written under, or `None` if there's no current
    /// config.
    pub fn export(&mut self) -> Result<Option<String>, WorkbenchError> {
        let Some(config) = self.config.as_ref() else {
            return Ok(None);
        };
        let document = self.document_for(config)?;
        let json = document
            .to_json()
            .map_err(|e| WorkbenchError::Export(e.into()))?;

        let stem = if config.filename().is_empty() {
            self.settings.fallback_filename()
        } else {
            config.filename()
        };
        let name = export_file_name(stem);
        self.sink
            .write(&name, json.as_bytes())
            .map_err(WorkbenchError::Export)?;
        log::info!("exported '{}' as {name}", config.effect());

        let notice = format!("[System] HE file exported ({name})");
        self.debug_log = Some(match self.debug_log.take() {
            Some(log) => format!("{log}\n\n{notice}"),
            None => notice,
        });
        Ok(Some(name))
    }

    fn document_for(&self, config: &VibrationConfig) -> Result<WaveformDocument, WorkbenchError> {
        let metadata =
            WaveformMetadata::describing(self.settings.description_prefix(), config.effect());
        Ok(compile_waveform_with(config, metadata)?)
    }

    /// The current config, if an analysis has succeeded.
    pub fn config(&self) -> Option<&VibrationConfig> {
        self.config.as_ref()
    }

    #[allow(missing_docs)]
    pub fn status(&self) -> &AnalysisStatus {
        &self.status
    }

    /// The compiled document of the last analysis, followed by any export
    /// notices.
    pub fn debug_log(&self) -> Option<&str> {
        self.debug_log.as_deref()
    }

    #[allow(missing_docs)]
    pub fn session(&self) -> &ActuationSession {
        &self.session
    }

    #[allow(missing_docs)]
    pub fn settings(&self) -> &WorkbenchSettings {
        &self.settings
    }
}
