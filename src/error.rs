// Copyright (c) 2024 Mike Tsao

//! Failures that callers are expected to handle.

use thiserror::Error;

/// The waveform exporter's only failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A continuous effect was handed over without its envelope. The exporter
    /// refuses to invent a curve shape.
    #[error("continuous effect '{effect}' has no envelope")]
    MissingEnvelope {
        #[allow(missing_docs)]
        effect: String,
    },
}

/// Failures surfaced by [Workbench](crate::orchestration::Workbench).
#[derive(Debug, Error)]
pub enum WorkbenchError {
    /// The analyzer didn't return usable data. The message is meant for the
    /// user. Whatever config was current before is still current.
    #[error("analysis failed: {0}")]
    AnalyzerFailure(String),

    #[allow(missing_docs)]
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The export sink refused the document.
    #[error("export failed: {0}")]
    Export(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = CompileError::MissingEnvelope {
            effect: "wind".into(),
        };
        assert_eq!(e.to_string(), "continuous effect 'wind' has no envelope");

        let w = WorkbenchError::from(e.clone());
        assert_eq!(w.to_string(), e.to_string());

        let w = WorkbenchError::AnalyzerFailure("network unreachable".into());
        assert!(w.to_string().contains("network unreachable"));

        let w = WorkbenchError::Export(anyhow::anyhow!("disk full"));
        assert_eq!(w.to_string(), "export failed: disk full");
    }
}
