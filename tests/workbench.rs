// Copyright (c) 2024 Mike Tsao

use std::time::Duration;
use text2vibe::{error::WorkbenchError, orchestration::SessionEvent, prelude::*};
use text2vibe_services::prelude::*;

/// Answers with canned analyzer replies, keyed by the text it's given.
struct CannedAnalyzer;
impl AnalyzesText for CannedAnalyzer {
    fn analyze(&mut self, text: &str) -> anyhow::Result<VibrationConfig> {
        match text {
            // Built directly, so the filename stays empty.
            "heartbeat" => Ok(VibrationConfigBuilder::default()
                .vibration_type(VibrationType::Transient)
                .duration(Seconds(0.05))
                .interval(Seconds(0.03))
                .count(2)
                .intensity(80)
                .base_frequency(30)
                .effect("heartbeat")
                .reasoning("two quick thumps")
                .build()?),
            "ocean" => VibrationConfig::from_analyzer_json(
                r#"{"vibrationType": "continuous", "durationSeconds": 0.1,
                    "intervalSeconds": 0.05, "count": 2, "intensity": 40,
                    "baseFrequency": 20, "effect": "ocean waves", "filename": "ocean",
                    "envelope": {
                        "p1": {"frequencyOffset": -5},
                        "p2": {"timeRatio": 0.4, "intensityRatio": 1.0, "frequencyOffset": 0},
                        "p3": {"timeRatio": 0.6, "intensityRatio": 0.9, "frequencyOffset": 0},
                        "p4": {"frequencyOffset": 5}}}"#,
            ),
            _ => Err(anyhow::anyhow!("analysis failed, check the network connection")),
        }
    }
}

const WAIT: Duration = Duration::from_secs(2);

#[test]
fn analyze_preview_export() {
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    {
        let mut settings = WorkbenchSettings::default();
        settings.set_export_directory(dir.path().join("out"));
        settings.set_fallback_filename("untitled");
        settings.save(&settings_path).unwrap();
    }
    let settings = WorkbenchSettings::load(&settings_path).unwrap();

    let actuator = ActuatorService::default();
    let mut workbench = Workbench::new_with(
        Box::new(CannedAnalyzer),
        ActuationSession::new_with(Some(Box::new(actuator.clone()))),
        Box::new(DirectorySink::from_settings(&settings)),
        settings,
    );
    assert!(workbench.preview().is_none());
    assert!(matches!(workbench.export(), Ok(None)));

    // A successful analysis plays immediately.
    workbench.analyze("heartbeat").unwrap();
    assert_eq!(
        workbench.session().events().recv_timeout(WAIT),
        Ok(SessionEvent::Driving {
            total: Milliseconds(70)
        })
    );
    assert_eq!(
        workbench.session().events().recv_timeout(WAIT),
        Ok(SessionEvent::Idle)
    );
    let mut heard = Vec::new();
    while let Ok(event) = actuator.receiver().recv_timeout(WAIT) {
        let finished = event == ActuatorServiceEvent::Finished;
        heard.push(event);
        if finished {
            break;
        }
    }
    assert_eq!(
        heard,
        vec![
            ActuatorServiceEvent::Stopped,
            ActuatorServiceEvent::Driving(vec![20, 30, 20]),
            ActuatorServiceEvent::Finished,
        ]
    );

    // An empty filename falls back to the configured one.
    assert_eq!(workbench.export().unwrap(), Some("untitled.he".to_string()));
    let written = std::fs::read_to_string(dir.path().join("out").join("untitled.he")).unwrap();
    let document = WaveformDocument::from_json(&written).unwrap();
    let times: Vec<u32> = document.events().map(|e| e.relative_time().0).collect();
    assert_eq!(times, vec![0, 80]);

    // A failed analysis leaves the heartbeat in place.
    let e = workbench.analyze("static").unwrap_err();
    assert!(matches!(e, WorkbenchError::AnalyzerFailure(_)));
    assert_eq!(workbench.config().map(|c| c.effect()), Some("heartbeat"));
    assert_eq!(
        workbench.status(),
        &AnalysisStatus::Error("analysis failed, check the network connection".to_string())
    );

    workbench.analyze("ocean").unwrap();
    assert_eq!(workbench.status(), &AnalysisStatus::Success);
    assert_eq!(workbench.export().unwrap(), Some("ocean.he".to_string()));
    let written = std::fs::read_to_string(dir.path().join("out").join("ocean.he")).unwrap();
    let document = WaveformDocument::from_json(&written).unwrap();
    assert_eq!(document.metadata.description, "Text2Vibe: ocean waves");
    assert_eq!(document.events().count(), 2);
    assert!(workbench
        .debug_log()
        .unwrap()
        .ends_with("[System] HE file exported (ocean.he)"));

    actuator.send_input(ActuatorServiceInput::Quit);
}

#[test]
fn no_actuator_still_exports() {
    let sink = MemorySink::default();
    let mut workbench = Workbench::new_with(
        Box::new(CannedAnalyzer),
        ActuationSession::default(),
        Box::new(sink.clone()),
        WorkbenchSettings::default(),
    );
    workbench.analyze("ocean").unwrap();
    assert_eq!(workbench.preview(), Some(ActuationState::Idle));
    assert_eq!(workbench.export().unwrap(), Some("ocean.he".to_string()));
    assert_eq!(sink.names(), vec!["ocean.he"]);
}
