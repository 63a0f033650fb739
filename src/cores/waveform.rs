// Copyright (c) 2024 Mike Tsao

//! The HE 1.0 waveform document and the compiler that produces it.
//!
//! The document mixes two intensity scales on purpose: event parameters are
//! integer [Level]s (0..=100), while curve points carry a [Normal] ratio
//! rounded to two decimal places. Consumers of the format expect exactly that.

use crate::{error::CompileError, prelude::*, types::round_half_up};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The `Metadata` block of a [WaveformDocument].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WaveformMetadata {
    /// Always [WaveformMetadata::FORMAT_VERSION].
    pub version: u32,
    /// Date only, serialized as `YYYY-MM-DD`.
    pub created: NaiveDate,
    #[allow(missing_docs)]
    pub description: String,
}
impl WaveformMetadata {
    /// The HE format version this crate writes.
    pub const FORMAT_VERSION: u32 = 1;
    /// Prefixed to the effect name to form the description.
    pub const DEFAULT_DESCRIPTION_PREFIX: &'static str = "Text2Vibe";

    #[allow(missing_docs)]
    pub fn new_with(created: NaiveDate, description: String) -> Self {
        Self {
            version: Self::FORMAT_VERSION,
            created,
            description,
        }
    }

    /// Metadata dated today (UTC), describing the given effect.
    pub fn describing(prefix: &str, effect: &str) -> Self {
        Self::new_with(Utc::now().date_naive(), format!("{prefix}: {effect}"))
    }
}

/// Event-level parameters of a transient event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransientParameters {
    #[allow(missing_docs)]
    pub intensity: Level,
    #[allow(missing_docs)]
    pub frequency: Level,
}

/// One sample of a continuous event's curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurvePoint {
    /// Offset from the start of the event.
    pub time: Milliseconds,
    /// A 0..=1 ratio with at most two decimal places.
    pub intensity: f64,
    /// Frequency offset relative to the event's frequency.
    pub frequency: i32,
}

/// Event-level parameters of a continuous event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContinuousParameters {
    #[allow(missing_docs)]
    pub intensity: Level,
    #[allow(missing_docs)]
    pub frequency: Level,
    #[allow(missing_docs)]
    pub curve: [CurvePoint; Envelope::POINT_COUNT],
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransientEvent {
    pub relative_time: Milliseconds,
    pub parameters: TransientParameters,
}

#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContinuousEvent {
    pub relative_time: Milliseconds,
    pub duration: Milliseconds,
    pub parameters: ContinuousParameters,
}

/// A single timed event. Transient events have no `Duration` and no `Curve`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all = "lowercase")]
pub enum HapticEvent {
    #[allow(missing_docs)]
    Transient(TransientEvent),
    #[allow(missing_docs)]
    Continuous(ContinuousEvent),
}
impl HapticEvent {
    /// When the event starts, relative to the start of the document.
    pub fn relative_time(&self) -> Milliseconds {
        match self {
            HapticEvent::Transient(e) => e.relative_time,
            HapticEvent::Continuous(e) => e.relative_time,
        }
    }

    /// The event-level (intensity, frequency) pair.
    pub fn levels(&self) -> (Level, Level) {
        match self {
            HapticEvent::Transient(e) => (e.parameters.intensity, e.parameters.frequency),
            HapticEvent::Continuous(e) => (e.parameters.intensity, e.parameters.frequency),
        }
    }

    #[allow(missing_docs)]
    pub fn vibration_type(&self) -> VibrationType {
        match self {
            HapticEvent::Transient(_) => VibrationType::Transient,
            HapticEvent::Continuous(_) => VibrationType::Continuous,
        }
    }
}

/// The format wraps each event in a single-key `{ "Event": ... }` object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PatternEntry {
    #[allow(missing_docs)]
    pub event: HapticEvent,
}

/// The durable, interchangeable description of one haptic effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WaveformDocument {
    #[allow(missing_docs)]
    pub metadata: WaveformMetadata,
    #[allow(missing_docs)]
    pub pattern: Vec<PatternEntry>,
}
impl WaveformDocument {
    /// The file extension of serialized documents.
    pub const FILE_EXTENSION: &'static str = "he";

    /// Iterates over the events, in time order.
    pub fn events(&self) -> impl Iterator<Item = &HapticEvent> {
        self.pattern.iter().map(|entry| &entry.event)
    }

    /// Pretty-printed JSON, two-space indented.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    #[allow(missing_docs)]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Compiles a config into a document dated today, with the default
/// description.
pub fn compile_waveform(config: &VibrationConfig) -> Result<WaveformDocument, CompileError> {
    compile_waveform_with(
        config,
        WaveformMetadata::describing(
            WaveformMetadata::DEFAULT_DESCRIPTION_PREFIX,
            config.effect(),
        ),
    )
}

/// Compiles a config into a document carrying the given metadata.
pub fn compile_waveform_with(
    config: &VibrationConfig,
    metadata: WaveformMetadata,
) -> Result<WaveformDocument, CompileError> {
    let envelope = match (config.vibration_type(), config.envelope()) {
        (VibrationType::Continuous, None) => {
            return Err(CompileError::MissingEnvelope {
                effect: config.effect().to_string(),
            })
        }
        (_, envelope) => envelope,
    };

    let duration = config.duration_ms();
    let step = duration.saturating_add(config.interval_ms());
    let intensity = config.intensity_level();
    let frequency = config.frequency_level();

    let mut cursor = Milliseconds::zero();
    let mut pattern = Vec::with_capacity(config.count() as usize);
    for _ in 0..config.count() {
        let event = match envelope {
            Some(envelope) if !config.is_transient() => {
                HapticEvent::Continuous(ContinuousEvent {
                    relative_time: cursor,
                    duration,
                    parameters: ContinuousParameters {
                        intensity,
                        frequency,
                        curve: sample_curve(envelope, duration),
                    },
                })
            }
            _ => HapticEvent::Transient(TransientEvent {
                relative_time: cursor,
                parameters: TransientParameters {
                    intensity,
                    frequency,
                },
            }),
        };
        pattern.push(PatternEntry { event });
        cursor = cursor.saturating_add(step);
    }
    log::debug!(
        "compiled waveform for '{}': {} {} events, {}ms apart",
        config.effect(),
        pattern.len(),
        config.vibration_type(),
        step
    );

    Ok(WaveformDocument { metadata, pattern })
}

fn sample_curve(
    envelope: &Envelope,
    duration: Milliseconds,
) -> [CurvePoint; Envelope::POINT_COUNT] {
    let offsets = envelope.frequency_offsets();
    let shape = envelope.control_points();
    let mut curve = [CurvePoint {
        time: Milliseconds::zero(),
        intensity: 0.0,
        frequency: 0,
    }; Envelope::POINT_COUNT];
    for (i, point) in curve.iter_mut().enumerate() {
        let (time, intensity) = shape[i];
        point.time = if i == Envelope::POINT_COUNT - 1 {
            duration
        } else {
            duration.scaled_by(time.0)
        };
        point.intensity = intensity.rounded_to_places(2).0;
        point.frequency = round_to_i32(offsets[i]);
    }
    curve
}

// Offsets are nominally within -100..=100; anything beyond i32 saturates.
fn round_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        0
    } else {
        round_half_up(value).clamp(i32::MIN as f64, i32::MAX as f64) as i32
    }
}
