// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use anyhow::{anyhow, Context};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The two kinds of haptic effect.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VibrationType {
    /// A sustained effect with a real duration and an intensity/frequency
    /// curve.
    #[default]
    Continuous,
    /// A sharp impulse with no meaningful duration.
    Transient,
}

/// The parametric description of one haptic effect. The analyzer produces it
/// in one piece; the compilers only ever read it.
///
/// Out-of-range `intensity` and `base_frequency` values are kept as given and
/// clamped when compiled.
#[derive(Clone, Debug, Default, PartialEq, Builder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[builder(default)]
pub struct VibrationConfig {
    /// Whether the effect is continuous or transient.
    vibration_type: VibrationType,

    /// For transient effects this is a logical spacing width, not a rendered
    /// pulse width.
    #[serde(rename = "durationSeconds")]
    duration: Seconds,

    /// The gap between repetitions.
    #[serde(rename = "intervalSeconds")]
    interval: Seconds,

    /// How many times the effect repeats.
    #[builder(default = "1")]
    count: u32,

    /// The effect's intensity.
    intensity: i32,

    /// The effect's base frequency.
    #[builder(default = "50")]
    base_frequency: i32,

    /// The effect's name.
    #[builder(setter(into))]
    effect: String,
    /// The output filename.
    #[builder(setter(into))]
    filename: String,
    /// The analyzer's reasoning.
    #[builder(setter(into))]
    reasoning: String,

    /// Present in every well-formed analyzer reply, but consumed only by
    /// continuous effects.
    #[builder(setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    envelope: Option<Envelope>,
}
#[allow(missing_docs)]
impl VibrationConfig {
    pub const DEFAULT_DURATION: Seconds = Seconds(0.05);
    pub const DEFAULT_INTERVAL: Seconds = Seconds(0.1);
    pub const DEFAULT_EFFECT: &'static str = "Unknown";
    pub const DEFAULT_FILENAME: &'static str = "vibration_effect";
    pub const DEFAULT_REASONING: &'static str = "No design notes";

    pub fn vibration_type(&self) -> VibrationType {
        self.vibration_type
    }

    pub fn is_transient(&self) -> bool {
        matches!(self.vibration_type, VibrationType::Transient)
    }

    pub fn duration(&self) -> Seconds {
        self.duration
    }

    pub fn interval(&self) -> Seconds {
        self.interval
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// The raw intensity, as produced.
    pub fn intensity(&self) -> i32 {
        self.intensity
    }

    /// The raw base frequency, as produced.
    pub fn base_frequency(&self) -> i32 {
        self.base_frequency
    }

    /// The intensity on the event scale.
    pub fn intensity_level(&self) -> Level {
        Level::from(self.intensity)
    }

    /// The base frequency on the event scale.
    pub fn frequency_level(&self) -> Level {
        Level::from(self.base_frequency)
    }

    pub fn effect(&self) -> &str {
        &self.effect
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn envelope(&self) -> Option<&Envelope> {
        self.envelope.as_ref()
    }

    /// The logical width of one repetition, in whole milliseconds.
    pub fn duration_ms(&self) -> Milliseconds {
        self.duration.to_millis()
    }

    /// The pause between repetitions, in whole milliseconds.
    pub fn interval_ms(&self) -> Milliseconds {
        self.interval.to_millis()
    }

    /// Parses a raw analyzer reply and fills in whatever the analyzer left
    /// out. Anything but a JSON object is rejected.
    pub fn from_analyzer_json(json: &str) -> anyhow::Result<Self> {
        let value: Value =
            serde_json::from_str(json).context("analyzer reply is not valid JSON")?;
        let Value::Object(fields) = value else {
            return Err(anyhow!("analyzer reply is not a JSON object"));
        };
        Self::from_analyzer_fields(&fields)
    }

    fn from_analyzer_fields(fields: &Map<String, Value>) -> anyhow::Result<Self> {
        let vibration_type = match fields.get("vibrationType").and_then(Value::as_str) {
            Some("transient") => VibrationType::Transient,
            _ => VibrationType::Continuous,
        };

        let envelope = match fields.get("envelope") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                serde_json::from_value::<Envelope>(v.clone())
                    .context("analyzer reply has a malformed envelope")?,
            ),
        };

        // A fractional count still runs its last partial repetition; a
        // negative one runs none.
        let count = Self::nonzero_number(fields, "count")
            .map(|c| c.ceil().clamp(0.0, u32::MAX as f64) as u32)
            .unwrap_or(1);

        Ok(Self {
            vibration_type,
            duration: Self::nonzero_number(fields, "durationSeconds")
                .map(Seconds)
                .unwrap_or(Self::DEFAULT_DURATION),
            interval: Self::nonzero_number(fields, "intervalSeconds")
                .map(Seconds)
                .unwrap_or(Self::DEFAULT_INTERVAL),
            count,
            intensity: Self::level_field(fields, "intensity"),
            base_frequency: Self::level_field(fields, "baseFrequency"),
            effect: Self::string_field(fields, "effect", Self::DEFAULT_EFFECT),
            filename: Self::string_field(fields, "filename", Self::DEFAULT_FILENAME),
            reasoning: Self::string_field(fields, "reasoning", Self::DEFAULT_REASONING),
            envelope,
        })
    }

    // Numbers may arrive as JSON numbers or as numeric strings.
    fn number(fields: &Map<String, Value>, key: &str) -> Option<f64> {
        let n = match fields.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        n.filter(|n| n.is_finite())
    }

    // Zero counts as missing.
    fn nonzero_number(fields: &Map<String, Value>, key: &str) -> Option<f64> {
        Self::number(fields, key).filter(|n| *n != 0.0)
    }

    fn level_field(fields: &Map<String, Value>, key: &str) -> i32 {
        let raw = Self::number(fields, key).unwrap_or(0.0);
        Level::from_f64(raw).value() as i32
    }

    fn string_field(fields: &Map<String, Value>, key: &str, fallback: &str) -> String {
        match fields.get(key).and_then(Value::as_str) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => fallback.to_string(),
        }
    }
}
