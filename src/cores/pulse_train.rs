// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// An alternating on/off sequence of millisecond durations for an actuator,
/// always beginning and ending with an "on" segment.
///
/// This is a coarse stand-in for the real waveform: it ignores the envelope
/// entirely.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PulseTrain {
    pattern: Vec<u32>,
    total: Milliseconds,
}
impl PulseTrain {
    /// How long a transient click keeps the actuator on, regardless of the
    /// effect's logical duration.
    pub const TRANSIENT_CLICK: Milliseconds = Milliseconds(20);

    /// The on/off durations, in milliseconds.
    pub fn pattern(&self) -> &[u32] {
        &self.pattern
    }

    /// The sum of [PulseTrain::pattern()]: how long the actuator stays busy.
    pub fn total(&self) -> Milliseconds {
        self.total
    }

    /// The on-segments only.
    pub fn pulses(&self) -> impl Iterator<Item = u32> + '_ {
        self.pattern.iter().step_by(2).copied()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

/// Turns a config into the pulse train used for immediate preview.
pub fn compile_pulse_train(config: &VibrationConfig) -> PulseTrain {
    let on = if config.is_transient() {
        PulseTrain::TRANSIENT_CLICK
    } else {
        config.duration_ms()
    };
    let off = config.interval_ms();

    let count = config.count() as usize;
    let mut pattern = Vec::with_capacity((count * 2).saturating_sub(1));
    for i in 0..count {
        if i > 0 {
            pattern.push(off.0);
        }
        pattern.push(on.0);
    }
    let total = Milliseconds(
        pattern
            .iter()
            .fold(0u32, |sum, segment| sum.saturating_add(*segment)),
    );
    log::debug!(
        "compiled {} pulse train for '{}': {} segments, {}ms",
        config.vibration_type(),
        config.effect(),
        pattern.len(),
        total
    );

    PulseTrain { pattern, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transient(duration: f64, interval: f64, count: u32) -> VibrationConfig {
        VibrationConfigBuilder::default()
            .vibration_type(VibrationType::Transient)
            .duration(Seconds(duration))
            .interval(Seconds(interval))
            .count(count)
            .intensity(95)
            .base_frequency(70)
            .build()
            .unwrap()
    }

    fn continuous(duration: f64, interval: f64, count: u32) -> VibrationConfig {
        VibrationConfigBuilder::default()
            .vibration_type(VibrationType::Continuous)
            .duration(Seconds(duration))
            .interval(Seconds(interval))
            .count(count)
            .build()
            .unwrap()
    }

    #[test]
    fn transient_clicks_are_fixed_width() {
        let train = compile_pulse_train(&transient(0.05, 0.1, 3));
        assert_eq!(train.pattern(), &[20, 100, 20, 100, 20]);
        assert_eq!(train.total(), Milliseconds(260));

        let wide = compile_pulse_train(&transient(1.5, 0.1, 3));
        assert_eq!(
            wide.pattern(),
            train.pattern(),
            "a transient's logical width shouldn't change what the actuator plays"
        );
    }

    #[test]
    fn continuous_pulses_follow_duration() {
        let train = compile_pulse_train(&continuous(0.25, 0.05, 2));
        assert_eq!(train.pattern(), &[250, 50, 250]);
        assert_eq!(train.total(), Milliseconds(550));
        assert_eq!(train.pulses().collect::<Vec<_>>(), vec![250, 250]);
    }

    #[test]
    fn single_repetition_has_no_trailing_pause() {
        let train = compile_pulse_train(&continuous(2.0, 0.5, 1));
        assert_eq!(train.pattern(), &[2000]);
        assert_eq!(train.total(), Milliseconds(2000));
    }

    #[test]
    fn widths_are_rounded() {
        let train = compile_pulse_train(&continuous(0.0125, 0.0334, 2));
        assert_eq!(train.pattern(), &[13, 33, 13]);
    }

    #[test]
    fn total_is_always_the_sum() {
        for count in 1..=12 {
            for (d, i) in [(0.05, 0.1), (0.3, 0.0), (1.234, 0.567)] {
                for config in [transient(d, i, count), continuous(d, i, count)] {
                    let train = compile_pulse_train(&config);
                    assert_eq!(train.pattern().len(), count as usize * 2 - 1);
                    assert_eq!(
                        train.pattern().iter().sum::<u32>(),
                        train.total().0,
                        "total should equal the sum of the pattern"
                    );
                }
            }
        }
    }

    #[test]
    fn zero_count_is_empty() {
        let train = compile_pulse_train(&continuous(1.0, 1.0, 0));
        assert!(train.is_empty());
        assert_eq!(train.total(), Milliseconds::zero());
    }

    #[test]
    fn envelope_is_ignored() {
        let plain = continuous(0.5, 0.1, 2);
        let shaped = VibrationConfigBuilder::default()
            .duration(Seconds(0.5))
            .interval(Seconds(0.1))
            .count(2)
            .envelope(EnvelopeBuilder::swell().build().unwrap())
            .build()
            .unwrap();
        assert_eq!(compile_pulse_train(&plain), compile_pulse_train(&shaped));
    }
}
