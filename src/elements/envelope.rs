// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// The first or last control point of an [Envelope]. Its intensity is pinned
/// to zero, so only the frequency offset is free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeEndpoint {
    /// Relative frequency shift, nominally -100..=100.
    pub frequency_offset: f64,
}
impl EnvelopeEndpoint {
    #[allow(missing_docs)]
    pub fn new_with(frequency_offset: f64) -> Self {
        Self { frequency_offset }
    }
}

/// One of the two interior control points of an [Envelope].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopePoint {
    /// Position within the cycle, 0.0..=1.0.
    pub time_ratio: f64,
    /// Intensity relative to the event's own intensity, 0.0..=1.0.
    pub intensity_ratio: f64,
    /// Relative frequency shift, nominally -100..=100.
    pub frequency_offset: f64,
}
impl EnvelopePoint {
    #[allow(missing_docs)]
    pub fn new_with(time_ratio: f64, intensity_ratio: f64, frequency_offset: f64) -> Self {
        Self {
            time_ratio,
            intensity_ratio,
            frequency_offset,
        }
    }
}

/// Describes how intensity and frequency evolve across one cycle of a
/// continuous effect. The curve is sampled at `0`, `p2.time_ratio`,
/// `p3.time_ratio` and `1` of the cycle's duration. Both ends fade to zero
/// intensity.
///
/// Nothing checks that `p2.time_ratio <= p3.time_ratio`. A curve that doubles
/// back on itself is carried through as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Builder, Serialize, Deserialize)]
#[builder(default)]
pub struct Envelope {
    /// Start of the cycle.
    pub p1: EnvelopeEndpoint,
    /// First shape point.
    pub p2: EnvelopePoint,
    /// Second shape point.
    pub p3: EnvelopePoint,
    /// End of the cycle.
    pub p4: EnvelopeEndpoint,
}
impl EnvelopeBuilder {
    /// A gentle swell that peaks early and tails off. Handy in tests.
    pub fn swell() -> Self {
        Self {
            p1: Some(EnvelopeEndpoint::default()),
            p2: Some(EnvelopePoint::new_with(0.2, 0.8, 10.0)),
            p3: Some(EnvelopePoint::new_with(0.8, 0.6, -10.0)),
            p4: Some(EnvelopeEndpoint::default()),
        }
    }
}
impl Envelope {
    /// The number of control points in every envelope.
    pub const POINT_COUNT: usize = 4;

    /// Returns the (time, intensity) shape of the curve, both normalized.
    pub fn control_points(&self) -> [(Normal, Normal); Self::POINT_COUNT] {
        [
            (Normal::zero(), Normal::zero()),
            (
                Normal::new(self.p2.time_ratio),
                Normal::new(self.p2.intensity_ratio),
            ),
            (
                Normal::new(self.p3.time_ratio),
                Normal::new(self.p3.intensity_ratio),
            ),
            (Normal::maximum(), Normal::zero()),
        ]
    }

    /// Returns the frequency offsets of the four control points, in order.
    pub fn frequency_offsets(&self) -> [f64; Self::POINT_COUNT] {
        [
            self.p1.frequency_offset,
            self.p2.frequency_offset,
            self.p3.frequency_offset,
            self.p4.frequency_offset,
        ]
    }

    /// Evaluates the piecewise-linear intensity curve at the given position in
    /// the cycle. Segments that run backward in time or have zero width are
    /// skipped, so the first forward segment containing `position` wins.
    pub fn intensity_at(&self, position: Normal) -> Normal {
        let t = position.0;
        let points = self.control_points();
        for pair in points.windows(2) {
            let (start_time, start_level) = pair[0];
            let (end_time, end_level) = pair[1];
            let width = end_time.0 - start_time.0;
            if width <= 0.0 {
                continue;
            }
            if t >= start_time.0 && t <= end_time.0 {
                let progress = (t - start_time.0) / width;
                return Normal::new(start_level.0 + (end_level.0 - start_level.0) * progress);
            }
        }
        Normal::zero()
    }
}
