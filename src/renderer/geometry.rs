//! Wheel geometry: arc boundaries and label anchors
//!
//! Angles here are degrees clockwise from 12 o'clock in screen space; the
//! arcs themselves are stored in the layout frame (0 at the layout's zero
//! point) because that is what the gradient stops use.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::Serialize;

use crate::consts::{LABEL_RADIUS_FACTOR, MIN_LABEL_WIDTH};
use crate::polar_to_screen;

/// Angular extent of one segment in the layout frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentArc {
    pub start_deg: f32,
    pub end_deg: f32,
}

impl SegmentArc {
    #[inline]
    pub fn span(&self) -> f32 {
        self.end_deg - self.start_deg
    }

    #[inline]
    pub fn mid(&self) -> f32 {
        self.start_deg + self.span() / 2.0
    }

    /// Half-open containment, so neighbouring arcs never both claim a boundary
    pub fn contains(&self, angle_deg: f32) -> bool {
        angle_deg >= self.start_deg && angle_deg < self.end_deg
    }
}

/// Where a segment's label goes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelAnchor {
    /// Direction of the segment's center line
    pub angle_deg: f32,
    /// Distance from the wheel center
    pub radius: f32,
    /// Offset from the wheel center (px, y down)
    pub position: Vec2,
    /// Width budget before the label is ellipsized
    pub max_width: f32,
}

/// Distance from the center of a circle to the area centroid of one of `n`
/// equal sectors: `4R sin(θ/2) / 3θ` with `θ = 2π / n`.
///
/// Zero segments are treated as one; a non-positive radius yields 0.
pub fn sector_centroid_radius(radius: f32, segment_count: usize) -> f32 {
    if radius.is_nan() || radius <= 0.0 {
        return 0.0;
    }
    let theta = TAU / segment_count.max(1) as f32;
    (4.0 * radius * (theta / 2.0).sin()) / (3.0 * theta)
}

/// Everything the presenter needs to lay the wheel out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelGeometry {
    pub diameter: f32,
    pub radius: f32,
    pub arcs: Vec<SegmentArc>,
    pub labels: Vec<LabelAnchor>,
}

impl WheelGeometry {
    /// Lay out `segment_count` equal segments on a wheel of `diameter` px.
    /// An unmeasured (zero, negative, NaN) diameter degrades to 0.
    pub fn compute(segment_count: usize, diameter: f32, reference_offset_deg: f32) -> Self {
        let diameter = if diameter.is_finite() { diameter.max(0.0) } else { 0.0 };
        let radius = diameter / 2.0;
        let n = segment_count.max(1);
        let size_deg = 360.0 / n as f32;

        let arcs = (0..segment_count)
            .map(|i| SegmentArc {
                start_deg: i as f32 * size_deg,
                end_deg: (i + 1) as f32 * size_deg,
            })
            .collect();

        let label_radius = sector_centroid_radius(radius, n) * LABEL_RADIUS_FACTOR;
        let arc_length = label_radius * (TAU / n as f32);
        let max_width = (arc_length * 0.9).min(diameter * 0.5).max(MIN_LABEL_WIDTH);

        let labels = (0..segment_count)
            .map(|i| {
                let angle_deg = reference_offset_deg + (i as f32 + 0.5) * size_deg;
                LabelAnchor {
                    angle_deg,
                    radius: label_radius,
                    position: polar_to_screen(label_radius, angle_deg),
                    max_width,
                }
            })
            .collect();

        Self {
            diameter,
            radius,
            arcs,
            labels,
        }
    }
}
