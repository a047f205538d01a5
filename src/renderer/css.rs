//! CSS strings for the DOM presenter

use super::geometry::{LabelAnchor, WheelGeometry};
use crate::consts::{EMPTY_WHEEL_COLOR, SPIN_EASING};
use crate::wheel::Segment;

/// Conic gradient painting one color stop range per segment, starting at
/// the layout's zero point.
pub fn conic_gradient(segments: &[Segment], geometry: &WheelGeometry, reference_offset_deg: f64) -> String {
    let stops = if segments.is_empty() {
        format!("{} 0deg 360deg", EMPTY_WHEEL_COLOR)
    } else {
        segments
            .iter()
            .zip(&geometry.arcs)
            .map(|(seg, arc)| format!("{} {}deg {}deg", seg.color, arc.start_deg, arc.end_deg))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("conic-gradient(from {}deg, {})", reference_offset_deg, stops)
}

pub fn rotate(rotation_deg: f64) -> String {
    format!("rotate({}deg)", rotation_deg)
}

/// Transition for the wheel's transform; `none` while snapping or idle
pub fn transition(animate: bool, duration_ms: u32) -> String {
    if animate {
        format!(
            "transform {}s {}",
            f64::from(duration_ms) / 1000.0,
            SPIN_EASING
        )
    } else {
        "none".to_string()
    }
}

/// Transform centering a label box on its anchor
pub fn label_transform(anchor: &LabelAnchor) -> String {
    format!(
        "translate({}px, {}px) translate(-50%, -50%)",
        anchor.position.x, anchor.position.y
    )
}
