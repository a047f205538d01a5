//! Presentation layer
//!
//! The renderer never decides anything: it receives segments, geometry, and
//! the current view, and reports back when the spin transition has ended.

pub mod css;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod geometry;
pub mod headless;

#[cfg(target_arch = "wasm32")]
pub use dom::DomPresenter;
pub use geometry::{LabelAnchor, SegmentArc, WheelGeometry, sector_centroid_radius};
pub use headless::LogPresenter;

use crate::settings::Settings;
use crate::wheel::{Segment, SelectionOutcome, WheelView};

/// Something that can show the wheel
pub trait Presenter {
    /// Pick up timing or layout preferences
    fn apply_settings(&mut self, _settings: &Settings) {}

    /// Current wheel diameter in px, or 0 when not measurable yet
    fn measure(&self) -> f32;

    /// Redraw slices and labels (after option or size changes)
    fn render_segments(&mut self, segments: &[Segment], geometry: &WheelGeometry);

    /// Apply rotation and transition state
    fn render_view(&mut self, view: &WheelView);

    /// Show or clear the winner announcement
    fn announce(&mut self, outcome: Option<&SelectionOutcome>);
}
