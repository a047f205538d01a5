//! Headless presenter
//!
//! Logs what a real renderer would draw and keeps a record of it. Used by
//! the native build and by controller tests.

use super::Presenter;
use super::geometry::WheelGeometry;
use crate::wheel::{Segment, SelectionOutcome, WheelView};

#[derive(Debug, Clone, Default)]
pub struct LogPresenter {
    /// Diameter reported to the controller
    pub diameter: f32,
    pub segment_labels: Vec<String>,
    pub geometry: Option<WheelGeometry>,
    pub last_view: Option<WheelView>,
    /// Announcement text history; `None` entries are clears
    pub announcements: Vec<Option<String>>,
}

impl LogPresenter {
    pub fn with_diameter(diameter: f32) -> Self {
        Self {
            diameter,
            ..Self::default()
        }
    }

    /// Most recent non-cleared announcement
    pub fn current_announcement(&self) -> Option<&str> {
        self.announcements.last().and_then(|a| a.as_deref())
    }
}

impl Presenter for LogPresenter {
    fn measure(&self) -> f32 {
        self.diameter
    }

    fn render_segments(&mut self, segments: &[Segment], geometry: &WheelGeometry) {
        self.segment_labels = segments.iter().map(|s| s.label.clone()).collect();
        self.geometry = Some(geometry.clone());
        log::debug!("Wheel: {} segments, radius {:.1}", segments.len(), geometry.radius);
    }

    fn render_view(&mut self, view: &WheelView) {
        log::debug!(
            "Rotation {:.1} deg (animate: {}, spinning: {})",
            view.rotation,
            view.animate,
            view.spinning
        );
        self.last_view = Some(*view);
    }

    fn announce(&mut self, outcome: Option<&SelectionOutcome>) {
        let text = outcome.map(SelectionOutcome::announcement);
        if let Some(text) = &text {
            log::info!("{}", text);
        }
        self.announcements.push(text);
    }
}
