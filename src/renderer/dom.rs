//! DOM presenter
//!
//! Expects the page to provide:
//! - `#wheel`: the rotating disc; labels are rendered inside it
//! - `#status`: live region for the winner announcement
//! - `#option-count`, `#option-list`: option summary and list
//! - `#spin-btn`, `#reset-btn`: enabled/disabled from the view
//! - `#winner-panel`, `#winner-label`, `#winner-swatch`: winner dialog

use web_sys::{Document, Element, HtmlElement};

use super::Presenter;
use super::css;
use super::geometry::WheelGeometry;
use crate::settings::Settings;
use crate::wheel::{Segment, SelectionOutcome, WheelView};

pub struct DomPresenter {
    document: Document,
    wheel: HtmlElement,
    duration_ms: u32,
    reference_offset_deg: f64,
}

impl DomPresenter {
    pub fn new(document: Document, wheel: HtmlElement, duration_ms: u32, reference_offset_deg: f64) -> Self {
        Self {
            document,
            wheel,
            duration_ms,
            reference_offset_deg,
        }
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        if let Some(el) = self.by_id(id) {
            if disabled {
                let _ = el.set_attribute("disabled", "");
            } else {
                let _ = el.remove_attribute("disabled");
            }
        }
    }

    fn render_labels(&self, segments: &[Segment], geometry: &WheelGeometry) {
        self.wheel.set_inner_html("");
        for (seg, anchor) in segments.iter().zip(&geometry.labels) {
            let Ok(el) = self.document.create_element("div") else {
                continue;
            };
            let _ = el.set_attribute("class", "wheel-label");
            let _ = el.set_attribute("title", &seg.label);
            let _ = el.set_attribute(
                "style",
                &format!(
                    "left: 50%; top: 50%; transform: {}; max-width: {}px",
                    css::label_transform(anchor),
                    anchor.max_width as u32
                ),
            );
            el.set_text_content(Some(&seg.label));
            let _ = self.wheel.append_child(&el);
        }
    }

    fn render_list(&self, segments: &[Segment]) {
        if let Some(count) = self.by_id("option-count") {
            count.set_text_content(Some(&format!("{} options", segments.len())));
        }

        let Some(list) = self.by_id("option-list") else {
            return;
        };
        list.set_inner_html("");

        if segments.is_empty() {
            if let Ok(empty) = self.document.create_element("li") {
                let _ = empty.set_attribute("class", "empty");
                empty.set_text_content(Some("No options yet."));
                let _ = list.append_child(&empty);
            }
            return;
        }

        for (i, seg) in segments.iter().enumerate() {
            let (Ok(item), Ok(swatch), Ok(label), Ok(remove)) = (
                self.document.create_element("li"),
                self.document.create_element("span"),
                self.document.create_element("span"),
                self.document.create_element("button"),
            ) else {
                continue;
            };
            let _ = swatch.set_attribute("class", "swatch");
            let _ = swatch.set_attribute("style", &format!("background: {}", seg.color));
            let _ = label.set_attribute("class", "label");
            label.set_text_content(Some(&seg.label));
            let _ = remove.set_attribute("class", "remove");
            let _ = remove.set_attribute("data-index", &i.to_string());
            remove.set_text_content(Some("Remove"));

            let _ = item.append_child(&swatch);
            let _ = item.append_child(&label);
            let _ = item.append_child(&remove);
            let _ = list.append_child(&item);
        }
    }
}

impl Presenter for DomPresenter {
    fn apply_settings(&mut self, settings: &Settings) {
        self.duration_ms = settings.effective_duration_ms();
        self.reference_offset_deg = settings.reference_offset_deg;
    }

    fn measure(&self) -> f32 {
        self.wheel.offset_width().min(self.wheel.offset_height()).max(0) as f32
    }

    fn render_segments(&mut self, segments: &[Segment], geometry: &WheelGeometry) {
        let style = self.wheel.style();
        let _ = style.set_property(
            "background",
            &css::conic_gradient(segments, geometry, self.reference_offset_deg),
        );
        self.render_labels(segments, geometry);
        self.render_list(segments);
    }

    fn render_view(&mut self, view: &WheelView) {
        let style = self.wheel.style();
        // Transition first so a snap is never animated
        let _ = style.set_property("transition", &css::transition(view.animate, self.duration_ms));
        let _ = style.set_property("transform", &css::rotate(view.rotation));

        self.set_disabled("spin-btn", !view.can_spin);
        self.set_disabled("reset-btn", view.spinning);
    }

    fn announce(&mut self, outcome: Option<&SelectionOutcome>) {
        if let Some(status) = self.by_id("status") {
            let text = outcome.map(SelectionOutcome::announcement).unwrap_or_default();
            status.set_text_content(Some(&text));
        }

        let Some(panel) = self.by_id("winner-panel") else {
            return;
        };
        match outcome {
            Some(outcome) => {
                if let Some(label) = self.by_id("winner-label") {
                    label.set_text_content(Some(&outcome.label));
                }
                if let Some(swatch) = self.by_id("winner-swatch") {
                    let _ = swatch.set_attribute("style", &format!("background: {}", outcome.color));
                }
                let _ = panel.set_attribute("class", "");
            }
            None => {
                let _ = panel.set_attribute("class", "hidden");
            }
        }
    }
}
