//! Segments derived from the option list

use serde::Serialize;

use super::options::OptionList;
use crate::consts::PALETTE;

/// One slice of the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub label: String,
    /// CSS color string from the palette
    pub color: &'static str,
}

/// Color for a segment index, wrapping around the palette
#[inline]
pub fn color_for_index(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

/// Rebuild the segment list; call whenever the options change
pub fn build_segments(options: &OptionList) -> Vec<Segment> {
    options
        .iter()
        .enumerate()
        .map(|(i, label)| Segment {
            label: label.to_string(),
            color: color_for_index(i),
        })
        .collect()
}
