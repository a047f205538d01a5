//! Selection and animation engine
//!
//! Everything that decides the outcome of a spin lives here. This module
//! must stay free of DOM and platform code:
//! - RNG is always passed in or owned (seeded)
//! - Angles are plain degrees
//! - The outcome only becomes visible through `WheelState::finish_animation`

pub mod options;
pub mod planner;
pub mod random;
pub mod segments;
pub mod state;

pub use options::{BatchReport, OptionList, OptionRejected};
pub use planner::{RotationPlan, indicator_segment, plan_rotation, segment_center_angle};
pub use random::{pick_uniform_index, pick_weighted_index};
pub use segments::{Segment, build_segments, color_for_index};
pub use state::{FrameCommand, SelectionOutcome, SpinPhase, SpinSession, SpinStage, WheelState, WheelView};
