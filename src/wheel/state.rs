//! Spin state machine
//!
//! `WheelState` is the single owner of the option list, the rotation angle,
//! and the spinning flag. A spin runs as:
//!
//! 1. `request_spin` - guard, pick the winner, plan the target
//! 2. `advance_frame` - snap the rotation into [0, 360) with transitions off
//! 3. `advance_frame` - set the target rotation with transitions on
//! 4. `finish_animation` - the renderer reports the transition ended; the
//!    outcome is published and the wheel goes back to `Idle`
//!
//! Steps 2 and 3 must land on separate animation frames so the renderer has
//! observed the un-animated angle before the animated one is applied.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::options::{BatchReport, OptionList, OptionRejected};
use super::planner::{RotationPlan, indicator_segment, plan_rotation, random_extra_turns};
use super::random::pick_uniform_index;
use super::segments::{Segment, build_segments};
use crate::consts::*;
use crate::normalize_degrees;
use crate::settings::Settings;

/// Whether a spin is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
}

/// Progress of an in-flight spin through the two-phase commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinStage {
    /// Next frame snaps the rotation into a single turn
    AwaitingReset,
    /// Next frame applies the target rotation
    AwaitingTarget,
    /// Transition running; waiting for the renderer's completion signal
    Animating,
}

/// An in-flight spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinSession {
    pub chosen_index: usize,
    pub target_angle: f64,
    /// Platform timestamp (ms) when the spin was requested
    pub started_at: f64,
    pub extra_turns: u32,
    pub stage: SpinStage,
}

/// What the renderer must do on this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameCommand {
    /// Jump to `rotation` with transitions disabled
    Snap { rotation: f64 },
    /// Animate to `rotation`
    Animate { rotation: f64 },
}

/// The winner of a completed spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionOutcome {
    pub index: usize,
    pub label: String,
    pub color: &'static str,
}

impl SelectionOutcome {
    /// Text for the live status region
    pub fn announcement(&self) -> String {
        format!("Winner: {}", self.label)
    }
}

/// Snapshot handed to the presenter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelView {
    pub rotation: f64,
    /// Whether rotation changes should be transitioned
    pub animate: bool,
    pub spinning: bool,
    pub can_spin: bool,
}

/// Complete wheel state
#[derive(Debug, Clone)]
pub struct WheelState {
    options: OptionList,
    segments: Vec<Segment>,
    rotation: f64,
    animate: bool,
    phase: SpinPhase,
    session: Option<SpinSession>,
    /// Pending or just-announced winner
    winner_index: Option<usize>,
    outcome: Option<SelectionOutcome>,
    rng: Pcg32,
    reference_offset: f64,
    extra_turns_min: u32,
    extra_turns_max: u32,
}

impl WheelState {
    /// Create an idle wheel with the given options and RNG seed
    pub fn new(options: OptionList, seed: u64) -> Self {
        let segments = build_segments(&options);
        Self {
            options,
            segments,
            rotation: 0.0,
            animate: false,
            phase: SpinPhase::Idle,
            session: None,
            winner_index: None,
            outcome: None,
            rng: Pcg32::seed_from_u64(seed),
            reference_offset: REFERENCE_OFFSET_DEG,
            extra_turns_min: EXTRA_TURNS_MIN,
            extra_turns_max: EXTRA_TURNS_MAX,
        }
    }

    /// Take the planner tuning from settings. Affects the next spin only.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.reference_offset = settings.reference_offset_deg;
        self.extra_turns_min = settings.extra_turns_min;
        self.extra_turns_max = settings.extra_turns_max;
    }

    pub fn options(&self) -> &OptionList {
        &self.options
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    pub fn session(&self) -> Option<&SpinSession> {
        self.session.as_ref()
    }

    pub fn reference_offset(&self) -> f64 {
        self.reference_offset
    }

    /// Last published outcome; `None` while spinning
    pub fn outcome(&self) -> Option<&SelectionOutcome> {
        self.outcome.as_ref()
    }

    pub fn can_spin(&self) -> bool {
        self.segments.len() >= MIN_SEGMENTS_TO_SPIN && !self.is_spinning()
    }

    pub fn view(&self) -> WheelView {
        WheelView {
            rotation: self.rotation,
            animate: self.animate,
            spinning: self.is_spinning(),
            can_spin: self.can_spin(),
        }
    }

    fn ensure_idle(&self) -> Result<(), OptionRejected> {
        if self.is_spinning() {
            Err(OptionRejected::Spinning)
        } else {
            Ok(())
        }
    }

    pub fn add_option(&mut self, label: &str) -> Result<(), OptionRejected> {
        self.ensure_idle()?;
        self.options.add(label)?;
        self.segments = build_segments(&self.options);
        Ok(())
    }

    pub fn add_batch(&mut self, text: &str) -> Result<BatchReport, OptionRejected> {
        self.ensure_idle()?;
        let report = self.options.add_batch(text);
        if !report.added.is_empty() {
            self.segments = build_segments(&self.options);
        }
        Ok(report)
    }

    /// Remove an option by position. A winner pointing at the removed
    /// segment is forgotten; one pointing past it follows its segment.
    pub fn remove_option(&mut self, index: usize) -> Result<String, OptionRejected> {
        self.ensure_idle()?;
        let removed = self.options.remove(index)?;
        self.segments = build_segments(&self.options);

        match self.winner_index {
            Some(w) if w == index => {
                self.winner_index = None;
                self.outcome = None;
            }
            Some(w) if w > index => {
                self.winner_index = Some(w - 1);
                if let Some(outcome) = self.outcome.as_mut() {
                    outcome.index = w - 1;
                }
            }
            _ => {}
        }

        Ok(removed)
    }

    /// Start a spin. Returns `false` (and changes nothing) when the wheel
    /// cannot spin right now.
    pub fn request_spin(&mut self, now_ms: f64) -> bool {
        if !self.can_spin() {
            log::debug!(
                "Spin ignored ({} segments, spinning: {})",
                self.segments.len(),
                self.is_spinning()
            );
            return false;
        }

        let n = self.segments.len();
        let plan = pick_uniform_index(&mut self.rng, n).and_then(|winner| {
            let extra = random_extra_turns(&mut self.rng, self.extra_turns_min, self.extra_turns_max);
            plan_rotation(winner, n, self.reference_offset, extra)
        });

        match plan {
            Some(plan) => {
                self.begin_spin(plan, now_ms);
                true
            }
            None => false,
        }
    }

    fn begin_spin(&mut self, plan: RotationPlan, now_ms: f64) {
        self.outcome = None;
        self.winner_index = Some(plan.winner);
        self.phase = SpinPhase::Spinning;
        self.session = Some(SpinSession {
            chosen_index: plan.winner,
            target_angle: plan.target_angle,
            started_at: now_ms,
            extra_turns: plan.extra_turns,
            stage: SpinStage::AwaitingReset,
        });
        log::info!(
            "Spin started: {} segments, {} extra turns, target {:.1} deg",
            plan.segment_count,
            plan.extra_turns,
            plan.target_angle
        );
    }

    /// Advance the two-phase commit by one animation frame.
    ///
    /// Returns the command the renderer must apply, or `None` when nothing
    /// is pending.
    pub fn advance_frame(&mut self) -> Option<FrameCommand> {
        let session = self.session.as_mut()?;
        match session.stage {
            SpinStage::AwaitingReset => {
                self.rotation = normalize_degrees(self.rotation);
                self.animate = false;
                session.stage = SpinStage::AwaitingTarget;
                Some(FrameCommand::Snap {
                    rotation: self.rotation,
                })
            }
            SpinStage::AwaitingTarget => {
                self.rotation = session.target_angle;
                self.animate = true;
                session.stage = SpinStage::Animating;
                Some(FrameCommand::Animate {
                    rotation: self.rotation,
                })
            }
            SpinStage::Animating => None,
        }
    }

    /// Handle the renderer's animation-completion signal.
    ///
    /// Only a signal for the running target transition counts; anything
    /// earlier is ignored. Returns the newly published outcome.
    pub fn finish_animation(&mut self, now_ms: f64) -> Option<SelectionOutcome> {
        if self.session.map(|s| s.stage) != Some(SpinStage::Animating) {
            return None;
        }
        let session = self.session.take()?;

        self.phase = SpinPhase::Idle;
        self.animate = false;

        let index = session.chosen_index;
        let Some(segment) = self.segments.get(index) else {
            log::warn!("Winner {} no longer exists", index);
            self.winner_index = None;
            return None;
        };

        let shown = indicator_segment(self.rotation, self.segments.len(), self.reference_offset);
        if shown != Some(index) {
            log::warn!("Indicator shows {:?} but winner is {}", shown, index);
        }

        let outcome = SelectionOutcome {
            index,
            label: segment.label.clone(),
            color: segment.color,
        };
        log::info!(
            "Spin finished after {:.0} ms: {}",
            now_ms - session.started_at,
            outcome.label
        );
        self.outcome = Some(outcome.clone());
        Some(outcome)
    }

    /// Clear rotation and winner. Refused while spinning.
    pub fn reset(&mut self) -> bool {
        if self.is_spinning() {
            log::debug!("Reset ignored while spinning");
            return false;
        }
        self.rotation = 0.0;
        self.animate = false;
        self.winner_index = None;
        self.outcome = None;
        true
    }
}
