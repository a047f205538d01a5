//! Spin Wheel - a randomized option picker for the browser
//!
//! Core modules:
//! - `wheel`: Selection and animation engine (selector, planner, state machine)
//! - `renderer`: Wheel geometry and the presentation interface
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Key-value storage for the option list
//! - `settings`: Spin tuning persisted alongside the options
//! - `app`: Controller tying the engine to storage and presentation

pub mod app;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod wheel;

pub use app::WheelApp;
pub use settings::Settings;

use glam::Vec2;

/// Design constants
pub mod consts {
    /// Angle between the layout's zero point and the indicator (degrees).
    /// Segments start at 9 o'clock; the indicator sits at 12 o'clock.
    pub const REFERENCE_OFFSET_DEG: f64 = -90.0;

    /// Cosmetic full turns added to every spin (inclusive range)
    pub const EXTRA_TURNS_MIN: u32 = 5;
    pub const EXTRA_TURNS_MAX: u32 = 8;

    /// A wheel with fewer segments has nothing to decide
    pub const MIN_SEGMENTS_TO_SPIN: usize = 2;

    /// Spin transition
    pub const SPIN_DURATION_MS: u32 = 4600;
    pub const SPIN_EASING: &str = "cubic-bezier(.12,.7,.13,1)";
    /// Duration used when reduced motion is requested
    pub const REDUCED_MOTION_DURATION_MS: u32 = 300;

    /// Labels sit slightly inside the sector centroid
    pub const LABEL_RADIUS_FACTOR: f32 = 0.95;
    /// Smallest width a label is ever given (px)
    pub const MIN_LABEL_WIDTH: f32 = 40.0;

    /// Storage keys
    pub const OPTIONS_STORAGE_KEY: &str = "wheel.items.v1";
    pub const SETTINGS_STORAGE_KEY: &str = "wheel.settings.v1";

    /// Seed list used on first launch or when storage is unreadable
    pub const DEFAULT_OPTIONS: [&str; 6] = ["Pizza", "Burgare", "Sallad", "Sushi", "Tacos", "Pasta"];

    /// Segment colors, assigned by index modulo length
    pub const PALETTE: [&str; 8] = [
        "#60a5fa", "#f59e0b", "#34d399", "#f472b6", "#a78bfa", "#fb7185", "#22d3ee", "#facc15",
    ];

    /// Fill used when there are no segments at all
    pub const EMPTY_WHEEL_COLOR: &str = "#e5e7eb";
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let r = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Convert a polar position to screen space, with the angle measured
/// clockwise from 12 o'clock and y growing downward.
#[inline]
pub fn polar_to_screen(r: f32, angle_deg: f32) -> Vec2 {
    let theta = angle_deg.to_radians();
    Vec2::new(r * theta.sin(), -r * theta.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(2040.0), 240.0);
        assert!(normalize_degrees(-1e-20) < 360.0);
    }

    #[test]
    fn test_polar_to_screen() {
        let top = polar_to_screen(10.0, 0.0);
        assert!(top.x.abs() < 1e-5 && (top.y + 10.0).abs() < 1e-5);

        let left = polar_to_screen(10.0, -90.0);
        assert!((left.x + 10.0).abs() < 1e-5 && left.y.abs() < 1e-5);
    }
}
