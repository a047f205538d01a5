//! Spin settings and preferences
//!
//! Persisted separately from the option list.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{KeyValueStore, load_json, save_json};

/// Spin tuning and accessibility preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Planner ===
    /// Fewest cosmetic full turns per spin
    pub extra_turns_min: u32,
    /// Most cosmetic full turns per spin (inclusive)
    pub extra_turns_max: u32,
    /// Offset between the layout zero point and the indicator (degrees)
    pub reference_offset_deg: f64,

    // === Animation ===
    /// Length of the spin transition
    pub spin_duration_ms: u32,

    // === Accessibility ===
    /// Reduced motion (short transition, same sequencing)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extra_turns_min: EXTRA_TURNS_MIN,
            extra_turns_max: EXTRA_TURNS_MAX,
            reference_offset_deg: REFERENCE_OFFSET_DEG,
            spin_duration_ms: SPIN_DURATION_MS,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Fix up values a hand-edited store could contain
    pub fn validated(mut self) -> Self {
        if self.extra_turns_min > self.extra_turns_max {
            std::mem::swap(&mut self.extra_turns_min, &mut self.extra_turns_max);
        }
        // At least one full turn, so the target always differs from the
        // snapped start and the renderer has a transition to finish
        self.extra_turns_min = self.extra_turns_min.max(1);
        self.extra_turns_max = self.extra_turns_max.max(self.extra_turns_min);
        if !self.reference_offset_deg.is_finite() {
            self.reference_offset_deg = REFERENCE_OFFSET_DEG;
        }
        if self.spin_duration_ms == 0 {
            self.spin_duration_ms = SPIN_DURATION_MS;
        }
        self
    }

    /// Effective transition length (respects reduced_motion)
    pub fn effective_duration_ms(&self) -> u32 {
        if self.reduced_motion {
            self.spin_duration_ms.min(REDUCED_MOTION_DURATION_MS)
        } else {
            self.spin_duration_ms
        }
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<Settings>(store, SETTINGS_STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings.validated()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match save_json(store, SETTINGS_STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_validated_orders_turns() {
        let s = Settings {
            extra_turns_min: 9,
            extra_turns_max: 3,
            reference_offset_deg: f64::NAN,
            spin_duration_ms: 0,
            ..Settings::default()
        }
        .validated();
        assert_eq!((s.extra_turns_min, s.extra_turns_max), (3, 9));
        assert_eq!(s.reference_offset_deg, REFERENCE_OFFSET_DEG);
        assert_eq!(s.spin_duration_ms, SPIN_DURATION_MS);

        let s = Settings {
            extra_turns_min: 0,
            extra_turns_max: 0,
            ..Settings::default()
        }
        .validated();
        assert_eq!((s.extra_turns_min, s.extra_turns_max), (1, 1));
    }

    #[test]
    fn test_reduced_motion_duration() {
        let mut s = Settings::default();
        assert_eq!(s.effective_duration_ms(), SPIN_DURATION_MS);
        s.reduced_motion = true;
        assert_eq!(s.effective_duration_ms(), REDUCED_MOTION_DURATION_MS);
    }

    #[test]
    fn test_load_save_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(Settings::load(&store), Settings::default());

        let s = Settings {
            extra_turns_max: 12,
            reduced_motion: true,
            ..Settings::default()
        };
        s.save(&mut store);
        assert_eq!(Settings::load(&store), s);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut store = MemoryStore::default();
        store.set(SETTINGS_STORAGE_KEY, r#"{"reduced_motion":true}"#).unwrap();
        let s = Settings::load(&store);
        assert!(s.reduced_motion);
        assert_eq!(s.extra_turns_min, EXTRA_TURNS_MIN);
    }

    #[test]
    fn test_corrupt_settings_fall_back() {
        let mut store = MemoryStore::default();
        store.set(SETTINGS_STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
