//! Rotation planning
//!
//! Converts a winning segment index into the absolute rotation (degrees,
//! clockwise) that leaves that segment's center under the indicator.
//!
//! Layout convention: segment `i` spans `[i, i + 1) * 360 / n` measured from
//! the layout's zero point, and the zero point sits `reference_offset`
//! degrees away from the indicator (-90 means "starts at 9 o'clock").

use rand::Rng;

use crate::normalize_degrees;

/// Result of planning one spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationPlan {
    /// Segment that will come to rest under the indicator
    pub winner: usize,
    /// Number of segments on the wheel when the plan was made
    pub segment_count: usize,
    /// Cosmetic full turns before stopping
    pub extra_turns: u32,
    /// Rotation within one turn that aligns the winner, in (0, 360]
    pub resting_angle: f64,
    /// Absolute rotation to animate to
    pub target_angle: f64,
}

/// Angular width of one segment
#[inline]
pub fn segment_size(segment_count: usize) -> f64 {
    360.0 / segment_count as f64
}

/// Angular center of segment `index`, measured from the layout's zero point
#[inline]
pub fn segment_center_angle(index: usize, segment_count: usize) -> f64 {
    (index as f64 + 0.5) * segment_size(segment_count)
}

/// Rotation within a single turn that puts the center of `winner` under the
/// indicator.
pub fn resting_angle(winner: usize, segment_count: usize, reference_offset: f64) -> f64 {
    let from_indicator = reference_offset + segment_center_angle(winner, segment_count);
    360.0 - normalize_degrees(from_indicator)
}

/// Plan the target rotation for a spin.
///
/// Deterministic in its inputs; `extra_turns` only adds whole turns and
/// never changes the resting segment. Returns `None` for an empty wheel or an
/// out-of-range winner.
pub fn plan_rotation(
    winner: usize,
    segment_count: usize,
    reference_offset: f64,
    extra_turns: u32,
) -> Option<RotationPlan> {
    if segment_count == 0 || winner >= segment_count {
        return None;
    }

    let resting_angle = resting_angle(winner, segment_count, reference_offset);
    Some(RotationPlan {
        winner,
        segment_count,
        extra_turns,
        resting_angle,
        target_angle: f64::from(extra_turns) * 360.0 + resting_angle,
    })
}

/// Draw the cosmetic turn count from an inclusive range.
pub fn random_extra_turns<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.random_range(lo..=hi)
}

/// Which segment sits under the indicator at the given rotation.
///
/// Inverse of the planner, used to check that what the user sees is what
/// was picked.
pub fn indicator_segment(rotation: f64, segment_count: usize, reference_offset: f64) -> Option<usize> {
    if segment_count == 0 {
        return None;
    }
    let layout_angle = normalize_degrees(-reference_offset - rotation);
    let index = (layout_angle / segment_size(segment_count)).floor() as usize;
    Some(index.min(segment_count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_OFFSET_DEG;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Distance between two angles on the circle
    fn circular_distance(a: f64, b: f64) -> f64 {
        let d = normalize_degrees(a - b);
        d.min(360.0 - d)
    }

    #[test]
    fn test_plan_sushi() {
        // Six options, "Sushi" at index 3: center 210, offset -90 -> 120
        let plan = plan_rotation(3, 6, REFERENCE_OFFSET_DEG, 5).unwrap();
        assert_eq!(segment_center_angle(3, 6), 210.0);
        assert_eq!(plan.resting_angle, 240.0);
        assert_eq!(plan.target_angle, 5.0 * 360.0 + 240.0);
        assert_eq!(indicator_segment(plan.target_angle, 6, REFERENCE_OFFSET_DEG), Some(3));
    }

    #[test]
    fn test_plan_rejects_bad_input() {
        assert!(plan_rotation(0, 0, REFERENCE_OFFSET_DEG, 5).is_none());
        assert!(plan_rotation(6, 6, REFERENCE_OFFSET_DEG, 5).is_none());
    }

    #[test]
    fn test_resting_angle_range() {
        // offset 0, winner centered exactly on a multiple of 360 -> full turn
        let plan = plan_rotation(0, 1, 180.0, 0).unwrap();
        assert_eq!(plan.resting_angle, 360.0);
        for n in 1..30 {
            for w in 0..n {
                let r = resting_angle(w, n, REFERENCE_OFFSET_DEG);
                assert!(r > 0.0 && r <= 360.0);
            }
        }
    }

    #[test]
    fn test_extra_turns_in_range() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let t = random_extra_turns(&mut rng, 5, 8);
            assert!((5..=8).contains(&t));
            seen[(t - 5) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every turn count should come up");
        // Swapped bounds are tolerated
        let t = random_extra_turns(&mut rng, 8, 5);
        assert!((5..=8).contains(&t));
    }

    #[test]
    fn test_indicator_segment_empty() {
        assert_eq!(indicator_segment(123.0, 0, REFERENCE_OFFSET_DEG), None);
    }

    proptest! {
        #[test]
        fn prop_winner_lands_under_indicator(
            n in 2usize..64,
            w_seed in 0usize..10_000,
            extra in 0u32..20,
            offset in -720.0f64..720.0,
        ) {
            let w = w_seed % n;
            let plan = plan_rotation(w, n, offset, extra).unwrap();

            // The winner's center, carried by the rotation, ends at the indicator
            let center_after = offset + segment_center_angle(w, n) + plan.target_angle;
            prop_assert!(circular_distance(center_after, 0.0) < 1e-6);
            prop_assert_eq!(indicator_segment(plan.target_angle, n, offset), Some(w));
        }

        #[test]
        fn prop_extra_turns_do_not_change_resting_segment(
            n in 2usize..64,
            w_seed in 0usize..10_000,
            a in 0u32..20,
            b in 0u32..20,
        ) {
            let w = w_seed % n;
            let pa = plan_rotation(w, n, REFERENCE_OFFSET_DEG, a).unwrap();
            let pb = plan_rotation(w, n, REFERENCE_OFFSET_DEG, b).unwrap();
            prop_assert_eq!(pa.resting_angle, pb.resting_angle);
            prop_assert!(circular_distance(pa.target_angle, pb.target_angle) < 1e-6);
        }
    }
}
