//! Random index selection
//!
//! Both selectors are generic over the RNG so the live wheel can use its
//! seeded `Pcg32` and tests can replay exact sequences.

use rand::Rng;

/// Pick an index uniformly from `[0, n)`.
///
/// Returns `None` when `n == 0`; callers are expected to have checked that
/// there is something to pick from.
pub fn pick_uniform_index<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    Some(rng.random_range(0..n))
}

/// Weight as used by the sampler: non-finite and negative values count as 0
#[inline]
fn effective_weight(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 { w } else { 0.0 }
}

/// Pick an index with probability `weights[i] / total` (inverse-CDF sampling).
///
/// When the weights sum to zero or less the pick degrades to uniform over
/// `weights.len()`. Returns `None` only for an empty slice.
pub fn pick_weighted_index<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> Option<usize> {
    let mut total: f64 = weights.iter().copied().map(effective_weight).sum();
    if total <= 0.0 {
        return pick_uniform_index(rng, weights.len());
    }

    // Finite weights can still overflow the sum; scale them into [0, 1]
    let scale = if total.is_finite() {
        1.0
    } else {
        let max = weights.iter().copied().map(effective_weight).fold(0.0, f64::max);
        total = weights.iter().map(|&w| effective_weight(w) / max).sum();
        max
    };

    let r = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (i, &w) in weights.iter().enumerate() {
        let w = effective_weight(w) / scale;
        if w == 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = Some(i);
        if cumulative > r {
            return Some(i);
        }
    }

    // Rounding in the running sum can leave r just above the last bucket
    last_positive
}
