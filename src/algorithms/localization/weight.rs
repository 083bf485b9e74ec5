//! Raw-score to particle-weight conversion.
//!
//! Maps the clamped raw score range `[-max, +max]` onto
//! `[min_prob, min_prob * exp(2k)]` with `k = -ln(min_prob) / 2`, so
//! the ceiling is exactly 1.0 and even a hopeless particle keeps a
//! strictly positive weight. Zero-weight collapse would starve the
//! external resampler.

/// Convert a raw alignment score into a bounded particle weight.
///
/// Monotonic non-decreasing in `raw`; scores outside the clamp bound
/// map to the same weight as the nearest bound.
pub fn score_to_weight(raw: f32, max_raw_score: f32, min_prob: f64) -> f64 {
    let clamped = raw.clamp(-max_raw_score, max_raw_score) as f64;
    let k = -min_prob.ln() / 2.0;
    min_prob * (k * (clamped / max_raw_score as f64 + 1.0)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MAX: f32 = 5000.0;
    const MIN_PROB: f64 = 0.01;

    #[test]
    fn test_bounds() {
        let floor = score_to_weight(-MAX, MAX, MIN_PROB);
        let ceiling = score_to_weight(MAX, MAX, MIN_PROB);
        assert_relative_eq!(floor, MIN_PROB, epsilon = 1e-12);
        assert_relative_eq!(ceiling, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let mut prev = f64::NEG_INFINITY;
        let mut raw = -MAX;
        while raw <= MAX {
            let w = score_to_weight(raw, MAX, MIN_PROB);
            assert!(w >= prev, "weight decreased at raw {}", raw);
            prev = w;
            raw += 50.0;
        }
    }

    #[test]
    fn test_clamp_is_idempotent() {
        assert_eq!(
            score_to_weight(MAX * 10.0, MAX, MIN_PROB),
            score_to_weight(MAX, MAX, MIN_PROB)
        );
        assert_eq!(
            score_to_weight(-MAX * 10.0, MAX, MIN_PROB),
            score_to_weight(-MAX, MAX, MIN_PROB)
        );
    }

    #[test]
    fn test_midpoint() {
        // raw 0 maps to min_prob * exp(k) = sqrt(min_prob).
        let w = score_to_weight(0.0, MAX, MIN_PROB);
        assert_relative_eq!(w, MIN_PROB.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_always_strictly_positive() {
        for raw in [-1e9f32, -MAX, 0.0, MAX, 1e9] {
            assert!(score_to_weight(raw, MAX, MIN_PROB) > 0.0);
        }
    }
}
