//! Estimate normalization
//!
//! Three pure transforms the estimation workflow composes in whatever order
//! it needs. None of them panic, whatever the policy holds.

use pse_model::EffectiveEstimationPolicy;

/// Smallest rounding increment ever applied
pub const MIN_ROUNDING_STEP: f64 = 0.1;

/// Constrain `value` into the policy's hard per-item bounds
///
/// Inverted bounds are a load-time configuration error; if they slip through,
/// the maximum wins.
#[must_use]
pub fn clamp(value: f64, policy: &EffectiveEstimationPolicy) -> f64 {
    value
        .max(policy.hard_min_per_item_hours)
        .min(policy.hard_max_per_item_hours)
}

/// Effective rounding increment for a policy
#[inline]
#[must_use]
pub fn rounding_step(policy: &EffectiveEstimationPolicy) -> f64 {
    policy.round_to_nearest_hours.max(MIN_ROUNDING_STEP)
}

/// Round to the nearest multiple of the rounding increment, ties away from zero
#[must_use]
pub fn round(value: f64, policy: &EffectiveEstimationPolicy) -> f64 {
    let step = rounding_step(policy);
    (value / step).round() * step
}

/// Pull a raw estimate toward a historical reference median
///
/// Without a positive median the raw value is returned unchanged. Otherwise
/// the result is the smallest of the raw value, the hard cap
/// (`median × reference_median_cap_multiplier`) and the shrink target
/// (`median × global_shrinkage_to_median`). Never increases `raw`.
#[must_use]
pub fn apply_reference_shrinkage(
    raw: f64,
    reference_median: Option<f64>,
    policy: &EffectiveEstimationPolicy,
) -> f64 {
    let Some(median) = reference_median.filter(|m| *m > 0.0) else {
        return raw;
    };
    let cap = median * policy.reference_median_cap_multiplier;
    let shrink_target = median * policy.global_shrinkage_to_median;
    let shrunk = raw.min(cap).min(shrink_target);
    if shrunk < raw {
        tracing::debug!(raw, median, shrunk, "Shrunk estimate toward reference median");
    }
    shrunk
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn clamp_into_bounds() {
        let policy = EffectiveEstimationPolicy::new().with_bounds(2.0, 40.0);
        assert!(approx(clamp(1.0, &policy), 2.0));
        assert!(approx(clamp(12.0, &policy), 12.0));
        assert!(approx(clamp(99.0, &policy), 40.0));
    }

    #[test]
    fn clamp_with_inverted_bounds_does_not_panic() {
        let policy = EffectiveEstimationPolicy::new().with_bounds(10.0, 2.0);
        assert!(approx(clamp(5.0, &policy), 2.0));
    }

    #[test]
    fn round_half_away_from_zero() {
        let policy = EffectiveEstimationPolicy::new().with_rounding(1.0);
        assert!(approx(round(0.5, &policy), 1.0));
        assert!(approx(round(2.5, &policy), 3.0));
        assert!(approx(round(2.49, &policy), 2.0));
        assert!(approx(round(-0.5, &policy), -1.0));
    }

    #[test]
    fn round_to_half_hours() {
        let policy = EffectiveEstimationPolicy::new().with_rounding(0.5);
        assert!(approx(round(3.2, &policy), 3.0));
        assert!(approx(round(3.3, &policy), 3.5));
    }

    #[test]
    fn zero_step_is_floored() {
        let policy = EffectiveEstimationPolicy::new().with_rounding(0.0);
        assert!(approx(rounding_step(&policy), MIN_ROUNDING_STEP));
        assert!(approx(round(1.26, &policy), 1.3));
        let policy = EffectiveEstimationPolicy::new().with_rounding(-4.0);
        assert!(round(7.0, &policy).is_finite());
    }

    #[test]
    fn shrinkage_without_median_is_noop() {
        let policy = EffectiveEstimationPolicy::new();
        assert!(approx(apply_reference_shrinkage(80.0, None, &policy), 80.0));
        assert!(approx(apply_reference_shrinkage(80.0, Some(0.0), &policy), 80.0));
        assert!(approx(apply_reference_shrinkage(80.0, Some(-3.0), &policy), 80.0));
    }

    #[test]
    fn tighter_ceiling_wins() {
        let policy = EffectiveEstimationPolicy::new().with_shrinkage(1.5, 1.25);
        // cap 30, shrink target 25
        assert!(approx(apply_reference_shrinkage(80.0, Some(20.0), &policy), 25.0));
        let policy = EffectiveEstimationPolicy::new().with_shrinkage(1.1, 2.0);
        // cap 22, shrink target 40
        assert!(approx(apply_reference_shrinkage(80.0, Some(20.0), &policy), 22.0));
    }

    #[test]
    fn shrinkage_never_increases() {
        let policy = EffectiveEstimationPolicy::new();
        assert!(approx(apply_reference_shrinkage(5.0, Some(20.0), &policy), 5.0));
    }
}
