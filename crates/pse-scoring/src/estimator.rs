//! Signal-driven item estimates
//!
//! [`ItemEstimator`] turns an item description into an hour estimate:
//! signals are weighted into raw hours, classified into a size band, then
//! shrunk toward the reference median, clamped and rounded.

use pse_model::{AssessmentItem, EffectiveEstimationPolicy};
use serde::{Deserialize, Serialize};

use crate::normalizer::{apply_reference_shrinkage, clamp, round};
use crate::signals::{extract_signals, Signals};
use crate::size_class::{pick_size_class, SizeClass};

/// Outcome of estimating one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEstimate {
    /// Signals found in the description
    pub signals: Signals,
    /// Weighted hours before normalization
    pub raw_hours: f64,
    /// Band of the raw hours
    pub size_class: SizeClass,
    /// Whether the adjustment cap lowered the band
    pub capped: bool,
    /// Final hours after shrink, clamp and round, within the hard bounds
    pub hours: f64,
}

/// Estimator bound to one policy
#[derive(Debug, Clone, Copy)]
pub struct ItemEstimator<'a> {
    policy: &'a EffectiveEstimationPolicy,
}

impl<'a> ItemEstimator<'a> {
    /// Create estimator
    #[inline]
    #[must_use]
    pub fn new(policy: &'a EffectiveEstimationPolicy) -> Self {
        Self { policy }
    }

    /// Hours contributed by signals alone, before CRUD verbs
    #[must_use]
    pub fn signal_hours(&self, signals: &Signals) -> f64 {
        let w = &self.policy.weights;
        let mut hours = f64::from(signals.field_count) * w.per_field_hours
            + f64::from(signals.integration_count) * w.per_integration_hours
            + f64::from(signals.workflow_step_count) * w.workflow_step_hours;
        if signals.has_upload {
            hours += w.file_upload_hours;
        }
        if signals.has_auth_roles {
            hours += w.auth_roles_hours;
        }
        hours
    }

    /// Hours contributed by CRUD verbs: the XS band times each present multiplier
    #[must_use]
    pub fn crud_hours(&self, signals: &Signals, category: Option<&str>) -> f64 {
        let crud = &self.policy.crud;
        let multiplier: f64 = [
            (signals.has_create, crud.crud_create_multiplier),
            (signals.has_read, crud.crud_read_multiplier),
            (signals.has_update, crud.crud_update_multiplier),
            (signals.has_delete, crud.crud_delete_multiplier),
        ]
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, m)| m)
        .sum();
        self.policy.bands_for(category).xs * multiplier
    }

    /// Estimate from a description and category
    #[must_use]
    pub fn estimate(
        &self,
        detail: Option<&str>,
        category: Option<&str>,
        reference_median: Option<f64>,
    ) -> ItemEstimate {
        let signals = extract_signals(detail);
        let bands = self.policy.bands_for(category);
        let adjust_cap = self.policy.adjust_cap_applies(category);

        let mut raw_hours = self.signal_hours(&signals) + self.crud_hours(&signals, category);
        let uncapped = pick_size_class(raw_hours, &bands, false);
        let size_class = pick_size_class(raw_hours, &bands, adjust_cap);
        let capped = size_class < uncapped;
        if capped {
            raw_hours = raw_hours.min(SizeClass::M.upper_bound(&bands));
        }

        let shrunk = apply_reference_shrinkage(raw_hours, reference_median, self.policy);
        // rounding may step past a bound that is not a multiple of the step
        let hours = clamp(round(clamp(shrunk, self.policy), self.policy), self.policy);

        tracing::debug!(
            category = category.unwrap_or("-"),
            raw_hours,
            size = %size_class,
            capped,
            hours,
            "Estimated item"
        );

        ItemEstimate {
            signals,
            raw_hours,
            size_class,
            capped,
            hours,
        }
    }

    /// Estimate an assessment item from its detail and category
    #[must_use]
    pub fn estimate_item(&self, item: &AssessmentItem, reference_median: Option<f64>) -> ItemEstimate {
        self.estimate(
            item.item_detail.as_deref(),
            item.category.as_deref(),
            reference_median,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pse_model::CategoryBands;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_description_lands_on_hard_min() {
        let policy = EffectiveEstimationPolicy::new();
        let estimate = ItemEstimator::new(&policy).estimate(None, None, None);
        assert!(approx(estimate.raw_hours, 0.0));
        assert_eq!(estimate.size_class, SizeClass::XS);
        assert!(approx(estimate.hours, policy.hard_min_per_item_hours));
    }

    #[test]
    fn weighted_signals_and_crud() {
        let policy = EffectiveEstimationPolicy::new().with_rounding(0.5);
        let estimator = ItemEstimator::new(&policy);
        // integration + api: 2 * 8h; upload 4h; create 1.0 * xs(4) + delete 0.25 * 4
        let estimate = estimator.estimate(
            Some("Create and delete records, upload file, integration via API"),
            None,
            None,
        );
        assert_eq!(estimate.signals.integration_count, 2);
        assert!(approx(estimate.raw_hours, 16.0 + 4.0 + 4.0 + 1.0));
        assert_eq!(estimate.size_class, SizeClass::L);
        assert!(!estimate.capped);
        assert!(approx(estimate.hours, 25.0));
    }

    #[test]
    fn adjust_category_is_capped_at_medium() {
        let policy = EffectiveEstimationPolicy::new();
        let estimator = ItemEstimator::new(&policy);
        let detail = "Integration via API with SAP, approval workflow, upload attachment";
        let fresh = estimator.estimate(Some(detail), Some("New Feature"), None);
        let adjust = estimator.estimate(Some(detail), Some("Adjust Existing Feature"), None);

        assert!(fresh.size_class > SizeClass::M);
        assert_eq!(adjust.size_class, SizeClass::M);
        assert!(adjust.capped);
        assert!(adjust.raw_hours <= CategoryBands::default().m);
    }

    #[test]
    fn bounds_off_the_rounding_grid_still_hold() {
        let policy = EffectiveEstimationPolicy::new()
            .with_bounds(1.3, 10.7)
            .with_rounding(1.0);
        let estimator = ItemEstimator::new(&policy);

        let large = estimator.estimate(Some("integration via API with SAP"), None, None);
        assert!(large.raw_hours > 10.7);
        assert!(approx(large.hours, 10.7));

        let small = estimator.estimate(None, None, None);
        assert!(approx(small.hours, 1.3));
    }

    #[test]
    fn reference_median_shrinks_estimate() {
        let policy = EffectiveEstimationPolicy::new().with_shrinkage(1.5, 1.25);
        let estimator = ItemEstimator::new(&policy);
        let detail = "Integration via API with SAP, approval workflow";
        let free = estimator.estimate(Some(detail), None, None);
        let anchored = estimator.estimate(Some(detail), None, Some(8.0));
        assert!(anchored.hours <= free.hours);
        assert!(approx(anchored.hours, 10.0));
    }

    #[test]
    fn category_bands_drive_crud_hours() {
        let policy = EffectiveEstimationPolicy::new()
            .with_category("Report", CategoryBands::new(2.0, 4.0, 8.0, 16.0, 24.0));
        let estimator = ItemEstimator::new(&policy);
        let signals = extract_signals(Some("view report"));
        assert!(approx(estimator.crud_hours(&signals, Some("Report")), 1.0));
        assert!(approx(estimator.crud_hours(&signals, None), 2.0));
    }

    #[test]
    fn estimate_item_reads_detail_and_category() {
        let policy = EffectiveEstimationPolicy::new();
        let item = AssessmentItem::new("7", "Vendor master")
            .with_detail("tambah dan hapus vendor")
            .with_category("Master Data");
        let estimate = ItemEstimator::new(&policy).estimate_item(&item, None);
        assert!(estimate.signals.has_create && estimate.signals.has_delete);
    }
}
