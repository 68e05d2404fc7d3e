//! Estimation policy
//!
//! [`EffectiveEstimationPolicy`] is the immutable set of knobs every scorer
//! and normalizer call receives explicitly: effort bands per category,
//! signal weights, CRUD multipliers, shrinkage ceilings, clamp bounds and the
//! rounding increment.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Prefix marking adjustment categories ("Adjust Existing Report", ...)
pub const ADJUST_CATEGORY_PREFIX: &str = "adjust existing";

/// Upper hour bounds of the five size bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryBands {
    /// Extra small upper bound
    pub xs: f64,
    /// Small upper bound
    pub s: f64,
    /// Medium upper bound
    pub m: f64,
    /// Large upper bound
    pub l: f64,
    /// Extra large upper bound
    pub xl: f64,
}

impl CategoryBands {
    /// Create bands from ascending thresholds
    #[inline]
    #[must_use]
    pub const fn new(xs: f64, s: f64, m: f64, l: f64, xl: f64) -> Self {
        Self { xs, s, m, l, xl }
    }

    /// Thresholds in ascending band order
    #[inline]
    #[must_use]
    pub fn thresholds(&self) -> [f64; 5] {
        [self.xs, self.s, self.m, self.l, self.xl]
    }

    fn validate(&self, category: &str) -> Result<(), ConfigError> {
        let bands = self.thresholds();
        let ascending = bands.iter().all(|b| b.is_finite() && *b >= 0.0)
            && bands.windows(2).all(|w| w[0] < w[1]);
        if ascending {
            Ok(())
        } else {
            Err(ConfigError::UnorderedBands {
                category: category.to_string(),
                bands,
            })
        }
    }
}

impl Default for CategoryBands {
    fn default() -> Self {
        Self::new(4.0, 8.0, 16.0, 32.0, 56.0)
    }
}

/// Hours added per detected complexity signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    /// Per field keyword
    pub per_field_hours: f64,
    /// Per integration keyword
    pub per_integration_hours: f64,
    /// When an upload is mentioned
    pub file_upload_hours: f64,
    /// When auth or roles are mentioned
    pub auth_roles_hours: f64,
    /// Per workflow-step keyword
    pub workflow_step_hours: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            per_field_hours: 0.5,
            per_integration_hours: 8.0,
            file_upload_hours: 4.0,
            auth_roles_hours: 4.0,
            workflow_step_hours: 2.0,
        }
    }
}

/// Multipliers on the XS band per CRUD verb family present
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudMultipliers {
    /// Create verbs
    pub crud_create_multiplier: f64,
    /// Read verbs
    pub crud_read_multiplier: f64,
    /// Update verbs
    pub crud_update_multiplier: f64,
    /// Delete verbs
    pub crud_delete_multiplier: f64,
}

impl Default for CrudMultipliers {
    fn default() -> Self {
        Self {
            crud_create_multiplier: 1.0,
            crud_read_multiplier: 0.5,
            crud_update_multiplier: 0.75,
            crud_delete_multiplier: 0.25,
        }
    }
}

/// Effective estimation policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectiveEstimationPolicy {
    /// Bands for categories without their own entry
    pub default_bands: CategoryBands,
    /// Bands per category name
    pub categories: IndexMap<String, CategoryBands>,
    /// Signal weights
    #[serde(flatten)]
    pub weights: SignalWeights,
    /// CRUD multipliers
    #[serde(flatten)]
    pub crud: CrudMultipliers,
    /// Hard cap as a multiple of the reference median
    pub reference_median_cap_multiplier: f64,
    /// Soft shrink target as a multiple of the reference median
    pub global_shrinkage_to_median: f64,
    /// Lower clamp bound per item
    pub hard_min_per_item_hours: f64,
    /// Upper clamp bound per item
    pub hard_max_per_item_hours: f64,
    /// Rounding increment (floored at 0.1 when applied)
    pub round_to_nearest_hours: f64,
    /// Keep "Adjust Existing *" categories at or below Medium
    pub cap_adjust_categories_to_max_m: bool,
}

impl EffectiveEstimationPolicy {
    /// Create default policy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With bands for a category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>, bands: CategoryBands) -> Self {
        self.categories.insert(category.into(), bands);
        self
    }

    /// With clamp bounds
    #[inline]
    #[must_use]
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.hard_min_per_item_hours = min;
        self.hard_max_per_item_hours = max;
        self
    }

    /// With rounding increment
    #[inline]
    #[must_use]
    pub fn with_rounding(mut self, step: f64) -> Self {
        self.round_to_nearest_hours = step;
        self
    }

    /// With shrinkage ceilings
    #[inline]
    #[must_use]
    pub fn with_shrinkage(mut self, cap_multiplier: f64, shrink_to_median: f64) -> Self {
        self.reference_median_cap_multiplier = cap_multiplier;
        self.global_shrinkage_to_median = shrink_to_median;
        self
    }

    /// With the adjustment-category cap toggle
    #[inline]
    #[must_use]
    pub fn with_adjust_cap(mut self, enabled: bool) -> Self {
        self.cap_adjust_categories_to_max_m = enabled;
        self
    }

    /// Bands for a category, falling back to the defaults
    ///
    /// Category names compare trimmed and ASCII case-insensitive.
    #[must_use]
    pub fn bands_for(&self, category: Option<&str>) -> CategoryBands {
        let Some(category) = category.map(str::trim) else {
            return self.default_bands;
        };
        self.categories
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(category))
            .map_or(self.default_bands, |(_, bands)| *bands)
    }

    /// Whether the Medium cap applies to this category
    #[must_use]
    pub fn adjust_cap_applies(&self, category: Option<&str>) -> bool {
        self.cap_adjust_categories_to_max_m && category.is_some_and(is_adjust_category)
    }

    /// Reject degenerate settings
    ///
    /// # Errors
    /// Returns the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative: [(&'static str, f64); 13] = [
            ("per_field_hours", self.weights.per_field_hours),
            ("per_integration_hours", self.weights.per_integration_hours),
            ("file_upload_hours", self.weights.file_upload_hours),
            ("auth_roles_hours", self.weights.auth_roles_hours),
            ("workflow_step_hours", self.weights.workflow_step_hours),
            ("crud_create_multiplier", self.crud.crud_create_multiplier),
            ("crud_read_multiplier", self.crud.crud_read_multiplier),
            ("crud_update_multiplier", self.crud.crud_update_multiplier),
            ("crud_delete_multiplier", self.crud.crud_delete_multiplier),
            ("reference_median_cap_multiplier", self.reference_median_cap_multiplier),
            ("global_shrinkage_to_median", self.global_shrinkage_to_median),
            ("hard_min_per_item_hours", self.hard_min_per_item_hours),
            ("hard_max_per_item_hours", self.hard_max_per_item_hours),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidPolicyValue { field, value });
            }
        }
        if !self.round_to_nearest_hours.is_finite() {
            return Err(ConfigError::InvalidPolicyValue {
                field: "round_to_nearest_hours",
                value: self.round_to_nearest_hours,
            });
        }
        if self.hard_min_per_item_hours > self.hard_max_per_item_hours {
            return Err(ConfigError::InvertedBounds {
                min: self.hard_min_per_item_hours,
                max: self.hard_max_per_item_hours,
            });
        }
        self.default_bands.validate("default")?;
        for (category, bands) in &self.categories {
            bands.validate(category)?;
        }
        Ok(())
    }
}

impl Default for EffectiveEstimationPolicy {
    fn default() -> Self {
        Self {
            default_bands: CategoryBands::default(),
            categories: IndexMap::new(),
            weights: SignalWeights::default(),
            crud: CrudMultipliers::default(),
            reference_median_cap_multiplier: 1.5,
            global_shrinkage_to_median: 1.25,
            hard_min_per_item_hours: 1.0,
            hard_max_per_item_hours: 120.0,
            round_to_nearest_hours: 0.5,
            cap_adjust_categories_to_max_m: true,
        }
    }
}

/// Check if a category is an "Adjust Existing *" category
#[must_use]
pub fn is_adjust_category(category: &str) -> bool {
    category
        .trim()
        .to_ascii_lowercase()
        .starts_with(ADJUST_CATEGORY_PREFIX)
}
