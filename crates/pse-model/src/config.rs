//! Estimation configuration
//!
//! Mapping tables are flat, ordered lists scanned first-match-wins. The whole
//! configuration is validated when it is loaded so that degenerate settings
//! surface to the caller before any aggregation runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::policy::EffectiveEstimationPolicy;

/// Maps an item, or a whole section, to an activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemActivityMapping {
    /// Section the rule is scoped to
    #[serde(default)]
    pub section_name: Option<String>,
    /// Item the rule targets; empty means section-level fallback
    #[serde(default)]
    pub item_name: Option<String>,
    /// Activity label
    pub activity_name: String,
    /// Ordering of the activity in rolled-up views
    #[serde(default)]
    pub display_order: i32,
}

impl ItemActivityMapping {
    /// Rule for a specific item
    #[must_use]
    pub fn for_item(item_name: impl Into<String>, activity_name: impl Into<String>) -> Self {
        Self {
            section_name: None,
            item_name: Some(item_name.into()),
            activity_name: activity_name.into(),
            display_order: 0,
        }
    }

    /// Fallback rule for every item of a section
    #[must_use]
    pub fn for_section(section_name: impl Into<String>, activity_name: impl Into<String>) -> Self {
        Self {
            section_name: Some(section_name.into()),
            item_name: None,
            activity_name: activity_name.into(),
            display_order: 0,
        }
    }

    /// Scope an item rule to a section
    #[inline]
    #[must_use]
    pub fn in_section(mut self, section_name: impl Into<String>) -> Self {
        self.section_name = Some(section_name.into());
        self
    }

    /// With display order
    #[inline]
    #[must_use]
    pub fn with_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    /// Item name when set and non-blank
    #[inline]
    #[must_use]
    pub fn item(&self) -> Option<&str> {
        non_blank(self.item_name.as_deref())
    }

    /// Section name when set and non-blank
    #[inline]
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        non_blank(self.section_name.as_deref())
    }

    /// Check if this is a section-level fallback
    #[inline]
    #[must_use]
    pub fn is_section_fallback(&self) -> bool {
        self.item().is_none() && self.section().is_some()
    }
}

/// Maps an estimation column to a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationColumnRoleMapping {
    /// Column name
    pub estimation_column: String,
    /// Role label
    pub role_name: String,
}

impl EstimationColumnRoleMapping {
    /// Create mapping
    #[inline]
    #[must_use]
    pub fn new(estimation_column: impl Into<String>, role_name: impl Into<String>) -> Self {
        Self {
            estimation_column: estimation_column.into(),
            role_name: role_name.into(),
        }
    }
}

/// Renames an activity when it is rolled up into activity totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRollup {
    /// Configured activity name
    pub activity_name: String,
    /// Bucket label in activity totals
    pub bucket: String,
}

impl ActivityRollup {
    /// Create alias
    #[inline]
    #[must_use]
    pub fn new(activity_name: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            activity_name: activity_name.into(),
            bucket: bucket.into(),
        }
    }
}

/// Which items take part in aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeededItemFilter {
    /// Every item with values contributes - default
    #[default]
    IncludeAll,
    /// Items marked not needed are skipped
    NeededOnly,
}

impl NeededItemFilter {
    /// Check if an item with this flag takes part
    #[inline]
    #[must_use]
    pub fn admits(self, is_needed: bool) -> bool {
        match self {
            Self::IncludeAll => true,
            Self::NeededOnly => is_needed,
        }
    }
}

/// Configuration supplied once per computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    /// Item → activity rules
    pub item_activity_mappings: Vec<ItemActivityMapping>,
    /// Column → role rules
    pub column_role_mappings: Vec<EstimationColumnRoleMapping>,
    /// Activity bucket aliases
    pub activity_rollups: Vec<ActivityRollup>,
    /// Needed-item filter
    pub needed_filter: NeededItemFilter,
    /// Numeric policy
    pub policy: EffectiveEstimationPolicy,
}

impl EstimationConfig {
    /// Create empty configuration with default policy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item → activity rule
    #[must_use]
    pub fn with_activity_mapping(mut self, mapping: ItemActivityMapping) -> Self {
        self.item_activity_mappings.push(mapping);
        self
    }

    /// Add a column → role rule
    #[must_use]
    pub fn with_role_mapping(
        mut self,
        estimation_column: impl Into<String>,
        role_name: impl Into<String>,
    ) -> Self {
        self.column_role_mappings
            .push(EstimationColumnRoleMapping::new(estimation_column, role_name));
        self
    }

    /// Add an activity alias
    #[must_use]
    pub fn with_rollup(mut self, activity_name: impl Into<String>, bucket: impl Into<String>) -> Self {
        self.activity_rollups
            .push(ActivityRollup::new(activity_name, bucket));
        self
    }

    /// With needed-item filter
    #[inline]
    #[must_use]
    pub fn with_needed_filter(mut self, filter: NeededItemFilter) -> Self {
        self.needed_filter = filter;
        self
    }

    /// With policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: EffectiveEstimationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Role for a column: first matching mapping wins
    #[must_use]
    pub fn role_for_column(&self, column: &str) -> Option<&str> {
        self.column_role_mappings
            .iter()
            .find(|m| names_match(&m.estimation_column, column))
            .map(|m| m.role_name.as_str())
    }

    /// Roll-up bucket for a configured activity name
    #[must_use]
    pub fn bucket_for_activity<'a>(&'a self, activity_name: &'a str) -> &'a str {
        self.activity_rollups
            .iter()
            .find(|r| names_match(&r.activity_name, activity_name))
            .map_or(activity_name, |r| r.bucket.as_str())
    }

    /// Parse and validate a JSON configuration
    ///
    /// # Errors
    /// Returns error if the JSON is invalid or the content fails validation
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML configuration
    ///
    /// # Errors
    /// Returns error if the YAML is invalid or the content fails validation
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML configuration
    ///
    /// # Errors
    /// Returns error if the TOML is invalid or the content fails validation
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, picking the format by extension
    ///
    /// # Errors
    /// Returns error if the file cannot be read, the extension is unknown,
    /// or the content fails to parse or validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let config = match ext.as_str() {
            "json" => Self::from_json(&text)?,
            "yaml" | "yml" => Self::from_yaml(&text)?,
            "toml" => Self::from_toml(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        tracing::info!(
            path = %path.display(),
            activity_rules = config.item_activity_mappings.len(),
            role_rules = config.column_role_mappings.len(),
            "Loaded estimation config"
        );
        Ok(config)
    }

    /// Reject unusable mapping rows and degenerate policy settings
    ///
    /// # Errors
    /// Returns the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (row, mapping) in self.item_activity_mappings.iter().enumerate() {
            if mapping.activity_name.trim().is_empty() {
                return Err(ConfigError::InvalidMapping {
                    row,
                    reason: "activity name is empty".to_string(),
                });
            }
            if mapping.item().is_none() && mapping.section().is_none() {
                return Err(ConfigError::InvalidMapping {
                    row,
                    reason: format!(
                        "activity '{}' names neither a section nor an item",
                        mapping.activity_name
                    ),
                });
            }
        }
        for (row, mapping) in self.column_role_mappings.iter().enumerate() {
            if mapping.estimation_column.trim().is_empty() || mapping.role_name.trim().is_empty() {
                return Err(ConfigError::InvalidMapping {
                    row,
                    reason: "column and role names must be non-empty".to_string(),
                });
            }
        }
        for (row, rollup) in self.activity_rollups.iter().enumerate() {
            if rollup.activity_name.trim().is_empty() || rollup.bucket.trim().is_empty() {
                return Err(ConfigError::InvalidMapping {
                    row,
                    reason: "roll-up activity and bucket must be non-empty".to_string(),
                });
            }
        }
        self.policy.validate()
    }
}

/// Compare two names the way mapping tables do: trimmed, ASCII case-insensitive
#[inline]
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_lookup_is_first_match_and_case_insensitive() {
        let config = EstimationConfig::new()
            .with_role_mapping("BE Development", "Developer")
            .with_role_mapping("be development", "Backend");
        assert_eq!(config.role_for_column("BE DEVELOPMENT"), Some("Developer"));
        assert_eq!(config.role_for_column("Unknown"), None);
    }

    #[test]
    fn bucket_defaults_to_activity_name() {
        let config =
            EstimationConfig::new().with_rollup("Application Development", "Development");
        assert_eq!(
            config.bucket_for_activity("Application Development"),
            "Development"
        );
        assert_eq!(config.bucket_for_activity("Testing & QA"), "Testing & QA");
    }

    #[test]
    fn blank_item_name_is_section_fallback() {
        let mut mapping = ItemActivityMapping::for_section("Core", "Build");
        mapping.item_name = Some("  ".to_string());
        assert!(mapping.is_section_fallback());
        assert!(!ItemActivityMapping::for_item("Login", "Build").is_section_fallback());
    }

    #[test]
    fn needed_filter_admits() {
        assert!(NeededItemFilter::IncludeAll.admits(false));
        assert!(!NeededItemFilter::NeededOnly.admits(false));
        assert!(NeededItemFilter::NeededOnly.admits(true));
    }

    #[test]
    fn validate_rejects_unscoped_mapping() {
        let config = EstimationConfig::new().with_activity_mapping(ItemActivityMapping {
            section_name: None,
            item_name: Some(String::new()),
            activity_name: "Build".to_string(),
            display_order: 1,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMapping { row: 0, .. })
        ));
    }

    #[test]
    fn validate_rejects_blank_role() {
        let config = EstimationConfig::new().with_role_mapping("QA", " ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_json_uses_defaults_for_missing_sections() {
        let config = EstimationConfig::from_json(
            r#"{"column_role_mappings": [{"estimation_column": "QA", "role_name": "Tester"}]}"#,
        )
        .unwrap();
        assert_eq!(config.role_for_column("qa"), Some("Tester"));
        assert_eq!(config.needed_filter, NeededItemFilter::IncludeAll);
        assert_eq!(config.policy, EffectiveEstimationPolicy::default());
    }

    #[test]
    fn from_json_surfaces_inverted_bounds() {
        let result = EstimationConfig::from_json(
            r#"{"policy": {"hard_min_per_item_hours": 9, "hard_max_per_item_hours": 3}}"#,
        );
        assert!(matches!(result, Err(ConfigError::InvertedBounds { .. })));
    }
}
