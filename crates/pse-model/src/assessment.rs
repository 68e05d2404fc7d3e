//! Assessment documents
//!
//! An [`Assessment`] is the grid being estimated: ordered sections of items,
//! each item carrying optional hours per estimation column. Column names are
//! free-form strings defined by the originating template.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Hours per estimation column, in template order
pub type Estimates = IndexMap<String, Option<f64>>;

/// A complete assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Sections in document order
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Assessment {
    /// Create empty assessment
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a JSON document
    ///
    /// # Errors
    /// Returns error if the document is malformed or fails [`Assessment::validate`]
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let assessment: Self =
            serde_json::from_str(json).map_err(|e| ModelError::InvalidDocument(e.to_string()))?;
        assessment.validate()?;
        Ok(assessment)
    }

    /// Append a section
    #[inline]
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Iterate `(section, item)` pairs in document order
    pub fn items(&self) -> impl Iterator<Item = (&Section, &AssessmentItem)> {
        self.sections
            .iter()
            .flat_map(|section| section.items.iter().map(move |item| (section, item)))
    }

    /// Sum of every populated estimate
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.items().map(|(_, item)| item.total_hours()).sum()
    }

    /// Check the input contract: every populated value is finite and non-negative
    ///
    /// # Errors
    /// Returns the first offending value, naming its section, item and column
    pub fn validate(&self) -> Result<(), ModelError> {
        for (section, item) in self.items() {
            for (column, value) in item.populated() {
                if !value.is_finite() {
                    return Err(ModelError::NonFiniteHours {
                        section: section.name.clone(),
                        item: item.item_name.clone(),
                        column: column.to_string(),
                    });
                }
                if value < 0.0 {
                    return Err(ModelError::NegativeHours {
                        section: section.name.clone(),
                        item: item.item_name.clone(),
                        column: column.to_string(),
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

/// A named group of items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Section name (its identity for section-level mappings)
    pub name: String,
    /// Items in document order
    #[serde(default)]
    pub items: Vec<AssessmentItem>,
}

impl Section {
    /// Create empty section
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Append an item
    #[inline]
    #[must_use]
    pub fn with_item(mut self, item: AssessmentItem) -> Self {
        self.items.push(item);
        self
    }
}

/// One line item of an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentItem {
    /// Stable identifier from the template
    #[serde(default)]
    pub item_id: String,
    /// Display name
    pub item_name: String,
    /// Free-text description
    #[serde(default)]
    pub item_detail: Option<String>,
    /// Estimation category (selects effort bands)
    #[serde(default)]
    pub category: Option<String>,
    /// Whether the customer needs this item
    #[serde(default = "default_needed")]
    pub is_needed: bool,
    /// Hours per estimation column
    #[serde(default)]
    pub estimates: Estimates,
}

fn default_needed() -> bool {
    true
}

impl AssessmentItem {
    /// Create item with no estimates
    #[must_use]
    pub fn new(item_id: impl Into<String>, item_name: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            item_name: item_name.into(),
            item_detail: None,
            category: None,
            is_needed: true,
            estimates: Estimates::new(),
        }
    }

    /// With free-text detail
    #[inline]
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.item_detail = Some(detail.into());
        self
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// With needed flag
    #[inline]
    #[must_use]
    pub fn needed(mut self, is_needed: bool) -> Self {
        self.is_needed = is_needed;
        self
    }

    /// With an hour value for a column
    #[inline]
    #[must_use]
    pub fn with_estimate(mut self, column: impl Into<String>, hours: f64) -> Self {
        self.estimates.insert(column.into(), Some(hours));
        self
    }

    /// With an explicitly empty column
    #[inline]
    #[must_use]
    pub fn with_empty_estimate(mut self, column: impl Into<String>) -> Self {
        self.estimates.insert(column.into(), None);
        self
    }

    /// Populated `(column, hours)` pairs in column order
    pub fn populated(&self) -> impl Iterator<Item = (&str, f64)> {
        self.estimates
            .iter()
            .filter_map(|(column, value)| value.map(|hours| (column.as_str(), hours)))
    }

    /// Check if any column carries a value
    #[inline]
    #[must_use]
    pub fn has_estimates(&self) -> bool {
        self.estimates.values().any(Option::is_some)
    }

    /// Sum of populated values
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.populated().map(|(_, hours)| hours).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Assessment {
        Assessment::new().with_section(
            Section::new("Portal")
                .with_item(
                    AssessmentItem::new("1", "Login")
                        .with_estimate("BE Development", 4.0)
                        .with_empty_estimate("FE Development")
                        .with_estimate("SIT (Manual by QA)", 1.5),
                )
                .with_item(AssessmentItem::new("2", "Logout")),
        )
    }

    #[test]
    fn populated_skips_empty_columns() {
        let assessment = sample();
        let (_, login) = assessment.items().next().unwrap();
        let cols: Vec<_> = login.populated().map(|(c, _)| c).collect();
        assert_eq!(cols, vec!["BE Development", "SIT (Manual by QA)"]);
        assert!(login.has_estimates());
    }

    #[test]
    fn total_hours_sums_populated_values() {
        assert!((sample().total_hours() - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_rejects_negative_hours() {
        let assessment = Assessment::new().with_section(
            Section::new("Portal")
                .with_item(AssessmentItem::new("1", "Login").with_estimate("QA", -1.0)),
        );
        let err = assessment.validate().unwrap_err();
        assert!(matches!(err, ModelError::NegativeHours { value, .. } if value == -1.0));
    }

    #[test]
    fn validate_rejects_nan() {
        let assessment = Assessment::new().with_section(
            Section::new("Portal")
                .with_item(AssessmentItem::new("1", "Login").with_estimate("QA", f64::NAN)),
        );
        assert!(matches!(
            assessment.validate(),
            Err(ModelError::NonFiniteHours { .. })
        ));
    }

    #[test]
    fn from_json_reads_camel_case_document() {
        let json = r#"{
            "sections": [{
                "name": "Portal",
                "items": [{
                    "itemId": "a1",
                    "itemName": "Login",
                    "itemDetail": "User login with role based access",
                    "category": "New UI",
                    "estimates": {"BE Development": 3, "FE Development": null}
                }]
            }]
        }"#;
        let assessment = Assessment::from_json(json).unwrap();
        let (section, item) = assessment.items().next().unwrap();
        assert_eq!(section.name, "Portal");
        assert!(item.is_needed);
        assert_eq!(item.estimates.len(), 2);
        assert_eq!(item.estimates["FE Development"], None);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            Assessment::from_json("not json"),
            Err(ModelError::InvalidDocument(_))
        ));
    }
}
