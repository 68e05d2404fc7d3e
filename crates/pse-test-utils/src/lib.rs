//! Testing utilities for PSE workspace
//!
//! Shared fixtures, builders and proptest strategies.

#![allow(missing_docs)]

use pse_model::{
    Assessment, AssessmentItem, EstimationConfig, ItemActivityMapping, Section,
};
use proptest::prelude::*;

/// Estimation columns of the reference template with their roles
pub const REFERENCE_COLUMNS: [(&str, &str); 6] = [
    ("Business Analyst", "Business Analyst"),
    ("Requirement & Documentation", "Business Analyst"),
    ("Architect Setup", "Architect"),
    ("BE Development", "Developer"),
    ("FE Development", "Developer"),
    ("SIT (Manual by QA)", "Quality Engineer"),
];

/// Column mappings, activity rules and the `Application Development → Development` roll-up
pub fn reference_config() -> EstimationConfig {
    let config = REFERENCE_COLUMNS
        .iter()
        .fold(EstimationConfig::new(), |config, (column, role)| {
            config.with_role_mapping(*column, *role)
        });
    config
        .with_activity_mapping(
            ItemActivityMapping::for_section("Analysis & Design", "Analysis & Design").with_order(1),
        )
        .with_activity_mapping(
            ItemActivityMapping::for_section("Development", "Application Development").with_order(2),
        )
        .with_activity_mapping(
            ItemActivityMapping::for_item("SIT (Manual by QA)", "Testing & QA").with_order(3),
        )
        .with_rollup("Application Development", "Development")
}

/// One item per reference column, each carrying only its own column
pub fn reference_assessment() -> Assessment {
    Assessment::new()
        .with_section(
            Section::new("Analysis & Design")
                .with_item(item("BA-1", "Business Analyst", &[("Business Analyst", 2.0)]))
                .with_item(item(
                    "BA-2",
                    "Requirement & Documentation",
                    &[("Requirement & Documentation", 6.0)],
                ))
                .with_item(item("AR-1", "Architect Setup", &[("Architect Setup", 3.0)])),
        )
        .with_section(
            Section::new("Development")
                .with_item(item("DEV-1", "BE Development", &[("BE Development", 10.0)]))
                .with_item(item("DEV-2", "FE Development", &[("FE Development", 5.0)])),
        )
        .with_section(
            Section::new("Testing")
                .with_item(item("QA-1", "SIT (Manual by QA)", &[("SIT (Manual by QA)", 2.0)])),
        )
}

/// Build an item from `(column, hours)` pairs
pub fn item(id: &str, name: &str, estimates: &[(&str, f64)]) -> AssessmentItem {
    estimates
        .iter()
        .fold(AssessmentItem::new(id, name), |item, (column, hours)| {
            item.with_estimate(*column, *hours)
        })
}

/// Deterministic assessment of `sections × items_per_section` items over the reference columns
pub fn large_assessment(sections: usize, items_per_section: usize) -> Assessment {
    let section_names = ["Analysis & Design", "Development", "Testing", "Unmapped"];
    (0..sections).fold(Assessment::new(), |assessment, s| {
        let name = section_names[s % section_names.len()];
        let section = (0..items_per_section).fold(Section::new(name), |section, i| {
            let mut item = AssessmentItem::new(format!("{s}-{i}"), format!("Item {s}-{i}"));
            for (c, (column, _)) in REFERENCE_COLUMNS.iter().enumerate() {
                if (s + i + c) % 3 != 0 {
                    #[allow(clippy::cast_precision_loss)]
                    let hours = ((s * 7 + i * 3 + c) % 16) as f64 * 0.5;
                    item = item.with_estimate(*column, hours);
                }
            }
            section.with_item(item)
        });
        assessment.with_section(section)
    })
}

/// Column names drawn from the reference template plus unmapped extras
pub fn column_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => proptest::sample::select(REFERENCE_COLUMNS.iter().map(|(c, _)| c.to_string()).collect::<Vec<_>>()),
        1 => Just("Data Migration".to_string()),
        1 => Just("Infra Setup".to_string()),
    ]
}

/// Item with up to six columns, some left empty
pub fn item_strategy() -> impl Strategy<Value = AssessmentItem> {
    (
        "[A-Z][a-z]{2,8}",
        proptest::collection::vec(
            (column_strategy(), proptest::option::weighted(0.8, 0.0..40.0f64)),
            0..6,
        ),
        any::<bool>(),
    )
        .prop_map(|(name, estimates, is_needed)| {
            let mut item = AssessmentItem::new(name.to_lowercase(), name).needed(is_needed);
            for (column, hours) in estimates {
                item.estimates.insert(column, hours);
            }
            item
        })
}

/// Assessment over the reference section names plus one unmapped section
pub fn assessment_strategy() -> impl Strategy<Value = Assessment> {
    proptest::collection::vec(
        (
            proptest::sample::select(vec!["Analysis & Design", "Development", "Testing", "Misc"]),
            proptest::collection::vec(item_strategy(), 0..6),
        ),
        0..5,
    )
    .prop_map(|sections| {
        sections
            .into_iter()
            .fold(Assessment::new(), |assessment, (name, items)| {
                let section = items
                    .into_iter()
                    .fold(Section::new(name), Section::with_item);
                assessment.with_section(section)
            })
    })
}

/// Sum of every populated value, computed independently of the aggregator
pub fn raw_total(assessment: &Assessment) -> f64 {
    assessment
        .sections
        .iter()
        .flat_map(|s| s.items.iter())
        .flat_map(|i| i.estimates.values())
        .filter_map(|v| *v)
        .sum()
}

/// Compare sums with tolerance for summation order
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}
