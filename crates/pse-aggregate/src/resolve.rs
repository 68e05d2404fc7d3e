//! Mapping resolution
//!
//! Lookups over the configuration's flat rule lists. Activity rules resolve
//! in two tiers: item-specific rules first, then section-level fallbacks.
//! Within a tier the first matching row wins.

use indexmap::IndexMap;
use pse_model::{names_match, AssessmentItem, EstimationConfig, ItemActivityMapping};

/// Resolve the activity rule for an item in a section
#[must_use]
pub fn resolve_activity<'c>(
    mappings: &'c [ItemActivityMapping],
    section_name: &str,
    item_name: &str,
) -> Option<&'c ItemActivityMapping> {
    let item_rule = mappings.iter().find(|m| {
        m.item().is_some_and(|item| names_match(item, item_name))
            && m.section().map_or(true, |section| names_match(section, section_name))
    });
    item_rule.or_else(|| {
        mappings
            .iter()
            .find(|m| m.is_section_fallback() && m.section().is_some_and(|s| names_match(s, section_name)))
    })
}

/// Pick the role that represents an item in the Gantt view
///
/// Hours are grouped by resolved role; the heaviest role wins and ties go to
/// the role of the earliest populated column. `None` when no populated
/// column maps to a role.
#[must_use]
pub fn resolve_actor<'c>(config: &'c EstimationConfig, item: &AssessmentItem) -> Option<&'c str> {
    let mut per_role: IndexMap<&str, f64> = IndexMap::new();
    for (column, hours) in item.populated() {
        if let Some(role) = config.role_for_column(column) {
            *per_role.entry(role).or_insert(0.0) += hours;
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (role, hours) in per_role {
        match best {
            Some((_, top)) if hours <= top => {}
            _ => best = Some((role, hours)),
        }
    }
    best.map(|(role, _)| role)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mappings() -> Vec<ItemActivityMapping> {
        vec![
            ItemActivityMapping::for_section("Development", "Application Development"),
            ItemActivityMapping::for_item("Deployment", "Go Live").in_section("Development"),
            ItemActivityMapping::for_item("Login", "Security"),
        ]
    }

    #[test]
    fn item_rule_beats_section_fallback() {
        let mappings = mappings();
        let rule = resolve_activity(&mappings, "Development", "Deployment").unwrap();
        assert_eq!(rule.activity_name, "Go Live");
    }

    #[test]
    fn section_fallback_applies_to_other_items() {
        let mappings = mappings();
        let rule = resolve_activity(&mappings, "development", "BE Development").unwrap();
        assert_eq!(rule.activity_name, "Application Development");
    }

    #[test]
    fn scoped_item_rule_ignores_other_sections() {
        let mappings = mappings();
        assert!(resolve_activity(&mappings, "Operations", "Deployment").is_none());
    }

    #[test]
    fn unscoped_item_rule_matches_any_section() {
        let mappings = mappings();
        let rule = resolve_activity(&mappings, "Anything", "LOGIN").unwrap();
        assert_eq!(rule.activity_name, "Security");
    }

    #[test]
    fn first_item_rule_wins() {
        let mut mappings = mappings();
        mappings.push(ItemActivityMapping::for_item("Login", "Other"));
        let rule = resolve_activity(&mappings, "Anything", "Login").unwrap();
        assert_eq!(rule.activity_name, "Security");
    }

    #[test]
    fn first_section_fallback_wins() {
        let mappings = vec![
            ItemActivityMapping::for_section("Support", "First"),
            ItemActivityMapping::for_section("support", "Second"),
        ];
        let rule = resolve_activity(&mappings, "SUPPORT", "Ticket triage").unwrap();
        assert_eq!(rule.activity_name, "First");
    }

    #[test]
    fn actor_is_heaviest_role() {
        let config = EstimationConfig::new()
            .with_role_mapping("Business Analyst", "Business Analyst")
            .with_role_mapping("BE Development", "Developer")
            .with_role_mapping("FE Development", "Developer");
        let item = AssessmentItem::new("1", "Checkout")
            .with_estimate("Business Analyst", 6.0)
            .with_estimate("BE Development", 4.0)
            .with_estimate("FE Development", 3.0);
        assert_eq!(resolve_actor(&config, &item), Some("Developer"));
    }

    #[test]
    fn actor_tie_goes_to_earliest_column() {
        let config = EstimationConfig::new()
            .with_role_mapping("QA", "Quality Engineer")
            .with_role_mapping("BE", "Developer");
        let item = AssessmentItem::new("1", "Report")
            .with_estimate("QA", 2.0)
            .with_estimate("BE", 2.0);
        assert_eq!(resolve_actor(&config, &item), Some("Quality Engineer"));
    }

    #[test]
    fn actor_none_without_role_mapping() {
        let config = EstimationConfig::new();
        let item = AssessmentItem::new("1", "Report").with_estimate("QA", 2.0);
        assert_eq!(resolve_actor(&config, &item), None);
    }
}
