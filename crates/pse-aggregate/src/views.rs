//! Derived views returned by the aggregator

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column name → summed hours, in order of first appearance
pub type EstimationColumnTotals = IndexMap<String, f64>;

/// Role name → summed hours, in order of first appearance
pub type RoleManDayTotals = IndexMap<String, f64>;

/// Activity bucket → summed hours, ordered by display order
pub type ActivityManDayTotals = IndexMap<String, f64>;

/// One Gantt chart row per estimated item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttTask {
    /// Item name
    pub detail: String,
    /// Configured activity name, if any rule matched
    pub activity_group: Option<String>,
    /// Representative role, if any column mapped
    pub actor: Option<String>,
    /// Sum of the item's estimates
    pub man_days: f64,
}

/// All four views plus coverage diagnostics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationSummary {
    /// Per-column totals
    pub column_totals: EstimationColumnTotals,
    /// Per-role totals
    pub role_totals: RoleManDayTotals,
    /// Per-activity totals
    pub activity_totals: ActivityManDayTotals,
    /// Gantt rows
    pub gantt_tasks: Vec<GanttTask>,
    /// Sum of every admitted estimate
    pub total_hours: f64,
    /// Populated columns with no role mapping
    pub unmapped_columns: Vec<String>,
    /// Estimated items with no activity mapping
    pub unattributed_items: Vec<String>,
}

impl AggregationSummary {
    /// Check if every populated column and estimated item was mapped
    #[inline]
    #[must_use]
    pub fn is_fully_mapped(&self) -> bool {
        self.unmapped_columns.is_empty() && self.unattributed_items.is_empty()
    }

    /// Hours that reached a role bucket
    #[must_use]
    pub fn role_hours(&self) -> f64 {
        self.role_totals.values().sum()
    }

    /// Hours that reached an activity bucket
    #[must_use]
    pub fn activity_hours(&self) -> f64 {
        self.activity_totals.values().sum()
    }
}
