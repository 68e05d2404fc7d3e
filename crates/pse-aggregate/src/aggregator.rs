//! Assessment task aggregator
//!
//! Read-only queries over an `(assessment, configuration)` pair. The
//! aggregator borrows the configuration and keeps no other state, so every
//! query is repeatable and the aggregator can be shared across threads.

use indexmap::IndexMap;
use pse_model::{Assessment, AssessmentItem, EstimationConfig, Section};

use crate::error::AggregationError;
use crate::resolve::{resolve_activity, resolve_actor};
use crate::views::{
    ActivityManDayTotals, AggregationSummary, EstimationColumnTotals, GanttTask, RoleManDayTotals,
};

/// Rolls assessment estimates up into column, role, activity and Gantt views
#[derive(Debug, Clone, Copy)]
pub struct AssessmentTaskAggregator<'c> {
    config: &'c EstimationConfig,
}

impl<'c> AssessmentTaskAggregator<'c> {
    /// Create aggregator over a configuration
    #[inline]
    #[must_use]
    pub fn new(config: &'c EstimationConfig) -> Self {
        Self { config }
    }

    /// Items that pass the needed-item filter, in document order
    fn admitted<'a>(
        &self,
        assessment: &'a Assessment,
    ) -> impl Iterator<Item = (&'a Section, &'a AssessmentItem)> + 'a {
        let filter = self.config.needed_filter;
        assessment
            .items()
            .filter(move |(_, item)| filter.admits(item.is_needed))
    }

    /// Sum every populated value by exact column key
    ///
    /// No mapping is consulted. Columns nobody filled in are absent.
    ///
    /// # Errors
    /// Returns error if the assessment fails validation
    pub fn aggregate_estimation_column_effort(
        &self,
        assessment: &Assessment,
    ) -> Result<EstimationColumnTotals, AggregationError> {
        assessment.validate()?;
        Ok(self.column_totals(assessment))
    }

    /// Sum column values into the role each column maps to
    ///
    /// Columns without a role mapping are left out.
    ///
    /// # Errors
    /// Returns error if the assessment fails validation
    pub fn calculate_role_man_days(
        &self,
        assessment: &Assessment,
    ) -> Result<RoleManDayTotals, AggregationError> {
        assessment.validate()?;
        Ok(self.role_totals(assessment))
    }

    /// Sum each item's values into the activity bucket the item maps to
    ///
    /// Items without an activity rule are left out. Bucket labels go through
    /// the configured roll-up aliases.
    ///
    /// # Errors
    /// Returns error if the assessment fails validation
    pub fn calculate_activity_man_days(
        &self,
        assessment: &Assessment,
    ) -> Result<ActivityManDayTotals, AggregationError> {
        assessment.validate()?;
        Ok(self.activity_totals(assessment))
    }

    /// One task per item carrying any estimate, in document order
    ///
    /// # Errors
    /// Returns error if the assessment fails validation
    pub fn get_gantt_tasks(&self, assessment: &Assessment) -> Result<Vec<GanttTask>, AggregationError> {
        assessment.validate()?;
        Ok(self.gantt_tasks(assessment))
    }

    /// All four views plus unmapped columns and unattributed items
    ///
    /// # Errors
    /// Returns error if the assessment fails validation
    pub fn summarize(&self, assessment: &Assessment) -> Result<AggregationSummary, AggregationError> {
        assessment.validate()?;

        let column_totals = self.column_totals(assessment);
        let total_hours = column_totals.values().sum();
        let unmapped_columns = column_totals
            .keys()
            .filter(|column| self.config.role_for_column(column).is_none())
            .cloned()
            .collect();
        let unattributed_items = self
            .admitted(assessment)
            .filter(|(section, item)| {
                item.has_estimates()
                    && resolve_activity(
                        &self.config.item_activity_mappings,
                        &section.name,
                        &item.item_name,
                    )
                    .is_none()
            })
            .map(|(_, item)| item.item_name.clone())
            .collect();

        let summary = AggregationSummary {
            role_totals: self.role_totals(assessment),
            activity_totals: self.activity_totals(assessment),
            gantt_tasks: self.gantt_tasks(assessment),
            column_totals,
            total_hours,
            unmapped_columns,
            unattributed_items,
        };
        if !summary.is_fully_mapped() {
            tracing::debug!(
                unmapped_columns = summary.unmapped_columns.len(),
                unattributed_items = summary.unattributed_items.len(),
                "Assessment is only partially mapped"
            );
        }
        Ok(summary)
    }

    fn column_totals(&self, assessment: &Assessment) -> EstimationColumnTotals {
        let mut totals = EstimationColumnTotals::new();
        for (_, item) in self.admitted(assessment) {
            for (column, hours) in item.populated() {
                *totals.entry(column.to_string()).or_insert(0.0) += hours;
            }
        }
        tracing::debug!(columns = totals.len(), "Aggregated column effort");
        totals
    }

    fn role_totals(&self, assessment: &Assessment) -> RoleManDayTotals {
        let mut totals = RoleManDayTotals::new();
        for (_, item) in self.admitted(assessment) {
            for (column, hours) in item.populated() {
                match self.config.role_for_column(column) {
                    Some(role) => *totals.entry(role.to_string()).or_insert(0.0) += hours,
                    None => tracing::trace!(column, "No role mapping for column"),
                }
            }
        }
        tracing::debug!(roles = totals.len(), "Calculated role man-days");
        totals
    }

    fn activity_totals(&self, assessment: &Assessment) -> ActivityManDayTotals {
        // bucket -> (lowest display order feeding it, hours)
        let mut buckets: IndexMap<String, (i32, f64)> = IndexMap::new();
        for (section, item) in self.admitted(assessment) {
            if !item.has_estimates() {
                continue;
            }
            let Some(rule) = resolve_activity(
                &self.config.item_activity_mappings,
                &section.name,
                &item.item_name,
            ) else {
                tracing::trace!(
                    section = %section.name,
                    item = %item.item_name,
                    "No activity mapping for item"
                );
                continue;
            };
            let bucket = self.config.bucket_for_activity(&rule.activity_name);
            let entry = buckets
                .entry(bucket.to_string())
                .or_insert((rule.display_order, 0.0));
            entry.0 = entry.0.min(rule.display_order);
            entry.1 += item.total_hours();
        }

        buckets.sort_by(|_, (a, _), _, (b, _)| a.cmp(b));
        tracing::debug!(activities = buckets.len(), "Calculated activity man-days");
        buckets
            .into_iter()
            .map(|(bucket, (_, hours))| (bucket, hours))
            .collect()
    }

    fn gantt_tasks(&self, assessment: &Assessment) -> Vec<GanttTask> {
        let tasks: Vec<GanttTask> = self
            .admitted(assessment)
            .filter(|(_, item)| item.has_estimates())
            .map(|(section, item)| GanttTask {
                detail: item.item_name.clone(),
                activity_group: resolve_activity(
                    &self.config.item_activity_mappings,
                    &section.name,
                    &item.item_name,
                )
                .map(|rule| rule.activity_name.clone()),
                actor: resolve_actor(self.config, item).map(str::to_string),
                man_days: item.total_hours(),
            })
            .collect();
        tracing::debug!(tasks = tasks.len(), "Built Gantt tasks");
        tasks
    }
}
