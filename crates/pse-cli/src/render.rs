//! Plain-text and JSON rendering of command results

use std::fmt::Write as _;

use indexmap::IndexMap;
use pse_aggregate::AggregationSummary;
use pse_scoring::ItemEstimate;
use serde::Serialize;

/// Pretty JSON for any serializable result
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn table(out: &mut String, title: &str, totals: &IndexMap<String, f64>) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.len()));
    if totals.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    let width = totals.keys().map(String::len).max().unwrap_or(0);
    for (name, hours) in totals {
        let _ = writeln!(out, "  {name:<width$}  {hours:>8.2}");
    }
    let _ = writeln!(out);
}

/// Human-readable aggregation report
#[must_use]
pub fn summary_text(summary: &AggregationSummary) -> String {
    let mut out = String::new();
    table(&mut out, "Estimation Columns", &summary.column_totals);
    table(&mut out, "Role Man-Days", &summary.role_totals);
    table(&mut out, "Activity Man-Days", &summary.activity_totals);

    let _ = writeln!(out, "Gantt Tasks");
    let _ = writeln!(out, "===========");
    for task in &summary.gantt_tasks {
        let _ = writeln!(
            out,
            "  {} | {} | {} | {:.2}",
            task.detail,
            task.activity_group.as_deref().unwrap_or("-"),
            task.actor.as_deref().unwrap_or("-"),
            task.man_days
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Total: {:.2}", summary.total_hours);

    if !summary.unmapped_columns.is_empty() {
        let _ = writeln!(out, "Unmapped columns: {}", summary.unmapped_columns.join(", "));
    }
    if !summary.unattributed_items.is_empty() {
        let _ = writeln!(out, "Unattributed items: {}", summary.unattributed_items.join(", "));
    }
    out
}

/// Human-readable single-item estimate
#[must_use]
pub fn estimate_text(estimate: &ItemEstimate) -> String {
    let s = &estimate.signals;
    let mut out = String::new();
    let _ = writeln!(out, "Size:  {}", estimate.size_class);
    let _ = writeln!(out, "Raw:   {:.2}", estimate.raw_hours);
    let _ = writeln!(out, "Hours: {:.2}", estimate.hours);
    if estimate.capped {
        let _ = writeln!(out, "Capped at M");
    }
    let _ = writeln!(
        out,
        "Signals: fields={} integrations={} workflow={} upload={} auth={} crud={}",
        s.field_count,
        s.integration_count,
        s.workflow_step_count,
        s.has_upload,
        s.has_auth_roles,
        s.crud_families()
    );
    out
}
