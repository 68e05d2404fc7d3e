//! PSE Aggregate
//!
//! Rolls a raw assessment grid up into the views pre-sales work with.
//!
//! # Core Concepts
//!
//! - [`AssessmentTaskAggregator`]: the four read-only queries plus [`AggregationSummary`]
//! - [`resolve_activity`]: item rules beat section fallbacks, first match wins
//! - [`resolve_actor`]: representative role of an item for the Gantt view
//!
//! # Example
//!
//! ```rust
//! use pse_aggregate::AssessmentTaskAggregator;
//! use pse_model::{Assessment, AssessmentItem, EstimationConfig, ItemActivityMapping, Section};
//!
//! let config = EstimationConfig::new()
//!     .with_role_mapping("BE Development", "Developer")
//!     .with_activity_mapping(ItemActivityMapping::for_section("Build", "Application Development"));
//! let assessment = Assessment::new().with_section(
//!     Section::new("Build")
//!         .with_item(AssessmentItem::new("1", "Catalog").with_estimate("BE Development", 10.0)),
//! );
//!
//! let aggregator = AssessmentTaskAggregator::new(&config);
//! let roles = aggregator.calculate_role_man_days(&assessment)?;
//! assert_eq!(roles["Developer"], 10.0);
//! # Ok::<(), pse_aggregate::AggregationError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod aggregator;
mod error;
mod resolve;
mod views;

// Re-exports
pub use aggregator::AssessmentTaskAggregator;
pub use error::AggregationError;
pub use resolve::{resolve_activity, resolve_actor};
pub use views::{
    ActivityManDayTotals, AggregationSummary, EstimationColumnTotals, GanttTask, RoleManDayTotals,
};

/// Prelude for common imports
pub mod prelude {
    //! Common imports for working with PSE Aggregate
    pub use crate::{AggregationError, AggregationSummary, AssessmentTaskAggregator, GanttTask};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
