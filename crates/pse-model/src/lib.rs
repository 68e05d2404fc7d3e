//! PSE Model
//!
//! Plain data handed to the estimation engine.
//!
//! # Core Concepts
//!
//! - [`Assessment`]: sections of items carrying hours per estimation column
//! - [`EstimationConfig`]: item → activity and column → role mapping tables
//! - [`EffectiveEstimationPolicy`]: bands, weights, clamp/round/shrink knobs
//! - [`NeededItemFilter`]: whether not-needed items take part
//!
//! # Example
//!
//! ```rust
//! use pse_model::{Assessment, AssessmentItem, EstimationConfig, Section};
//!
//! let assessment = Assessment::new().with_section(
//!     Section::new("Portal")
//!         .with_item(AssessmentItem::new("1", "Login").with_estimate("BE Development", 6.0)),
//! );
//! assert!(assessment.validate().is_ok());
//!
//! let config = EstimationConfig::new().with_role_mapping("BE Development", "Developer");
//! assert_eq!(config.role_for_column("be development"), Some("Developer"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod assessment;
pub mod config;
pub mod error;
pub mod policy;

// Re-exports
pub use assessment::{Assessment, AssessmentItem, Estimates, Section};
pub use config::{
    names_match, ActivityRollup, EstimationColumnRoleMapping, EstimationConfig,
    ItemActivityMapping, NeededItemFilter,
};
pub use error::{ConfigError, ModelError};
pub use policy::{
    is_adjust_category, CategoryBands, CrudMultipliers, EffectiveEstimationPolicy, SignalWeights,
};

/// Prelude for common imports
pub mod prelude {
    //! Common imports for working with PSE Model
    pub use crate::{
        Assessment, AssessmentItem, EffectiveEstimationPolicy, EstimationConfig,
        ItemActivityMapping, NeededItemFilter, Section,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
