//! PSE Scoring
//!
//! Per-item estimate shaping: complexity signals, size bands and the numeric
//! normalizer, plus an [`ItemEstimator`] that composes them.
//!
//! # Core Concepts
//!
//! - [`extract_signals`]: bilingual keyword scan of an item description
//! - [`pick_size_class`]: raw hours → XS…XL against category bands
//! - [`clamp`] / [`round`] / [`apply_reference_shrinkage`]: pure numeric transforms
//! - [`ItemEstimator`]: signals → weighted hours → band → normalized hours
//!
//! # Example
//!
//! ```rust
//! use pse_model::{CategoryBands, EffectiveEstimationPolicy};
//! use pse_scoring::{pick_size_class, ItemEstimator, SizeClass};
//!
//! let bands = CategoryBands::new(4.0, 8.0, 16.0, 32.0, 56.0);
//! assert_eq!(pick_size_class(4.01, &bands, false), SizeClass::S);
//!
//! let policy = EffectiveEstimationPolicy::default();
//! let estimate = ItemEstimator::new(&policy)
//!     .estimate(Some("Upload attachment with approval workflow"), None, None);
//! assert!(estimate.hours >= policy.hard_min_per_item_hours);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod estimator;
mod normalizer;
mod signals;
mod size_class;

// Re-exports
pub use estimator::{ItemEstimate, ItemEstimator};
pub use normalizer::{apply_reference_shrinkage, clamp, round, rounding_step, MIN_ROUNDING_STEP};
pub use signals::{extract_signals, Signals};
pub use size_class::{pick_size_class, SizeClass};

/// Prelude for common imports
pub mod prelude {
    //! Common imports for working with PSE Scoring
    pub use crate::{extract_signals, pick_size_class, ItemEstimate, ItemEstimator, SizeClass};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
