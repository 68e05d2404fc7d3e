//! Aggregation errors
//!
//! Missing mappings are never errors; only input that breaks the contract is.

use pse_model::ModelError;

/// Aggregation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregationError {
    /// Assessment failed validation
    #[error("invalid assessment: {0}")]
    InvalidAssessment(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_model_error() {
        let err: AggregationError = ModelError::InvalidDocument("eof".to_string()).into();
        assert!(err.to_string().starts_with("invalid assessment"));
    }
}
