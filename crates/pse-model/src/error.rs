//! Error types for the PSE model
//!
//! Two families:
//! - [`ModelError`]: an assessment document that breaks the input contract
//! - [`ConfigError`]: a configuration that cannot be loaded or is degenerate

use std::path::PathBuf;

/// Assessment validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Hour value below zero
    #[error("negative hours {value} in section '{section}', item '{item}', column '{column}'")]
    NegativeHours {
        /// Section name
        section: String,
        /// Item name
        item: String,
        /// Estimation column
        column: String,
        /// Offending value
        value: f64,
    },

    /// NaN or infinite hour value
    #[error("non-finite hours in section '{section}', item '{item}', column '{column}'")]
    NonFiniteHours {
        /// Section name
        section: String,
        /// Item name
        item: String,
        /// Estimation column
        column: String,
    },

    /// Document could not be parsed
    #[error("invalid assessment document: {0}")]
    InvalidDocument(String),
}

impl ModelError {
    /// Name of the item the error points at, if any
    #[must_use]
    pub fn item(&self) -> Option<&str> {
        match self {
            Self::NegativeHours { item, .. } | Self::NonFiniteHours { item, .. } => Some(item),
            Self::InvalidDocument(_) => None,
        }
    }
}

/// Configuration load and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Invalid YAML
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Invalid TOML
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// File extension not recognised
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// Hard minimum exceeds hard maximum
    #[error("hard min per item ({min}h) exceeds hard max ({max}h)")]
    InvertedBounds {
        /// Configured minimum
        min: f64,
        /// Configured maximum
        max: f64,
    },

    /// Band thresholds are not strictly ascending
    #[error("bands for '{category}' must be strictly ascending: {bands:?}")]
    UnorderedBands {
        /// Category name (or `default`)
        category: String,
        /// Thresholds as configured
        bands: [f64; 5],
    },

    /// Numeric policy field out of range
    #[error("policy field '{field}' must be a finite non-negative number, got {value}")]
    InvalidPolicyValue {
        /// Field name
        field: &'static str,
        /// Configured value
        value: f64,
    },

    /// Mapping row is unusable
    #[error("invalid mapping at row {row}: {reason}")]
    InvalidMapping {
        /// Row index in its table
        row: usize,
        /// What is wrong
        reason: String,
    },
}

impl ConfigError {
    /// Check if the error comes from reading or parsing rather than content
    #[inline]
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::InvalidJson(_)
                | Self::InvalidYaml(_)
                | Self::InvalidToml(_)
                | Self::UnsupportedFormat(_)
        )
    }
}
