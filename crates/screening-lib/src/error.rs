//! Error types for the screening core
//!
//! Three failure classes, matching how they are handled:
//! - `Validation`: bad input field, recoverable by prompting for correction
//! - `ModelUnavailable`: classifier artifact missing or unloadable, terminal
//!   until the configuration is remediated
//! - `Inference`: the classifier call itself failed or timed out, terminal
//!   for the current request only

use thiserror::Error;

/// Errors surfaced by the screening pipeline and its collaborators
#[derive(Debug, Clone, Error)]
pub enum ScreeningError {
    /// An input field is outside its clinically plausible bounds
    #[error("invalid value for {field}: {value} (allowed range {min} to {max})")]
    Validation {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The classifier artifact could not be located or loaded
    #[error("model artifact unavailable: {reason}")]
    ModelUnavailable { reason: String },

    /// Model invocation failed or timed out
    #[error("inference failed: {reason}")]
    Inference { reason: String },
}

impl ScreeningError {
    pub fn validation(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::Validation {
            field,
            value,
            min,
            max,
        }
    }

    pub fn model_unavailable(reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            reason: reason.into(),
        }
    }

    pub fn inference(reason: impl Into<String>) -> Self {
        Self::Inference {
            reason: reason.into(),
        }
    }

    /// Name of the offending field for validation failures
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
