//! Error types for the booking engine.
//!
//! User mistakes are not errors here: they are reported as
//! [`ValidationErrors`](crate::draft::ValidationErrors) and only block the
//! `Next` transition. `BookingError` covers raw input that cannot be typed
//! and faults that mean the workflow's own invariants were broken.

use crate::catalog::PricingError;
use crate::types::Field;
use thiserror::Error;

/// Errors raised by the booking engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// The draft selects a service/plan combination the catalog cannot price
    ///
    /// Indicates a state machine bug, never a user-correctable input.
    #[error("Pricing resolution failed: {0}")]
    Pricing(#[from] PricingError),

    /// A summary was requested for a draft missing a required field
    #[error("Booking draft is missing {field}")]
    IncompleteDraft {
        /// The missing field
        field: Field,
    },

    /// The renderer named a field the draft does not have
    #[error("Unknown booking field: {0}")]
    UnknownField(String),

    /// The renderer sent a value that cannot be parsed for its field
    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidValue {
        /// Field being updated
        field: Field,
        /// Raw input
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

impl BookingError {
    /// Whether this error signals a broken workflow invariant rather than bad input
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::Pricing(_) | Self::IncompleteDraft { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_failures_are_invariant_violations() {
        let error = BookingError::from(PricingError::MissingPlan);
        assert!(error.is_invariant_violation());
        assert_eq!(
            error.to_string(),
            "Pricing resolution failed: gardening service requires a plan"
        );
    }

    #[test]
    fn input_errors_are_not_invariant_violations() {
        let error = BookingError::UnknownField("colour".to_string());
        assert!(!error.is_invariant_violation());
        assert_eq!(error.to_string(), "Unknown booking field: colour");

        let incomplete = BookingError::IncompleteDraft { field: Field::Date };
        assert_eq!(incomplete.to_string(), "Booking draft is missing date");
    }
}
