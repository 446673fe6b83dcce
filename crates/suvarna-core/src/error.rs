//! # Error Types
//!
//! Domain-specific error types for suvarna-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  suvarna-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  suvarna-inventory errors (separate crate)                             │
//! │  └── LookupError      - Remote inventory lookup failures               │
//! │                                                                         │
//! │  suvarna-terminal errors                                               │
//! │  └── TerminalError    - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → TerminalError → operator notice   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (unique code, max, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every variant is recoverable: the session survives, the operator
//!    sees a transient notice, nothing is retried automatically

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations at the billing terminal.
/// They should be caught and translated to operator-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The scanned piece is already in the vault.
    ///
    /// Jewelry pieces are individually tagged; the same code appearing twice
    /// in one transaction means a double-scan or a cloned tag, so admission
    /// is refused outright rather than bumping a quantity.
    #[error("Piece {0} is already present in the transaction")]
    DuplicateLine(String),

    /// Checkout cannot advance with an empty vault.
    #[error("Cannot check out an empty vault")]
    EmptyVault,

    /// Coupon code is not in the configured table.
    ///
    /// Surfaced to the operator as "Invalid or Expired Code"; the coupon
    /// waiver is cleared to zero as a side effect of the failed apply.
    #[error("Coupon code '{0}' is not recognized")]
    InvalidCoupon(String),

    /// Manager override code did not match.
    ///
    /// There is deliberately no attempt counter or lockout here; see the
    /// note on [`crate::checkout::DiscountState::unlock_waiver`].
    #[error("Manager override code does not match")]
    InvalidManagerCode,

    /// Waiver percent changes require a prior manager unlock.
    #[error("Manager waiver is locked")]
    WaiverLocked,

    /// Vault has reached its line cap.
    #[error("Vault cannot hold more than {max} pieces")]
    VaultFull { max: usize },

    /// The referenced line is not in the vault.
    #[error("Piece {0} is not in the vault")]
    LineNotFound(String),

    /// Line quantity exceeds the allowed maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed code, bad phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DuplicateLine("A1B2".to_string());
        assert_eq!(
            err.to_string(),
            "Piece A1B2 is already present in the transaction"
        );

        let err = CoreError::VaultFull { max: 50 };
        assert_eq!(err.to_string(), "Vault cannot hold more than 50 pieces");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "query must be at most 100 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
