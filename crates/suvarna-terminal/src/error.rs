//! # Terminal Error Type
//!
//! Unified error type for terminal commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow at the Terminal                           │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<T, TerminalError>                                               │
//! │         │                                                               │
//! │         ├── CoreError (business rule) ───┐                             │
//! │         ├── LookupError (remote)  ───────┼──► TerminalError ──► JSON   │
//! │         └── InvoiceError (backend) ──────┘                             │
//! │                                                                         │
//! │  The portal shows `message` as a transient notice and branches on      │
//! │  `code`. Every error is recoverable; the session always survives.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use suvarna_core::CoreError;
use suvarna_inventory::LookupError;

/// Error returned from terminal commands, serialized for the portal.
///
/// ## Serialization
/// ```json
/// {
///   "code": "DUPLICATE_LINE",
///   "message": "Piece 550e8400-... is already present in the transaction"
/// }
/// ```
#[derive(Debug, Clone, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct TerminalError {
    /// Machine-readable error code for programmatic handling.
    pub code: ErrorCode,

    /// Human-readable message for the operator notice.
    pub message: String,
}

/// Error codes for terminal responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No inventory record for the scanned code.
    NotFound,

    /// The piece is already marked sold.
    AlreadySold,

    /// The piece is already present in the vault.
    DuplicateLine,

    /// A scan is still being processed.
    ScanBusy,

    /// Operator input failed validation.
    ValidationError,

    /// Vault operation failed (full, line missing, bad quantity).
    VaultError,

    /// Coupon or manager-waiver action failed.
    DiscountError,

    /// Checkout step transition refused.
    StepError,

    /// The remote lookup failed at the transport level.
    LookupFailed,

    /// Invoice backend failure.
    InvoiceError,

    /// Anything we did not anticipate.
    Internal,
}

impl TerminalError {
    /// Creates a new terminal error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        TerminalError {
            code,
            message: message.into(),
        }
    }

    /// A second scan arrived while one is still being processed.
    pub fn scan_busy() -> Self {
        TerminalError::new(ErrorCode::ScanBusy, "A scan is already being processed")
    }

    /// Checkout step transition refused.
    pub fn step(message: impl Into<String>) -> Self {
        TerminalError::new(ErrorCode::StepError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        TerminalError::new(ErrorCode::Internal, message)
    }
}

/// Converts core business errors to terminal errors.
impl From<CoreError> for TerminalError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::DuplicateLine(_) => ErrorCode::DuplicateLine,
            CoreError::EmptyVault => ErrorCode::StepError,
            CoreError::InvalidCoupon(_)
            | CoreError::InvalidManagerCode
            | CoreError::WaiverLocked => ErrorCode::DiscountError,
            CoreError::VaultFull { .. }
            | CoreError::LineNotFound(_)
            | CoreError::QuantityTooLarge { .. } => ErrorCode::VaultError,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        TerminalError::new(code, err.to_string())
    }
}

/// Converts remote lookup errors to terminal errors.
impl From<LookupError> for TerminalError {
    fn from(err: LookupError) -> Self {
        let code = match &err {
            LookupError::NotFound(_) => ErrorCode::NotFound,
            LookupError::AlreadySold(_) => ErrorCode::AlreadySold,
            LookupError::Unauthorized
            | LookupError::Transport(_)
            | LookupError::Decode(_)
            | LookupError::UnexpectedStatus(_) => ErrorCode::LookupFailed,
        };
        TerminalError::new(code, err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: TerminalError = CoreError::DuplicateLine("X123".to_string()).into();
        assert_eq!(err.code, ErrorCode::DuplicateLine);
        assert!(err.message.contains("X123"));

        let err: TerminalError = CoreError::EmptyVault.into();
        assert_eq!(err.code, ErrorCode::StepError);

        let err: TerminalError = CoreError::InvalidManagerCode.into();
        assert_eq!(err.code, ErrorCode::DiscountError);
    }

    #[test]
    fn test_lookup_error_mapping() {
        let err: TerminalError = LookupError::NotFound("A1".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: TerminalError = LookupError::AlreadySold("A1".to_string()).into();
        assert_eq!(err.code, ErrorCode::AlreadySold);

        let err: TerminalError = LookupError::UnexpectedStatus(502).into();
        assert_eq!(err.code, ErrorCode::LookupFailed);
    }

    #[test]
    fn test_serialization_shape() {
        let err = TerminalError::scan_busy();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "SCAN_BUSY");
        assert!(json["message"].is_string());
    }
}
