//! # Lookup Error Types
//!
//! Error types for remote inventory operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  HTTP failure / error status (reqwest)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LookupError (this module) ← adds the business meaning                 │
//! │       │                        (not found vs already sold vs transport)│
//! │       ▼                                                                 │
//! │  TerminalError (suvarna-terminal) ← serialized for the operator        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these abort the session: a failed lookup leaves the vault
//! unchanged and the operator scans again. Nothing is retried automatically.

use thiserror::Error;

/// Remote inventory lookup errors.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No record exists for the scanned code.
    ///
    /// ## When This Occurs
    /// - The tag was printed for a different branch's catalog
    /// - The record was deleted after tagging
    /// - The scan picked up a foreign QR code entirely
    #[error("No piece found for code {0}")]
    NotFound(String),

    /// The record exists but is already marked sold.
    ///
    /// A sold piece re-appearing at the counter is a red flag (returned
    /// stock not re-entered, or a duplicated tag), so it is refused rather
    /// than re-admitted.
    #[error("Piece {0} is already sold")]
    AlreadySold(String),

    /// The service rejected our credentials.
    #[error("Inventory service rejected credentials")]
    Unauthorized,

    /// Transport-level failure (connection refused, timeout, TLS, ...).
    #[error("Inventory request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not parse as the expected record shape.
    #[error("Unreadable inventory response: {0}")]
    Decode(String),

    /// The service answered with a status we have no mapping for.
    #[error("Unexpected inventory response status: {0}")]
    UnexpectedStatus(u16),
}

/// Result type for inventory operations.
pub type LookupResult<T> = Result<T, LookupError>;
