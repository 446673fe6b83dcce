//! # suvarna-terminal: Checkout Session Orchestration for Suvarna POS
//!
//! The billing-terminal layer: one checkout session behind a mutex, the
//! scan-intake guard, and command-style entry points the portal calls.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Suvarna POS Terminal Layer                          │
//! │                                                                         │
//! │  Portal events (scan, search, coupon, step, confirm)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               suvarna-terminal (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌────────────────┐   │   │
//! │  │   │   commands    │   │     state     │   │     config     │   │   │
//! │  │   │ intake, vault │   │ SessionState  │   │ TerminalConfig │   │   │
//! │  │   │ billing       │   │ scan permit   │   │ SUVARNA_* env  │   │   │
//! │  │   └───────┬───────┘   └───────────────┘   └────────────────┘   │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              │                                                          │
//! │       ┌──────┴──────┐                                                  │
//! │       ▼             ▼                                                   │
//! │  suvarna-core   suvarna-inventory                                      │
//! │  (pure logic)   (remote lookup)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No business rules live here: commands sequence suvarna-core operations
//! around suvarna-inventory lookups and translate every failure into a
//! serializable [`TerminalError`] the portal shows as a transient notice.
//!
//! ## Event Model
//!
//! One logical session, cooperatively driven: each scan, search, coupon,
//! or delete event runs to completion before the next is processed. The
//! single explicit concurrency guard is the scan in-flight permit
//! ([`state::SessionState::try_begin_scan`]), which keeps a double-fired
//! scanner event from starting a second admission mid-lookup.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use commands::billing::{ConfirmResponse, InvoiceBackend, InvoiceError, InvoiceOrder};
pub use commands::intake::IntakeResponse;
pub use commands::SessionView;
pub use config::TerminalConfig;
pub use error::{ErrorCode, TerminalError};
pub use state::{CheckoutSession, SessionState};
