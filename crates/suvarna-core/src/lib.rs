//! # suvarna-core: Pure Business Logic for Suvarna POS
//!
//! This crate is the heart of the Suvarna billing terminal. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Suvarna POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Portal Frontend (React)                        │   │
//! │  │    Scan/Search ──► Vault ──► Financial Summary ──► Customer     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              suvarna-terminal (session commands)                │   │
//! │  │    scan_ornament, apply_coupon, advance_to_customer, ...        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ suvarna-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   vault   │  │ checkout  │  │   │
//! │  │   │ Ornament  │  │   Money   │  │   Vault   │  │  Totals   │  │   │
//! │  │   │ TaxRate   │  │  GST calc │  │ VaultLine │  │ step gate │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            suvarna-inventory (lookup boundary)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Ornament, TaxRate, CheckoutStep, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`vault`] - The per-session cart with strict duplicate rejection
//! - [`checkout`] - Totals calculator, discount state, step gate
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, every time
//! 2. **No I/O**: network and file system access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are paise (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use suvarna_core::checkout::{compute, DiscountState};
//! use suvarna_core::types::TaxRate;
//! use suvarna_core::vault::Vault;
//!
//! let vault = Vault::new();
//! let totals = compute(&vault, &DiscountState::new(), TaxRate::default());
//! assert!(totals.total.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;
pub mod vault;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use suvarna_core::Money` instead of
// `use suvarna_core::money::Money`

pub use checkout::{compute, CouponRule, CouponTable, DiscountState, Totals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{CheckoutStep, CustomerCapture, Ornament, TaxRate};
pub use vault::{Vault, VaultLine};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST rate applied to jewelry invoices, in basis points (1800 = 18%).
pub const GST_RATE_BPS: u32 = 1800;

/// Default manager waiver percentage in basis points (500 = 5%).
///
/// Branch admins may enter a different percent after unlocking; this is the
/// value the regular billing terminal applies.
pub const MANAGER_WAIVER_BPS: u32 = 500;

/// Default manager override code.
///
/// A fixed demo value, overridable from terminal configuration. It ships
/// with no lockout or expiry; see the note on
/// [`checkout::DiscountState::unlock_waiver`].
pub const DEFAULT_OVERRIDE_CODE: &str = "1234";

/// Maximum lines allowed in a single vault.
///
/// ## Business Reason
/// A billing transaction is one customer at one counter; a runaway vault
/// is an operator error, not a sale.
pub const MAX_VAULT_LINES: usize = 50;

/// Maximum quantity on a single line.
///
/// ## Business Reason
/// Prevents accidental over-entry (typing 100 instead of 10) on
/// search-added bulk items.
pub const MAX_LINE_QUANTITY: i64 = 99;
