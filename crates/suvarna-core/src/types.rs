//! # Domain Types
//!
//! Core domain types used throughout Suvarna POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Ornament     │   │    TaxRate      │   │  CheckoutStep   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (db key)    │   │  bps (u32)      │   │  Billing        │       │
//! │  │  unique_code    │   │  1800 = 18% GST │   │  CustomerCapture│       │
//! │  │  grams, carats  │   └─────────────────┘   └─────────────────┘       │
//! │  │  cost_paise     │                                                    │
//! │  │  is_sold        │   ┌─────────────────┐                             │
//! │  └─────────────────┘   │ CustomerCapture │                             │
//! │                        │  name, phone,   │                             │
//! │                        │  email, address │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every ornament has:
//! - `id`: database key, immutable, used for relations
//! - `unique_code`: UUID stamped on the physical tag (QR + barcode), the
//!   identifier scanned at the billing terminal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (GST on gold jewelry invoices)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::GST_RATE_BPS)
    }
}

// =============================================================================
// Ornament
// =============================================================================

/// A jewelry piece available for sale.
///
/// This is the record the inventory service returns for a scan or search.
/// Unlike commodity retail, each piece is individually tagged: one ornament,
/// one unique code, one sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Ornament {
    /// Database identifier.
    pub id: String,

    /// UUID stamped on the physical tag (QR + barcode).
    pub unique_code: String,

    /// Display name shown at the terminal and on the invoice.
    pub name: String,

    /// Metal type ("Gold", "Silver", ...).
    pub metal_type: String,

    /// Weight in grams.
    pub grams: f64,

    /// Purity in carats (22, 24, ...).
    pub carats: u32,

    /// Cost in paise (smallest currency unit).
    pub cost_paise: i64,

    /// Whether the piece has already been sold.
    pub is_sold: bool,

    /// When the piece was sold, if it has been.
    #[ts(as = "Option<String>")]
    pub sold_at: Option<DateTime<Utc>>,

    /// When the record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Ornament {
    /// Returns the cost as a Money type.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_paise(self.cost_paise)
    }

    /// Checks if the piece can be admitted to a vault (not yet sold).
    #[inline]
    pub fn is_sellable(&self) -> bool {
        !self.is_sold
    }
}

// =============================================================================
// Checkout Step
// =============================================================================

/// The two-step checkout flow at the billing terminal.
///
/// ```text
/// ┌──────────┐   advance (vault non-empty)   ┌─────────────────┐
/// │ Billing  │ ────────────────────────────► │ CustomerCapture │
/// │          │ ◄──────────────────────────── │                 │
/// └──────────┘          retreat              └─────────────────┘
/// ```
///
/// The terminal starts on `Billing`. Invoice confirmation is only reachable
/// from `CustomerCapture`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CheckoutStep {
    /// Items, discounts, and totals (step 1).
    Billing,
    /// Customer details before invoice generation (step 2).
    CustomerCapture,
}

impl Default for CheckoutStep {
    fn default() -> Self {
        CheckoutStep::Billing
    }
}

// =============================================================================
// Customer Capture
// =============================================================================

/// Customer details collected at checkout step 2.
///
/// Validation rules live in [`crate::validation::validate_customer`]; this
/// struct is just the captured form data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerCapture {
    /// Full name (required).
    pub name: String,

    /// Contact phone.
    pub phone: String,

    /// Email address.
    pub email: String,

    /// Residential address.
    pub address: String,
}

impl CustomerCapture {
    /// Checks whether any field has been filled in.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.phone.trim().is_empty()
            && self.email.trim().is_empty()
            && self.address.trim().is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
