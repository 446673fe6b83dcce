//! # Checkout Module
//!
//! The billing calculator, discount state, and the two-step checkout gate.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Totals Computation                                   │
//! │                                                                         │
//! │  Vault lines ──► subtotal = Σ(unit_cost × quantity)                    │
//! │                      │                                                  │
//! │                      ├──► gst           = subtotal × 18%               │
//! │                      ├──► managerWaiver = unlocked ? subtotal × bps    │
//! │                      │                             : 0                  │
//! │  Coupon apply ──────►└──► couponWaiver  = fixed amount (table hit)     │
//! │                                                                         │
//! │  total = max(0, subtotal + gst − managerWaiver − couponWaiver)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`compute`] is a pure function. It is recomputed in full on every vault or
//! discount mutation — never incrementally patched — so the displayed total
//! can never drift from the current inputs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CheckoutStep, TaxRate};
use crate::validation::validate_waiver_bps;
use crate::vault::Vault;
use crate::MANAGER_WAIVER_BPS;

// =============================================================================
// Coupon Table
// =============================================================================

/// A single promotional code and its fixed waiver.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CouponRule {
    /// Code as printed on the campaign material (stored uppercase).
    pub code: String,

    /// Fixed waiver amount in paise.
    pub waiver_paise: i64,
}

/// The configured set of recognized promotional codes.
///
/// Configuration data, not a live service: a handful of seasonal campaign
/// codes mapping to fixed waiver amounts. Matching is case-insensitive
/// exact — no prefixes, no wildcards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponTable {
    rules: Vec<CouponRule>,
}

impl CouponTable {
    /// Creates a coupon table from configured rules.
    ///
    /// Codes are normalized to uppercase on construction.
    pub fn new(rules: Vec<CouponRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| CouponRule {
                code: r.code.to_uppercase(),
                waiver_paise: r.waiver_paise,
            })
            .collect();
        CouponTable { rules }
    }

    /// Looks up the waiver for a code (case-insensitive exact match).
    pub fn waiver_for(&self, code: &str) -> Option<Money> {
        let code = code.trim().to_uppercase();
        self.rules
            .iter()
            .find(|r| r.code == code)
            .map(|r| Money::from_paise(r.waiver_paise))
    }

    /// Returns the configured rules.
    pub fn rules(&self) -> &[CouponRule] {
        &self.rules
    }
}

impl Default for CouponTable {
    /// The running campaign. Replaced wholesale from config per season.
    fn default() -> Self {
        CouponTable::new(vec![CouponRule {
            code: "HERITAGE2026".to_string(),
            waiver_paise: Money::from_rupees(1000).paise(),
        }])
    }
}

// =============================================================================
// Discount State
// =============================================================================

/// Per-session discount state: the manager waiver and the coupon waiver.
///
/// Mutated only by the override-code unlock and coupon-apply actions;
/// reset together with the rest of the session.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountState {
    /// Whether a manager has unlocked the percentage waiver.
    pub manager_unlocked: bool,

    /// Waiver percentage in basis points (500 = 5%). Only applied while
    /// `manager_unlocked` is true.
    pub waiver_bps: u32,

    /// The applied coupon code, if any (uppercase).
    pub coupon_code: Option<String>,

    /// Fixed waiver from the applied coupon; zero when no coupon is active.
    pub coupon_waiver: Money,
}

impl DiscountState {
    /// Creates the initial discount state: everything locked, default
    /// waiver percent, no coupon.
    pub fn new() -> Self {
        DiscountState {
            manager_unlocked: false,
            waiver_bps: MANAGER_WAIVER_BPS,
            coupon_code: None,
            coupon_waiver: Money::zero(),
        }
    }

    /// Unlocks the manager waiver with an operator-entered override code.
    ///
    /// The comparison is a plain equality check against the configured
    /// override code. There is no attempt counter, lockout, or expiry —
    /// operators may re-attempt indefinitely. That is how the floor runs
    /// today; tightening it is a policy decision, not a code fix.
    pub fn unlock_waiver(&mut self, entered: &str, override_code: &str) -> CoreResult<()> {
        if entered == override_code {
            self.manager_unlocked = true;
            Ok(())
        } else {
            Err(CoreError::InvalidManagerCode)
        }
    }

    /// Sets the waiver percentage. Requires a prior unlock.
    pub fn set_waiver_bps(&mut self, bps: u32) -> CoreResult<()> {
        if !self.manager_unlocked {
            return Err(CoreError::WaiverLocked);
        }
        validate_waiver_bps(bps)?;
        self.waiver_bps = bps;
        Ok(())
    }

    /// Applies a coupon code against the configured table.
    ///
    /// ## Behavior
    /// - Recognized code: records the code and its fixed waiver, returns
    ///   the waiver amount
    /// - Unrecognized code: clears any active coupon to zero and returns
    ///   [`CoreError::InvalidCoupon`] as a signal for operator feedback —
    ///   the session continues either way
    pub fn apply_coupon(&mut self, code: &str, table: &CouponTable) -> CoreResult<Money> {
        match table.waiver_for(code) {
            Some(waiver) => {
                self.coupon_code = Some(code.trim().to_uppercase());
                self.coupon_waiver = waiver;
                Ok(waiver)
            }
            None => {
                self.coupon_code = None;
                self.coupon_waiver = Money::zero();
                Err(CoreError::InvalidCoupon(code.trim().to_string()))
            }
        }
    }

    /// Resets to the initial state (used on session reset).
    pub fn reset(&mut self) {
        *self = DiscountState::new();
    }
}

impl Default for DiscountState {
    fn default() -> Self {
        DiscountState::new()
    }
}

// =============================================================================
// Totals
// =============================================================================

/// The computed amounts for the financial summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Totals {
    /// Gross value: Σ(unit cost × quantity).
    pub subtotal: Money,

    /// GST on the gross value.
    pub gst: Money,

    /// Manager percentage waiver (zero while locked).
    pub manager_waiver: Money,

    /// Fixed coupon waiver (zero with no active coupon).
    pub coupon_waiver: Money,

    /// Total payable, floored at zero.
    pub total: Money,
}

/// Computes the financial summary for the current vault and discount state.
///
/// Pure function: no side effects, deterministic for the same inputs.
/// The floor at zero keeps stacked waivers from producing a negative
/// invoice total.
pub fn compute(vault: &Vault, discount: &DiscountState, tax_rate: TaxRate) -> Totals {
    let subtotal = vault.subtotal();
    let gst = subtotal.calculate_gst(tax_rate);

    let manager_waiver = if discount.manager_unlocked {
        subtotal.percentage(discount.waiver_bps)
    } else {
        Money::zero()
    };

    let total = (subtotal + gst - manager_waiver - discount.coupon_waiver).floor_zero();

    Totals {
        subtotal,
        gst,
        manager_waiver,
        coupon_waiver: discount.coupon_waiver,
        total,
    }
}

// =============================================================================
// Step Gate
// =============================================================================

/// Advances the checkout from Billing to CustomerCapture.
///
/// ## Errors
/// [`CoreError::EmptyVault`] when the vault has no lines; the caller keeps
/// the step at `Billing`.
pub fn advance(vault: &Vault) -> CoreResult<CheckoutStep> {
    if vault.is_empty() {
        return Err(CoreError::EmptyVault);
    }
    Ok(CheckoutStep::CustomerCapture)
}

/// Returns to the Billing step. Always succeeds.
pub fn retreat() -> CheckoutStep {
    CheckoutStep::Billing
}

/// Whether invoice confirmation is reachable: CustomerCapture step with a
/// non-empty vault. The invoice itself is generated by the payment backend,
/// not here.
pub fn can_confirm(step: CheckoutStep, vault: &Vault) -> bool {
    step == CheckoutStep::CustomerCapture && !vault.is_empty()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ornament;
    use chrono::Utc;

    fn ornament(code: &str, cost_rupees: i64) -> Ornament {
        Ornament {
            id: format!("db-{}", code),
            unique_code: code.to_string(),
            name: format!("Piece {}", code),
            metal_type: "Gold".to_string(),
            grams: 10.0,
            carats: 22,
            cost_paise: cost_rupees * 100,
            is_sold: false,
            sold_at: None,
            created_at: Utc::now(),
        }
    }

    fn vault_with(cost_rupees: i64) -> Vault {
        let mut vault = Vault::new();
        vault.admit(&ornament("A", cost_rupees)).unwrap();
        vault
    }

    const GST_18: TaxRate = TaxRate::from_bps(1800);

    #[test]
    fn test_compute_no_discounts() {
        // ₹1,000 cart, 18% GST → subtotal 1000, gst 180, total 1180
        let vault = vault_with(1000);
        let totals = compute(&vault, &DiscountState::new(), GST_18);

        assert_eq!(totals.subtotal.rupees(), 1000);
        assert_eq!(totals.gst.rupees(), 180);
        assert_eq!(totals.manager_waiver, Money::zero());
        assert_eq!(totals.coupon_waiver, Money::zero());
        assert_eq!(totals.total.rupees(), 1180);
    }

    #[test]
    fn test_compute_manager_waiver() {
        // Same cart, unlocked 5% waiver → waiver 50, total 1130
        let vault = vault_with(1000);
        let mut discount = DiscountState::new();
        discount.unlock_waiver("1234", "1234").unwrap();

        let totals = compute(&vault, &discount, GST_18);
        assert_eq!(totals.manager_waiver.rupees(), 50);
        assert_eq!(totals.total.rupees(), 1130);
    }

    #[test]
    fn test_compute_coupon_waiver() {
        // HERITAGE2026 (₹1,000) on subtotal 1000 + gst 180 → total 180
        let vault = vault_with(1000);
        let mut discount = DiscountState::new();
        discount
            .apply_coupon("HERITAGE2026", &CouponTable::default())
            .unwrap();

        let totals = compute(&vault, &discount, GST_18);
        assert_eq!(totals.coupon_waiver.rupees(), 1000);
        assert_eq!(totals.total.rupees(), 180);
    }

    #[test]
    fn test_compute_total_floors_at_zero() {
        // ₹500 cart, coupon bigger than subtotal + gst → total 0, never negative
        let vault = vault_with(500);
        let mut discount = DiscountState::new();
        discount.unlock_waiver("1234", "1234").unwrap();
        discount
            .apply_coupon("heritage2026", &CouponTable::default())
            .unwrap();

        let totals = compute(&vault, &discount, GST_18);
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_compute_is_idempotent() {
        let vault = vault_with(1000);
        let mut discount = DiscountState::new();
        discount.unlock_waiver("1234", "1234").unwrap();

        let first = compute(&vault, &discount, GST_18);
        let second = compute(&vault, &discount, GST_18);
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_empty_vault_is_all_zero() {
        let totals = compute(&Vault::new(), &DiscountState::new(), GST_18);
        assert_eq!(totals.subtotal, Money::zero());
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_coupon_case_insensitive_and_invalid_clears() {
        let table = CouponTable::default();
        let mut discount = DiscountState::new();

        assert_eq!(
            discount.apply_coupon("heritage2026", &table).unwrap(),
            Money::from_rupees(1000)
        );
        assert_eq!(discount.coupon_code.as_deref(), Some("HERITAGE2026"));

        // A failed apply clears the active coupon
        let err = discount.apply_coupon("EXPIRED2024", &table).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCoupon(_)));
        assert_eq!(discount.coupon_waiver, Money::zero());
        assert!(discount.coupon_code.is_none());
    }

    #[test]
    fn test_unlock_waiver() {
        let mut discount = DiscountState::new();

        assert!(matches!(
            discount.unlock_waiver("0000", "1234"),
            Err(CoreError::InvalidManagerCode)
        ));
        assert!(!discount.manager_unlocked);

        discount.unlock_waiver("1234", "1234").unwrap();
        assert!(discount.manager_unlocked);
    }

    #[test]
    fn test_set_waiver_bps_requires_unlock() {
        let mut discount = DiscountState::new();

        assert!(matches!(
            discount.set_waiver_bps(750),
            Err(CoreError::WaiverLocked)
        ));

        discount.unlock_waiver("1234", "1234").unwrap();
        discount.set_waiver_bps(750).unwrap();
        assert_eq!(discount.waiver_bps, 750);

        // Percent beyond 100% is rejected
        assert!(discount.set_waiver_bps(10001).is_err());
    }

    #[test]
    fn test_discount_reset() {
        let mut discount = DiscountState::new();
        discount.unlock_waiver("1234", "1234").unwrap();
        discount
            .apply_coupon("HERITAGE2026", &CouponTable::default())
            .unwrap();

        discount.reset();
        assert!(!discount.manager_unlocked);
        assert_eq!(discount.coupon_waiver, Money::zero());
        assert_eq!(discount.waiver_bps, MANAGER_WAIVER_BPS);
    }

    #[test]
    fn test_totals_serialize_camel_case() {
        // The portal reads these field names; renames here break the UI
        let vault = vault_with(1000);
        let totals = compute(&vault, &DiscountState::new(), GST_18);

        let json = serde_json::to_value(totals).unwrap();
        assert_eq!(json["subtotal"], 100_000);
        assert_eq!(json["gst"], 18_000);
        assert_eq!(json["managerWaiver"], 0);
        assert_eq!(json["couponWaiver"], 0);
        assert_eq!(json["total"], 118_000);
    }

    #[test]
    fn test_advance_empty_vault_rejected() {
        let err = advance(&Vault::new()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyVault));
    }

    #[test]
    fn test_advance_and_retreat() {
        let vault = vault_with(1000);
        assert_eq!(advance(&vault).unwrap(), CheckoutStep::CustomerCapture);
        assert_eq!(retreat(), CheckoutStep::Billing);
    }

    #[test]
    fn test_can_confirm() {
        let vault = vault_with(1000);
        assert!(can_confirm(CheckoutStep::CustomerCapture, &vault));
        assert!(!can_confirm(CheckoutStep::Billing, &vault));
        assert!(!can_confirm(CheckoutStep::CustomerCapture, &Vault::new()));
    }
}
