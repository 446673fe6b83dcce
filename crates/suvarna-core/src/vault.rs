//! # Vault Module
//!
//! The vault is the in-progress collection of line items for one checkout
//! session — what commodity POS systems call the cart.
//!
//! ## One Piece, One Line
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Commodity retail:  scan "COKE-330" twice  → one line, quantity 2      │
//! │                                                                         │
//! │  Jewelry retail:    every piece carries its own unique code; the same  │
//! │                     code twice in one transaction means a double-scan  │
//! │                     or a cloned tag → REJECTED (DuplicateLine)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantity still exists on a line (search-added bulk items like chains sold
//! by count), but admission never merges lines.
//!
//! Totals are always recomputed from the lines, never incrementally patched,
//! so the displayed amounts can't drift from the vault contents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Ornament;
use crate::{MAX_LINE_QUANTITY, MAX_VAULT_LINES};

// =============================================================================
// Vault Line
// =============================================================================

/// A line item in the vault.
///
/// ## Design Notes
/// - `ornament_id` / `unique_code`: dual-key reference to the piece
/// - Name, weight, and cost are frozen copies taken at admission time, so
///   the vault displays consistent data even if the catalog record changes
///   mid-transaction.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VaultLine {
    /// Database identifier of the piece.
    pub ornament_id: String,

    /// Unique tag code (unique within the vault; enforced at insertion).
    pub unique_code: String,

    /// Piece name at time of adding (frozen).
    pub name: String,

    /// Weight in grams at time of adding (frozen).
    pub grams: f64,

    /// Purity in carats at time of adding (frozen).
    pub carats: u32,

    /// Cost in paise at time of adding (frozen).
    pub unit_cost_paise: i64,

    /// Quantity, >= 1. Scanned pieces always enter with quantity 1.
    pub quantity: i64,

    /// When this line was added to the vault.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl VaultLine {
    /// Creates a new vault line from an ornament, quantity 1.
    ///
    /// ## Price Freezing
    /// The cost is captured at this moment. If the catalog record changes
    /// after admission, this line retains the original cost.
    pub fn from_ornament(ornament: &Ornament) -> Self {
        VaultLine {
            ornament_id: ornament.id.clone(),
            unique_code: ornament.unique_code.clone(),
            name: ornament.name.clone(),
            grams: ornament.grams,
            carats: ornament.carats,
            unit_cost_paise: ornament.cost_paise,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit cost × quantity).
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.unit_cost_paise).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Vault
// =============================================================================

/// The checkout vault.
///
/// ## Invariants
/// - No two lines share a `unique_code` (enforced at insertion)
/// - Quantity on every line is >= 1
/// - Maximum lines: [`MAX_VAULT_LINES`]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Vault {
    /// Lines in the vault, in admission order.
    pub lines: Vec<VaultLine>,

    /// When the vault was created/last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Vault {
    /// Creates a new empty vault.
    pub fn new() -> Self {
        Vault {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Checks whether a unique code is already present.
    pub fn contains(&self, unique_code: &str) -> bool {
        self.lines.iter().any(|l| l.unique_code == unique_code)
    }

    /// Admits an ornament as a new line with quantity 1.
    ///
    /// Returns a copy of the created line for the caller's response.
    ///
    /// ## Errors
    /// - [`CoreError::DuplicateLine`] if the code is already in the vault;
    ///   the vault is left unchanged
    /// - [`CoreError::VaultFull`] at the line cap
    pub fn admit(&mut self, ornament: &Ornament) -> CoreResult<VaultLine> {
        if self.contains(&ornament.unique_code) {
            return Err(CoreError::DuplicateLine(ornament.unique_code.clone()));
        }

        if self.lines.len() >= MAX_VAULT_LINES {
            return Err(CoreError::VaultFull {
                max: MAX_VAULT_LINES,
            });
        }

        let line = VaultLine::from_ornament(ornament);
        self.lines.push(line.clone());
        Ok(line)
    }

    /// Updates the quantity of a line.
    ///
    /// ## Errors
    /// - [`CoreError::LineNotFound`] if the code is not in the vault
    /// - [`CoreError::QuantityTooLarge`] above [`MAX_LINE_QUANTITY`]
    /// - Validation error for quantity < 1 (remove the line instead)
    pub fn set_quantity(&mut self, unique_code: &str, quantity: i64) -> CoreResult<()> {
        crate::validation::validate_quantity(quantity)?;

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        match self.lines.iter_mut().find(|l| l.unique_code == unique_code) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::LineNotFound(unique_code.to_string())),
        }
    }

    /// Removes a line from the vault by unique code.
    pub fn remove(&mut self, unique_code: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.unique_code != unique_code);

        if self.lines.len() == initial_len {
            Err(CoreError::LineNotFound(unique_code.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the vault.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of lines in the vault.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the subtotal (gross value, before GST and waivers).
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }

    /// Checks if the vault is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Vault {
    fn default() -> Self {
        Vault::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ornament(code: &str, cost_rupees: i64) -> Ornament {
        Ornament {
            id: format!("db-{}", code),
            unique_code: code.to_string(),
            name: format!("Piece {}", code),
            metal_type: "Gold".to_string(),
            grams: 12.5,
            carats: 22,
            cost_paise: cost_rupees * 100,
            is_sold: false,
            sold_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_admit() {
        let mut vault = Vault::new();
        let piece = test_ornament("A1", 48500);

        let line = vault.admit(&piece).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_cost_paise, 4_850_000);

        assert_eq!(vault.line_count(), 1);
        assert_eq!(vault.subtotal().rupees(), 48500);
    }

    #[test]
    fn test_admit_duplicate_rejected_vault_unchanged() {
        let mut vault = Vault::new();
        let piece = test_ornament("X123", 1000);

        vault.admit(&piece).unwrap();
        let err = vault.admit(&piece).unwrap_err();

        assert!(matches!(err, CoreError::DuplicateLine(code) if code == "X123"));
        assert_eq!(vault.line_count(), 1);
        assert_eq!(vault.total_quantity(), 1);
    }

    #[test]
    fn test_admit_vault_full() {
        let mut vault = Vault::new();
        for i in 0..MAX_VAULT_LINES {
            vault.admit(&test_ornament(&format!("P{}", i), 100)).unwrap();
        }

        let err = vault.admit(&test_ornament("overflow", 100)).unwrap_err();
        assert!(matches!(err, CoreError::VaultFull { .. }));
        assert_eq!(vault.line_count(), MAX_VAULT_LINES);
    }

    #[test]
    fn test_set_quantity() {
        let mut vault = Vault::new();
        vault.admit(&test_ornament("A1", 500)).unwrap();

        vault.set_quantity("A1", 3).unwrap();
        assert_eq!(vault.total_quantity(), 3);
        assert_eq!(vault.subtotal().rupees(), 1500);

        assert!(matches!(
            vault.set_quantity("A1", 0),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            vault.set_quantity("A1", MAX_LINE_QUANTITY + 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert!(matches!(
            vault.set_quantity("nope", 2),
            Err(CoreError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_remove() {
        let mut vault = Vault::new();
        vault.admit(&test_ornament("A1", 500)).unwrap();
        vault.admit(&test_ornament("B2", 700)).unwrap();

        vault.remove("A1").unwrap();
        assert_eq!(vault.line_count(), 1);
        assert!(!vault.contains("A1"));
        assert!(vault.contains("B2"));

        assert!(matches!(
            vault.remove("A1"),
            Err(CoreError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_clear() {
        let mut vault = Vault::new();
        vault.admit(&test_ornament("A1", 500)).unwrap();
        assert!(!vault.is_empty());

        vault.clear();
        assert!(vault.is_empty());
        assert_eq!(vault.subtotal(), Money::zero());
    }

    #[test]
    fn test_subtotal_multiple_lines() {
        let mut vault = Vault::new();
        vault.admit(&test_ornament("A1", 48500)).unwrap();
        vault.admit(&test_ornament("B2", 12000)).unwrap();
        vault.set_quantity("B2", 2).unwrap();

        assert_eq!(vault.subtotal().rupees(), 48500 + 24000);
    }
}
