//! # Billing Commands
//!
//! The financial-summary side of the terminal: coupons, the manager waiver,
//! the two-step checkout gate, customer capture, and invoice confirmation.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Billing ──► CustomerCapture ──► Invoice              │
//! │                                                                         │
//! │  Step 1 (Billing)            Step 2 (CustomerCapture)                  │
//! │  ────────────────            ────────────────────────                  │
//! │  apply_coupon                capture_customer                          │
//! │  unlock_manager_waiver       confirm_sale ──► InvoiceBackend           │
//! │  set_waiver_percent               │                                     │
//! │  advance_to_customer ────────────►│                                     │
//! │       ▲                           │                                     │
//! │       └────── return_to_billing ──┘                                     │
//! │                                                                         │
//! │  advance requires a non-empty vault; confirm additionally requires     │
//! │  a valid customer capture. Everything else is always available.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use suvarna_core::validation::validate_customer;
use suvarna_core::{checkout, CoreError, CustomerCapture, Totals, VaultLine};
use suvarna_inventory::InventoryLookup;

use crate::commands::SessionView;
use crate::config::TerminalConfig;
use crate::error::{ErrorCode, TerminalError};
use crate::state::SessionState;

// =============================================================================
// Invoice Backend Seam
// =============================================================================

/// The finalized order handed to the invoice/payment backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceOrder {
    /// Store name for the invoice header.
    pub store_name: String,

    /// The admitted lines.
    pub lines: Vec<VaultLine>,

    /// Customer details captured at step 2.
    pub customer: CustomerCapture,

    /// Final computed amounts.
    pub totals: Totals,
}

/// Invoice backend failure.
#[derive(Debug, Clone, Error)]
#[error("Invoice backend failed: {0}")]
pub struct InvoiceError(pub String);

impl From<InvoiceError> for TerminalError {
    fn from(err: InvoiceError) -> Self {
        TerminalError::new(ErrorCode::InvoiceError, err.to_string())
    }
}

/// The invoice/payment collaborator.
///
/// Invoice generation, payment capture, and receipt rendering are owned by
/// the portal backend; the terminal hands over the finalized order and gets
/// back an invoice number.
#[async_trait]
pub trait InvoiceBackend: Send + Sync {
    /// Generates an invoice for the order, returning its number.
    async fn generate_invoice(&self, order: &InvoiceOrder) -> Result<String, InvoiceError>;
}

/// Response to a confirmed sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    /// Invoice number from the backend.
    pub invoice_number: String,

    /// Total payable in paise.
    pub total_paise: i64,
}

// =============================================================================
// Discount Commands
// =============================================================================

/// Applies a coupon code.
///
/// A recognized code records its fixed waiver; an unrecognized code clears
/// any active waiver and returns a `DiscountError` for operator feedback.
/// Either way the session continues.
pub fn apply_coupon(
    state: &SessionState,
    config: &TerminalConfig,
    code: &str,
) -> Result<SessionView, TerminalError> {
    debug!(code = %code, "apply_coupon command");

    let view = state.with_session_mut(|s| {
        s.discount.apply_coupon(code, &config.coupons)?;
        Ok::<SessionView, CoreError>(SessionView::capture(s, config.tax_rate()))
    })?;

    info!(code = %code, "coupon applied");
    Ok(view)
}

/// Unlocks the manager waiver with an operator-entered override code.
///
/// On success the configured default waiver percent starts applying;
/// [`set_waiver_percent`] can change it afterwards.
pub fn unlock_manager_waiver(
    state: &SessionState,
    config: &TerminalConfig,
    entered: &str,
) -> Result<SessionView, TerminalError> {
    debug!("unlock_manager_waiver command");

    let view = state.with_session_mut(|s| {
        s.discount.unlock_waiver(entered, &config.override_code)?;
        s.discount.waiver_bps = config.default_waiver_bps;
        Ok::<SessionView, CoreError>(SessionView::capture(s, config.tax_rate()))
    })?;

    info!("manager waiver unlocked");
    Ok(view)
}

/// Sets the waiver percent in basis points. Requires a prior unlock.
pub fn set_waiver_percent(
    state: &SessionState,
    config: &TerminalConfig,
    bps: u32,
) -> Result<SessionView, TerminalError> {
    debug!(bps = %bps, "set_waiver_percent command");

    state.with_session_mut(|s| {
        s.discount.set_waiver_bps(bps)?;
        Ok::<SessionView, CoreError>(SessionView::capture(s, config.tax_rate()))
    })
    .map_err(TerminalError::from)
}

/// Returns the current computed totals.
pub fn get_totals(state: &SessionState, config: &TerminalConfig) -> Totals {
    state.with_session(|s| checkout::compute(&s.vault, &s.discount, config.tax_rate()))
}

// =============================================================================
// Step Gate Commands
// =============================================================================

/// Advances from Billing to CustomerCapture.
///
/// ## Errors
/// `StepError` (empty vault) — the step stays at Billing.
pub fn advance_to_customer(
    state: &SessionState,
    config: &TerminalConfig,
) -> Result<SessionView, TerminalError> {
    debug!("advance_to_customer command");

    let view = state.with_session_mut(|s| {
        s.step = checkout::advance(&s.vault)?;
        Ok::<SessionView, CoreError>(SessionView::capture(s, config.tax_rate()))
    })?;

    Ok(view)
}

/// Returns to the Billing step. Always succeeds.
pub fn return_to_billing(state: &SessionState, config: &TerminalConfig) -> SessionView {
    debug!("return_to_billing command");

    state.with_session_mut(|s| {
        s.step = checkout::retreat();
        SessionView::capture(s, config.tax_rate())
    })
}

/// Stores customer details after validating them.
pub fn capture_customer(
    state: &SessionState,
    config: &TerminalConfig,
    customer: CustomerCapture,
) -> Result<SessionView, TerminalError> {
    debug!(name = %customer.name, "capture_customer command");
    validate_customer(&customer).map_err(CoreError::from)?;

    let view = state.with_session_mut(|s| {
        s.customer = customer;
        SessionView::capture(s, config.tax_rate())
    });

    Ok(view)
}

// =============================================================================
// Confirmation
// =============================================================================

/// Confirms the sale: hands the finalized order to the invoice backend,
/// marks the pieces sold, and resets the session for the next customer.
///
/// Only reachable from CustomerCapture with a non-empty vault and a valid
/// customer capture.
pub async fn confirm_sale(
    state: &SessionState,
    config: &TerminalConfig,
    inventory: &dyn InventoryLookup,
    backend: &dyn InvoiceBackend,
) -> Result<ConfirmResponse, TerminalError> {
    debug!("confirm_sale command");

    let order = state.with_session(|s| {
        if s.vault.is_empty() {
            return Err(TerminalError::from(CoreError::EmptyVault));
        }
        if !checkout::can_confirm(s.step, &s.vault) {
            return Err(TerminalError::step(
                "Invoice confirmation is only available from the customer step",
            ));
        }
        validate_customer(&s.customer).map_err(CoreError::from)?;

        Ok(InvoiceOrder {
            store_name: config.store_name.clone(),
            lines: s.vault.lines.clone(),
            customer: s.customer.clone(),
            totals: checkout::compute(&s.vault, &s.discount, config.tax_rate()),
        })
    })?;

    let invoice_number = backend.generate_invoice(&order).await?;

    // The invoice exists from here on. A piece the service refuses to mark
    // sold is an inventory drift to reconcile, not a reason to void the
    // sale at the counter.
    for line in &order.lines {
        if let Err(e) = inventory.mark_sold(&line.unique_code).await {
            warn!(code = %line.unique_code, error = %e, "piece not marked sold");
        }
    }

    state.with_session_mut(|s| s.reset());

    info!(
        invoice = %invoice_number,
        total = %order.totals.total,
        lines = order.lines.len(),
        "sale confirmed"
    );

    Ok(ConfirmResponse {
        invoice_number,
        total_paise: order.totals.total.paise(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
