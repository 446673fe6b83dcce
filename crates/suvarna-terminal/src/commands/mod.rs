//! # Terminal Commands
//!
//! Command-style entry points the portal calls, one module per concern:
//!
//! - [`intake`] — scan admission, search, search-result admission
//! - [`vault`] — line removal, quantity changes, clearing, session reset
//! - [`billing`] — coupons, manager waiver, step gate, customer capture,
//!   invoice confirmation
//!
//! Every command follows the same shape: log, validate, run the core
//! operation under the session lock, respond with a refreshed
//! [`SessionView`] so the portal never computes totals itself.

use serde::{Deserialize, Serialize};

use suvarna_core::{checkout, CheckoutStep, TaxRate, Totals, VaultLine};

use crate::state::CheckoutSession;

pub mod billing;
pub mod intake;
pub mod vault;

/// Snapshot of the session for the portal: lines, computed totals, step.
///
/// Captured fresh after every mutation — totals are always recomputed from
/// the current vault and discount state, never carried forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub lines: Vec<VaultLine>,
    pub totals: Totals,
    pub step: CheckoutStep,
}

impl SessionView {
    /// Builds a view of the current session at the given tax rate.
    pub fn capture(session: &CheckoutSession, tax_rate: TaxRate) -> Self {
        SessionView {
            lines: session.vault.lines.clone(),
            totals: checkout::compute(&session.vault, &session.discount, tax_rate),
            step: session.step,
        }
    }
}
