//! # Vault Commands
//!
//! Line maintenance on the active vault: view, remove, re-quantity, clear.
//! Admission lives in [`crate::commands::intake`]; these commands never
//! touch the inventory service.

use tracing::debug;

use suvarna_core::CoreError;

use crate::commands::SessionView;
use crate::config::TerminalConfig;
use crate::error::TerminalError;
use crate::state::SessionState;

/// Returns the current session snapshot.
pub fn get_session(state: &SessionState, config: &TerminalConfig) -> SessionView {
    debug!("get_session command");
    state.with_session(|s| SessionView::capture(s, config.tax_rate()))
}

/// Removes a line from the vault by unique code.
pub fn remove_line(
    state: &SessionState,
    config: &TerminalConfig,
    unique_code: &str,
) -> Result<SessionView, TerminalError> {
    debug!(code = %unique_code, "remove_line command");

    state.with_session_mut(|s| {
        s.vault.remove(unique_code)?;
        Ok::<SessionView, CoreError>(SessionView::capture(s, config.tax_rate()))
    })
    .map_err(TerminalError::from)
}

/// Sets the quantity of a line (>= 1; removal is a separate command).
pub fn set_line_quantity(
    state: &SessionState,
    config: &TerminalConfig,
    unique_code: &str,
    quantity: i64,
) -> Result<SessionView, TerminalError> {
    debug!(code = %unique_code, quantity = %quantity, "set_line_quantity command");

    state.with_session_mut(|s| {
        s.vault.set_quantity(unique_code, quantity)?;
        Ok::<SessionView, CoreError>(SessionView::capture(s, config.tax_rate()))
    })
    .map_err(TerminalError::from)
}

/// Clears all lines from the vault, keeping discounts and step.
///
/// ## When Used
/// The operator empties the vault but keeps the customer at the counter
/// (wrong tray scanned). For a full reset between customers, use
/// [`reset_session`].
pub fn clear_vault(state: &SessionState, config: &TerminalConfig) -> SessionView {
    debug!("clear_vault command");

    state.with_session_mut(|s| {
        s.vault.clear();
        SessionView::capture(s, config.tax_rate())
    })
}

/// Resets the whole session: vault, discounts, customer capture, step.
///
/// ## When Used
/// - The operator cancels the sale
/// - After invoice confirmation (done internally by `confirm_sale`)
pub fn reset_session(state: &SessionState, config: &TerminalConfig) -> SessionView {
    debug!("reset_session command");

    state.with_session_mut(|s| {
        s.reset();
        SessionView::capture(s, config.tax_rate())
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
