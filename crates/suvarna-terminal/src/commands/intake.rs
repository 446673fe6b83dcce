//! # Intake Commands
//!
//! Admission of pieces into the vault, by scanner or by search.
//!
//! ## Scan Admission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Scanner fires with raw payload (often a URL ending in the code)       │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  1. Claim the scan slot (ScanBusy if another scan is outstanding)      │
//! │  2. Normalize payload → unique code (trailing path segment)            │
//! │  3. Vault membership check → DuplicateLine (no lookup fired)           │
//! │  4. ONE remote lookup → NotFound / AlreadySold / transport error       │
//! │  5. Admit with quantity 1, recompute totals, respond                   │
//! │                    │                                                    │
//! │  The slot releases on every path out, success or error.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Search admission skips steps 1-2 and 4: the search already returned the
//! record, so only the membership check and admission run.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use suvarna_core::validation::{validate_search_query, validate_unique_code};
use suvarna_core::{CoreError, Ornament, VaultLine};
use suvarna_inventory::{InventoryLookup, LookupError};

use crate::commands::SessionView;
use crate::config::TerminalConfig;
use crate::error::TerminalError;
use crate::state::SessionState;

/// Response to a successful admission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeResponse {
    /// The line that was just admitted.
    pub line: VaultLine,

    /// Refreshed session snapshot.
    pub session: SessionView,
}

/// Extracts the unique code from a raw scan payload.
///
/// QR tags encode the catalog URL of the piece; the unique code is the
/// trailing path segment. Bare codes pass through unchanged.
///
/// ## Example
/// ```rust
/// use suvarna_terminal::commands::intake::normalize_scan_code;
///
/// assert_eq!(
///     normalize_scan_code("https://portal.example/products/scan/abc-123"),
///     "abc-123"
/// );
/// assert_eq!(normalize_scan_code("abc-123"), "abc-123");
/// ```
pub fn normalize_scan_code(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.rsplit_once('/') {
        Some((_, tail)) => tail,
        None => raw,
    }
}

/// Admits a scanned piece into the vault.
///
/// Exactly one remote lookup per call, no retries. A failed admission
/// leaves the vault unchanged; the operator re-scans.
///
/// ## Errors
/// - `ScanBusy` while another scan is being processed
/// - `DuplicateLine` if the code is already in the vault
/// - `NotFound` / `AlreadySold` / `LookupFailed` from the remote lookup
pub async fn scan_ornament(
    state: &SessionState,
    config: &TerminalConfig,
    inventory: &dyn InventoryLookup,
    raw_scan: &str,
) -> Result<IntakeResponse, TerminalError> {
    let _permit = state.try_begin_scan().ok_or_else(TerminalError::scan_busy)?;

    let code = normalize_scan_code(raw_scan);
    debug!(raw = %raw_scan, code = %code, "scan_ornament command");
    validate_unique_code(code).map_err(CoreError::from)?;

    // Membership fast path: a re-scan of an admitted piece must not cost
    // a remote lookup
    if state.with_session(|s| s.vault.contains(code)) {
        return Err(CoreError::DuplicateLine(code.to_string()).into());
    }

    let ornament = inventory.fetch_sellable(code).await?;

    let response = state.with_session_mut(|s| {
        let line = s.vault.admit(&ornament)?;
        Ok::<IntakeResponse, CoreError>(IntakeResponse {
            line,
            session: SessionView::capture(s, config.tax_rate()),
        })
    })?;

    info!(code = %code, name = %ornament.name, "piece verified and admitted");
    Ok(response)
}

/// Admits a piece picked from search results.
///
/// The search already returned the record, so no remote lookup runs here —
/// just the same membership guard and admission as a scan.
pub fn add_search_result(
    state: &SessionState,
    config: &TerminalConfig,
    ornament: &Ornament,
) -> Result<IntakeResponse, TerminalError> {
    debug!(code = %ornament.unique_code, "add_search_result command");

    // Stale search panes can offer a piece sold since the query ran
    if !ornament.is_sellable() {
        return Err(LookupError::AlreadySold(ornament.unique_code.clone()).into());
    }

    let response = state.with_session_mut(|s| {
        let line = s.vault.admit(ornament)?;
        Ok::<IntakeResponse, CoreError>(IntakeResponse {
            line,
            session: SessionView::capture(s, config.tax_rate()),
        })
    })?;

    info!(code = %ornament.unique_code, "search result admitted");
    Ok(response)
}

/// Searches sellable pieces by name, id, or gram weight.
///
/// An empty query returns no results rather than the full catalog — the
/// search pane clears when the operator clears the box.
pub async fn search_ornaments(
    inventory: &dyn InventoryLookup,
    query: &str,
) -> Result<Vec<Ornament>, TerminalError> {
    let query = validate_search_query(query).map_err(CoreError::from)?;
    if query.is_empty() {
        return Ok(Vec::new());
    }

    debug!(query = %query, "search_ornaments command");
    let hits = inventory.search(&query).await?;
    Ok(hits)
}

// =============================================================================
// Unit Tests
// =============================================================================
