//! # Checkout Session State
//!
//! One active checkout session per terminal: the vault, the discount state,
//! the checkout step, and the captured customer details. Everything here is
//! discarded when the sale confirms or the operator resets.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. Commands may run concurrently on the async runtime
//! 2. Only one command should mutate the session at a time
//!
//! The lock is only held for the duration of a closure — never across an
//! await point. Remote lookups happen between lock acquisitions; the vault's
//! own insertion invariant re-checks duplicates after the await.
//!
//! ## The Scan In-Flight Flag
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A physical scanner can fire twice for one tag (shaky hands, glossy    │
//! │  tag film). The second event must not start a second admit while the   │
//! │  first one's remote lookup is outstanding:                             │
//! │                                                                         │
//! │  scan #1 ──► try_begin_scan() ─► permit ─► lookup ─► admit ─► drop     │
//! │  scan #2 ──► try_begin_scan() ─► None  ─► ScanBusy (no lookup fired)   │
//! │                                                                         │
//! │  The permit releases the flag on drop, including every error path.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use suvarna_core::{CheckoutStep, CustomerCapture, DiscountState, Vault};

// =============================================================================
// Checkout Session
// =============================================================================

/// The state of one in-progress checkout.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSession {
    /// The vault of admitted pieces.
    pub vault: Vault,

    /// Manager and coupon waivers.
    pub discount: DiscountState,

    /// Current checkout step (starts at Billing).
    pub step: CheckoutStep,

    /// Customer details captured at step 2.
    pub customer: CustomerCapture,
}

impl CheckoutSession {
    /// Creates a fresh session.
    pub fn new() -> Self {
        CheckoutSession::default()
    }

    /// Resets the session for the next customer.
    ///
    /// Clears the vault, discounts, customer capture, and returns the step
    /// to Billing.
    pub fn reset(&mut self) {
        self.vault.clear();
        self.discount.reset();
        self.step = CheckoutStep::Billing;
        self.customer = CustomerCapture::default();
    }
}

// =============================================================================
// Session State
// =============================================================================

/// Shared handle to the active checkout session.
///
/// ## Why Not RwLock?
/// Session operations are quick and most of them mutate state. An RwLock
/// would add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<CheckoutSession>>,
    scan_in_flight: Arc<AtomicBool>,
}

impl SessionState {
    /// Creates a new state holding a fresh session.
    pub fn new() -> Self {
        SessionState {
            session: Arc::new(Mutex::new(CheckoutSession::new())),
            scan_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = state.with_session(|s| s.vault.line_count());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CheckoutSession) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_session_mut(|s| s.vault.remove(&code))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CheckoutSession) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }

    /// Claims the scan slot, if free.
    ///
    /// Returns `None` while another scan is outstanding. The returned
    /// permit releases the slot when dropped.
    pub fn try_begin_scan(&self) -> Option<ScanPermit> {
        self.scan_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ScanPermit {
                flag: Arc::clone(&self.scan_in_flight),
            })
    }

    /// Whether a scan is currently being processed.
    pub fn scan_in_flight(&self) -> bool {
        self.scan_in_flight.load(Ordering::Acquire)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new()
    }
}

/// Exclusive claim on the scan slot; releases on drop.
#[derive(Debug)]
pub struct ScanPermit {
    flag: Arc<AtomicBool>,
}

impl Drop for ScanPermit {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use suvarna_core::Ornament;

    fn ornament(code: &str) -> Ornament {
        Ornament {
            id: format!("db-{}", code),
            unique_code: code.to_string(),
            name: "Test Piece".to_string(),
            metal_type: "Gold".to_string(),
            grams: 10.0,
            carats: 22,
            cost_paise: 100_000,
            is_sold: false,
            sold_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_session_reset() {
        let mut session = CheckoutSession::new();
        session.vault.admit(&ornament("A1")).unwrap();
        session.discount.unlock_waiver("1234", "1234").unwrap();
        session.step = CheckoutStep::CustomerCapture;
        session.customer.name = "Asha Rao".to_string();

        session.reset();

        assert!(session.vault.is_empty());
        assert!(!session.discount.manager_unlocked);
        assert_eq!(session.step, CheckoutStep::Billing);
        assert!(session.customer.is_empty());
    }

    #[test]
    fn test_with_session_accessors() {
        let state = SessionState::new();

        state.with_session_mut(|s| s.vault.admit(&ornament("A1")).map(|_| ())).unwrap();
        assert_eq!(state.with_session(|s| s.vault.line_count()), 1);
    }

    #[test]
    fn test_scan_permit_excludes_second_scan() {
        let state = SessionState::new();

        let permit = state.try_begin_scan().expect("first scan claims the slot");
        assert!(state.scan_in_flight());
        assert!(state.try_begin_scan().is_none());

        drop(permit);
        assert!(!state.scan_in_flight());
        assert!(state.try_begin_scan().is_some());
    }

    #[test]
    fn test_scan_permit_releases_on_early_exit() {
        let state = SessionState::new();

        // Simulates an admit path that errors out after claiming the slot
        fn failing_admit(state: &SessionState) -> Result<(), ()> {
            let _permit = state.try_begin_scan().ok_or(())?;
            Err(())
        }

        assert!(failing_admit(&state).is_err());
        assert!(!state.scan_in_flight());
    }
}
