//! # State Module
//!
//! State held by the billing terminal for the duration of a checkout.
//!
//! Two kinds of state live at this layer, deliberately separate:
//!
//! - [`SessionState`] — the mutable checkout session (vault, discounts,
//!   step, customer), reset between customers
//! - [`crate::TerminalConfig`] — read-only after startup, lives outside
//!   this module because nothing here mutates it
//!
//! Separate types keep command signatures honest: a command that only needs
//! the session doesn't receive the config, and vice versa.

mod session;

pub use session::{CheckoutSession, ScanPermit, SessionState};
