//! # suvarna-inventory: Inventory Lookup Boundary for Suvarna POS
//!
//! Everything the billing terminal knows about a piece of jewelry comes
//! through this crate. The inventory service owns persistence and the
//! sold-state truth; we only ask questions and relay answers.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Suvarna POS Lookup Flow                             │
//! │                                                                         │
//! │  suvarna-terminal (scan_ornament command)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                suvarna-inventory (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   InventoryLookup (trait)                                       │   │
//! │  │        ├── HttpInventoryClient ──► portal backend (HTTP/JSON)  │   │
//! │  │        └── MemoryInventory     ──► HashMap (tests/walkthrough) │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ONE REQUEST PER CALL • NO RETRIES • TYPED ERRORS                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - HTTP client against the portal backend's product routes
//! - [`memory`] - In-memory implementation for tests and the walkthrough
//! - [`error`] - Lookup error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use suvarna_inventory::{HttpInventoryClient, InventoryLookup};
//!
//! let client = HttpInventoryClient::new("http://localhost:3000", Some("token"))?;
//! let piece = client.fetch_sellable("550e8400-...").await?;
//! ```

use async_trait::async_trait;

use suvarna_core::Ornament;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::HttpInventoryClient;
pub use error::{LookupError, LookupResult};
pub use memory::MemoryInventory;

// =============================================================================
// Lookup Trait
// =============================================================================

/// The inventory service seam.
///
/// Implementations answer three questions the terminal asks:
/// can this scanned code be sold, what matches this search, and
/// (after invoicing) mark these codes sold.
///
/// ## Contract
/// - `fetch_sellable` performs exactly one remote lookup per call and
///   never retries; failures surface to the caller
/// - `search` returns sellable records only
/// - Implementations must be safe to share across tasks (`Send + Sync`)
#[async_trait]
pub trait InventoryLookup: Send + Sync {
    /// Fetches the record for a scanned code if it exists and is unsold.
    ///
    /// ## Errors
    /// - [`LookupError::NotFound`] - no record for this code
    /// - [`LookupError::AlreadySold`] - record exists but is sold
    /// - Transport/decode errors as they occur
    async fn fetch_sellable(&self, unique_code: &str) -> LookupResult<Ornament>;

    /// Searches sellable records by name, id, or gram weight.
    async fn search(&self, query: &str) -> LookupResult<Vec<Ornament>>;

    /// Marks a piece sold. Invoked by the invoicing flow, never by intake.
    ///
    /// ## Errors
    /// Same mapping as [`InventoryLookup::fetch_sellable`]: selling an
    /// unknown or already-sold code is refused by the service.
    async fn mark_sold(&self, unique_code: &str) -> LookupResult<()>;
}
