//! # In-Memory Inventory
//!
//! [`InventoryLookup`] implementation backed by a `HashMap`, with the same
//! semantics as the HTTP client. Used as the test double throughout the
//! workspace and as the backing store for the walkthrough binary.
//!
//! Keeping the double in the crate (instead of scattering ad-hoc mocks per
//! test) means every consumer exercises the same not-found / already-sold
//! behavior the production service has.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use suvarna_core::Ornament;

use crate::error::{LookupError, LookupResult};
use crate::InventoryLookup;

/// In-memory inventory keyed by unique code.
#[derive(Debug, Default)]
pub struct MemoryInventory {
    records: Mutex<HashMap<String, Ornament>>,
}

impl MemoryInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        MemoryInventory::default()
    }

    /// Seeds a record. Replaces any existing record with the same code.
    pub async fn insert(&self, ornament: Ornament) {
        let mut records = self.records.lock().await;
        records.insert(ornament.unique_code.clone(), ornament);
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether the inventory holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl InventoryLookup for MemoryInventory {
    async fn fetch_sellable(&self, unique_code: &str) -> LookupResult<Ornament> {
        let records = self.records.lock().await;

        let ornament = records
            .get(unique_code)
            .ok_or_else(|| LookupError::NotFound(unique_code.to_string()))?;

        if ornament.is_sold {
            return Err(LookupError::AlreadySold(unique_code.to_string()));
        }

        Ok(ornament.clone())
    }

    async fn search(&self, query: &str) -> LookupResult<Vec<Ornament>> {
        let records = self.records.lock().await;
        let query_lower = query.trim().to_lowercase();
        let query_grams: Option<f64> = query.trim().parse().ok();

        // Unsold records matching by name, id, or exact gram weight
        let mut hits: Vec<Ornament> = records
            .values()
            .filter(|o| !o.is_sold)
            .filter(|o| {
                !query_lower.is_empty()
                    && (o.name.to_lowercase().contains(&query_lower)
                        || o.id.to_lowercase().contains(&query_lower)
                        || query_grams.is_some_and(|g| o.grams == g))
            })
            .cloned()
            .collect();

        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(query = %query, count = hits.len(), "memory inventory search");
        Ok(hits)
    }

    async fn mark_sold(&self, unique_code: &str) -> LookupResult<()> {
        let mut records = self.records.lock().await;

        let ornament = records
            .get_mut(unique_code)
            .ok_or_else(|| LookupError::NotFound(unique_code.to_string()))?;

        if ornament.is_sold {
            return Err(LookupError::AlreadySold(unique_code.to_string()));
        }

        ornament.is_sold = true;
        ornament.sold_at = Some(Utc::now());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ornament(code: &str, name: &str, grams: f64) -> Ornament {
        Ornament {
            id: format!("db-{}", code),
            unique_code: code.to_string(),
            name: name.to_string(),
            metal_type: "Gold".to_string(),
            grams,
            carats: 22,
            cost_paise: 4_850_000,
            is_sold: false,
            sold_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_fetch_sellable() {
        let inventory = MemoryInventory::new();
        inventory.insert(ornament("A1", "Necklace", 24.5)).await;

        let found = inventory.fetch_sellable("A1").await.unwrap();
        assert_eq!(found.name, "Necklace");

        assert!(matches!(
            inventory.fetch_sellable("missing").await,
            Err(LookupError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_sold_piece_rejected() {
        let inventory = MemoryInventory::new();
        inventory.insert(ornament("A1", "Necklace", 24.5)).await;
        inventory.mark_sold("A1").await.unwrap();

        assert!(matches!(
            inventory.fetch_sellable("A1").await,
            Err(LookupError::AlreadySold(_))
        ));
    }

    #[tokio::test]
    async fn test_mark_sold_twice_rejected() {
        let inventory = MemoryInventory::new();
        inventory.insert(ornament("A1", "Necklace", 24.5)).await;

        inventory.mark_sold("A1").await.unwrap();
        assert!(matches!(
            inventory.mark_sold("A1").await,
            Err(LookupError::AlreadySold(_))
        ));
        assert!(matches!(
            inventory.mark_sold("missing").await,
            Err(LookupError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_filters_sold_and_matches() {
        let inventory = MemoryInventory::new();
        inventory.insert(ornament("A1", "Heritage Necklace", 24.5)).await;
        inventory.insert(ornament("B2", "Plain Band", 3.1)).await;
        inventory.insert(ornament("C3", "Heritage Ring", 8.0)).await;
        inventory.mark_sold("C3").await.unwrap();

        let hits = inventory.search("heritage").await.unwrap();
        assert_eq!(hits.len(), 1); // C3 is sold, only A1 matches
        assert_eq!(hits[0].unique_code, "A1");

        // Weight match
        let hits = inventory.search("3.1").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].unique_code, "B2");

        // Empty query returns nothing
        assert!(inventory.search("").await.unwrap().is_empty());
    }
}
