//! # HTTP Inventory Client
//!
//! Production [`InventoryLookup`] implementation against the portal
//! backend's product routes.
//!
//! # API Reference
//!
//! - `GET  {base}/api/products/scan/{code}` — sellable record, or
//!   404 (no record) / 400 (already sold)
//! - `GET  {base}/api/products/search?query=` — `{ "products": [...] }`,
//!   pre-filtered to unsold records
//! - `PUT  {base}/api/products/sell/{code}` — marks the piece sold, with
//!   the same 404/400 mapping as scan
//! - Authentication: bearer token via `Authorization` header
//!
//! One request per call, no retries: a scan either admits or the operator
//! scans again. Slow responses are caller-visible as a pending admit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use suvarna_core::Ornament;

use crate::error::{LookupError, LookupResult};
use crate::InventoryLookup;

// =============================================================================
// Wire Records
// =============================================================================

/// A product record as the portal backend serializes it.
///
/// Costs travel as rupees on the wire (the service stores them that way);
/// conversion to integer paise happens exactly once, here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireOrnament {
    id: String,
    unique_code: String,
    name: String,
    #[serde(default)]
    metal_type: String,
    grams: f64,
    carats: u32,
    cost: f64,
    is_sold: bool,
    #[serde(default)]
    sold_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<WireOrnament> for Ornament {
    fn from(wire: WireOrnament) -> Self {
        Ornament {
            id: wire.id,
            unique_code: wire.unique_code,
            name: wire.name,
            metal_type: wire.metal_type,
            grams: wire.grams,
            carats: wire.carats,
            cost_paise: (wire.cost * 100.0).round() as i64,
            is_sold: wire.is_sold,
            sold_at: wire.sold_at,
            created_at: wire.created_at,
        }
    }
}

/// Search response envelope.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    products: Vec<WireOrnament>,
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client for the inventory service.
///
/// Cheap to clone; the underlying `reqwest::Client` is an Arc internally.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventoryClient {
    /// Creates a new inventory client.
    ///
    /// ## Arguments
    /// * `base_url` - Service root, e.g. `http://localhost:3000`
    /// * `token` - Bearer token for the `Authorization` header, if the
    ///   deployment requires one
    ///
    /// ## Errors
    /// Returns [`LookupError::Decode`] if the token is not a valid header
    /// value, or a transport error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, token: Option<&str>) -> LookupResult<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| LookupError::Decode(format!("invalid token format: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(HttpInventoryClient { client, base_url })
    }

    /// Maps an error status to the business-level lookup error.
    ///
    /// The service signals "no record" with 404 and "already sold" with 400
    /// on both the scan and sell routes.
    fn map_error_status(status: StatusCode, code: &str) -> LookupError {
        match status {
            StatusCode::NOT_FOUND => LookupError::NotFound(code.to_string()),
            StatusCode::BAD_REQUEST => LookupError::AlreadySold(code.to_string()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LookupError::Unauthorized,
            other => LookupError::UnexpectedStatus(other.as_u16()),
        }
    }
}

#[async_trait]
impl InventoryLookup for HttpInventoryClient {
    async fn fetch_sellable(&self, unique_code: &str) -> LookupResult<Ornament> {
        let url = format!("{}/api/products/scan/{}", self.base_url, unique_code);
        debug!(code = %unique_code, "inventory scan lookup");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(code = %unique_code, status = %status, "scan lookup rejected");
            return Err(Self::map_error_status(status, unique_code));
        }

        let wire: WireOrnament = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        Ok(wire.into())
    }

    async fn search(&self, query: &str) -> LookupResult<Vec<Ornament>> {
        let url = format!("{}/api/products/search", self.base_url);
        debug!(query = %query, "inventory search");

        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                return Err(LookupError::Unauthorized);
            }
            return Err(LookupError::UnexpectedStatus(status.as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        debug!(count = body.products.len(), "search returned records");
        Ok(body.products.into_iter().map(Ornament::from).collect())
    }

    async fn mark_sold(&self, unique_code: &str) -> LookupResult<()> {
        let url = format!("{}/api/products/sell/{}", self.base_url, unique_code);
        debug!(code = %unique_code, "marking piece sold");

        let response = self.client.put(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(code = %unique_code, status = %status, "mark sold rejected");
            return Err(Self::map_error_status(status, unique_code));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_record_parses_and_converts() {
        let json = r#"{
            "id": "ckx1",
            "uniqueCode": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Heritage Necklace",
            "metalType": "Gold",
            "grams": 24.5,
            "carats": 22,
            "cost": 184999.5,
            "manufactureDate": "2025-11-02T00:00:00.000Z",
            "isSold": false,
            "soldAt": null,
            "createdAt": "2025-11-03T10:15:00.000Z"
        }"#;

        let wire: WireOrnament = serde_json::from_str(json).unwrap();
        let ornament: Ornament = wire.into();

        assert_eq!(ornament.unique_code, "550e8400-e29b-41d4-a716-446655440000");
        // Rupees on the wire become integer paise exactly once
        assert_eq!(ornament.cost_paise, 18_499_950);
        assert!(ornament.is_sellable());
        assert!(ornament.sold_at.is_none());
    }

    #[test]
    fn test_wire_record_tolerates_missing_optionals() {
        // Older records predate the metalType and soldAt columns
        let json = r#"{
            "id": "ckx2",
            "uniqueCode": "abc-123",
            "name": "Plain Band",
            "grams": 3.1,
            "carats": 22,
            "cost": 12000,
            "isSold": true,
            "createdAt": "2024-01-01T00:00:00.000Z"
        }"#;

        let wire: WireOrnament = serde_json::from_str(json).unwrap();
        assert!(wire.metal_type.is_empty());
        assert!(wire.sold_at.is_none());

        let ornament: Ornament = wire.into();
        assert!(!ornament.is_sellable());
        assert_eq!(ornament.cost_paise, 1_200_000);
    }

    #[test]
    fn test_search_envelope_parses() {
        let json = r#"{"products": []}"#;
        let body: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(body.products.is_empty());
    }

    #[test]
    fn test_error_status_mapping() {
        assert!(matches!(
            HttpInventoryClient::map_error_status(StatusCode::NOT_FOUND, "x"),
            LookupError::NotFound(_)
        ));
        assert!(matches!(
            HttpInventoryClient::map_error_status(StatusCode::BAD_REQUEST, "x"),
            LookupError::AlreadySold(_)
        ));
        assert!(matches!(
            HttpInventoryClient::map_error_status(StatusCode::FORBIDDEN, "x"),
            LookupError::Unauthorized
        ));
        assert!(matches!(
            HttpInventoryClient::map_error_status(StatusCode::BAD_GATEWAY, "x"),
            LookupError::UnexpectedStatus(502)
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpInventoryClient::new("http://localhost:3000/", None).unwrap();
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
