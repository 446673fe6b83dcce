//! # Terminal Configuration
//!
//! Stores billing-terminal configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SUVARNA_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//! If hot-reloading is added later, we'd wrap in `RwLock`.

use serde::{Deserialize, Serialize};

use suvarna_core::{CouponTable, TaxRate, DEFAULT_OVERRIDE_CODE, GST_RATE_BPS, MANAGER_WAIVER_BPS};

/// Billing terminal configuration.
///
/// ## Fields
/// All fields have working defaults for development against a local portal
/// backend. Production deployments configure these per branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalConfig {
    /// Store name (displayed on invoices).
    pub store_name: String,

    /// Currency symbol (for display).
    pub currency_symbol: String,

    /// GST rate in basis points (1800 = 18%).
    pub gst_rate_bps: u32,

    /// Default manager waiver percent in basis points (500 = 5%).
    pub default_waiver_bps: u32,

    /// Manager override code for unlocking the waiver.
    ///
    /// Ships as the demo value from suvarna-core; set
    /// `SUVARNA_OVERRIDE_CODE` per branch. There is no lockout policy on
    /// failed attempts (see `DiscountState::unlock_waiver`).
    pub override_code: String,

    /// Recognized promotional codes and their fixed waivers.
    #[serde(skip)]
    pub coupons: CouponTable,

    /// Inventory service root URL.
    pub inventory_base_url: String,

    /// Bearer token for the inventory service, if required.
    pub inventory_token: Option<String>,
}

impl Default for TerminalConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Suvarna Heritage House"
    /// - GST: 18%
    /// - Waiver: 5% behind the demo override code
    /// - Inventory: local portal backend, no token
    fn default() -> Self {
        TerminalConfig {
            store_name: "Suvarna Heritage House".to_string(),
            currency_symbol: "₹".to_string(),
            gst_rate_bps: GST_RATE_BPS,
            default_waiver_bps: MANAGER_WAIVER_BPS,
            override_code: DEFAULT_OVERRIDE_CODE.to_string(),
            coupons: CouponTable::default(),
            inventory_base_url: "http://localhost:3000".to_string(),
            inventory_token: None,
        }
    }
}

impl TerminalConfig {
    /// Creates a TerminalConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SUVARNA_STORE_NAME`: Override store name
    /// - `SUVARNA_GST_RATE`: Override GST rate as a percentage (e.g. "18")
    /// - `SUVARNA_WAIVER_PERCENT`: Override default waiver percent
    /// - `SUVARNA_OVERRIDE_CODE`: Override the manager code
    /// - `SUVARNA_INVENTORY_URL`: Inventory service root
    /// - `SUVARNA_INVENTORY_TOKEN`: Bearer token for the inventory service
    pub fn from_env() -> Self {
        let mut config = TerminalConfig::default();

        if let Ok(store_name) = std::env::var("SUVARNA_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(rate_str) = std::env::var("SUVARNA_GST_RATE") {
            if let Ok(rate) = rate_str.parse::<f64>() {
                config.gst_rate_bps = (rate * 100.0).round() as u32;
            }
        }

        if let Ok(pct_str) = std::env::var("SUVARNA_WAIVER_PERCENT") {
            if let Ok(pct) = pct_str.parse::<f64>() {
                config.default_waiver_bps = (pct * 100.0).round() as u32;
            }
        }

        if let Ok(code) = std::env::var("SUVARNA_OVERRIDE_CODE") {
            config.override_code = code;
        }

        if let Ok(url) = std::env::var("SUVARNA_INVENTORY_URL") {
            config.inventory_base_url = url;
        }

        if let Ok(token) = std::env::var("SUVARNA_INVENTORY_TOKEN") {
            config.inventory_token = Some(token);
        }

        config
    }

    /// Returns the configured GST rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.gst_rate_bps)
    }

    /// Formats a paise amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use suvarna_terminal::TerminalConfig;
    ///
    /// let config = TerminalConfig::default();
    /// assert_eq!(config.format_currency(123456), "₹1234.56");
    /// ```
    pub fn format_currency(&self, paise: i64) -> String {
        format!(
            "{}{}{}.{:02}",
            if paise < 0 { "-" } else { "" },
            self.currency_symbol,
            (paise / 100).abs(),
            (paise % 100).abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TerminalConfig::default();
        assert_eq!(config.gst_rate_bps, 1800);
        assert_eq!(config.default_waiver_bps, 500);
        assert_eq!(config.override_code, "1234");
        assert!(config.coupons.waiver_for("HERITAGE2026").is_some());
        assert_eq!(config.tax_rate().bps(), 1800);
    }

    #[test]
    fn test_format_currency() {
        let config = TerminalConfig::default();
        assert_eq!(config.format_currency(123456), "₹1234.56");
        assert_eq!(config.format_currency(100), "₹1.00");
        assert_eq!(config.format_currency(1), "₹0.01");
        assert_eq!(config.format_currency(0), "₹0.00");
        assert_eq!(config.format_currency(-123456), "-₹1234.56");
    }
}
