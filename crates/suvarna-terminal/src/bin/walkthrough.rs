//! # Checkout Walkthrough
//!
//! Drives a scripted checkout against the in-memory inventory, exercising
//! the same command path the portal uses: scan, duplicate scan, search add,
//! coupon, manager waiver, step gate, customer capture, confirmation.
//!
//! ## Usage
//! ```bash
//! cargo run -p suvarna-terminal --bin walkthrough
//!
//! # With debug logging
//! RUST_LOG=debug cargo run -p suvarna-terminal --bin walkthrough
//! ```

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use suvarna_core::{CustomerCapture, Ornament};
use suvarna_inventory::MemoryInventory;
use suvarna_terminal::commands::{billing, intake, vault};
use suvarna_terminal::{InvoiceBackend, InvoiceError, InvoiceOrder, SessionState, TerminalConfig};

/// Demo pieces seeded into the inventory: (name, grams, carats, cost in rupees).
const SHOWCASE: &[(&str, f64, u32, i64)] = &[
    ("Heritage Temple Necklace", 42.3, 22, 312_000),
    ("Peacock Jhumka Pair", 18.6, 22, 98_500),
    ("Antique Kada", 31.0, 24, 214_750),
    ("Navaratna Ring", 8.2, 22, 56_300),
];

/// Invoice backend that just logs the order and mints a number.
struct LoggingInvoiceBackend;

#[async_trait]
impl InvoiceBackend for LoggingInvoiceBackend {
    async fn generate_invoice(&self, order: &InvoiceOrder) -> Result<String, InvoiceError> {
        info!(
            store = %order.store_name,
            customer = %order.customer.name,
            lines = order.lines.len(),
            total = %order.totals.total,
            "generating invoice"
        );
        Ok(format!("INV-{}", Uuid::new_v4()))
    }
}

fn seed_piece(index: usize) -> Ornament {
    let (name, grams, carats, cost_rupees) = SHOWCASE[index];
    Ornament {
        id: format!("db-{:04}", index + 1),
        unique_code: Uuid::new_v4().to_string(),
        name: name.to_string(),
        metal_type: "Gold".to_string(),
        grams,
        carats,
        cost_paise: cost_rupees * 100,
        is_sold: false,
        sold_at: None,
        created_at: Utc::now(),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = TerminalConfig::from_env();
    let state = SessionState::new();
    let inventory = MemoryInventory::new();
    let backend = LoggingInvoiceBackend;

    info!(store = %config.store_name, "terminal ready");

    // Seed the showcase
    let pieces: Vec<Ornament> = (0..SHOWCASE.len()).map(seed_piece).collect();
    for piece in &pieces {
        inventory.insert(piece.clone()).await;
    }
    info!(count = inventory.len().await, "inventory seeded");

    // Scan the necklace via its QR payload (a catalog URL)
    let qr_payload = format!(
        "{}/api/products/scan/{}",
        config.inventory_base_url, pieces[0].unique_code
    );
    let admitted = intake::scan_ornament(&state, &config, &inventory, &qr_payload)
        .await
        .expect("first scan admits");
    info!(
        name = %admitted.line.name,
        total = %admitted.session.totals.total,
        "admitted by scan"
    );

    // The scanner double-fires; the duplicate is refused
    if let Err(e) = intake::scan_ornament(&state, &config, &inventory, &qr_payload).await {
        warn!(code = ?e.code, "{}", e.message);
    }

    // Find the jhumkas by search and add from the results pane
    let hits = intake::search_ornaments(&inventory, "jhumka")
        .await
        .expect("search succeeds");
    info!(hits = hits.len(), "search results");
    let added = intake::add_search_result(&state, &config, &hits[0]).expect("search add");
    info!(
        name = %added.line.name,
        subtotal = %added.session.totals.subtotal,
        "admitted from search"
    );

    // A mistyped reward code, then the real campaign code
    if let Err(e) = billing::apply_coupon(&state, &config, "HERITAGE2025") {
        warn!(code = ?e.code, "{}", e.message);
    }
    let view = billing::apply_coupon(&state, &config, "HERITAGE2026").expect("campaign code");
    info!(waiver = %view.totals.coupon_waiver, "coupon applied");

    // Manager walks over and unlocks the percentage waiver
    let view =
        billing::unlock_manager_waiver(&state, &config, &config.override_code).expect("unlock");
    info!(
        waiver = %view.totals.manager_waiver,
        total = %view.totals.total,
        "manager waiver active"
    );

    // On to customer capture
    let view = billing::advance_to_customer(&state, &config).expect("vault is non-empty");
    info!(step = ?view.step, "checkout advanced");

    billing::capture_customer(
        &state,
        &config,
        CustomerCapture {
            name: "Asha Rao".to_string(),
            phone: "+91 98765 43210".to_string(),
            email: "asha@example.com".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
        },
    )
    .expect("customer details are valid");

    let receipt = billing::confirm_sale(&state, &config, &inventory, &backend)
        .await
        .expect("confirmation succeeds");
    info!(
        invoice = %receipt.invoice_number,
        total = %config.format_currency(receipt.total_paise),
        "sale complete"
    );

    // Fresh session for the next customer
    let view = vault::get_session(&state, &config);
    info!(lines = view.lines.len(), step = ?view.step, "terminal reset");
}
