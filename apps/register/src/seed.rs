//! # Sample Catalog
//!
//! Registers a small grocery catalog so a fresh register has something to
//! sell during development.
//!
//! ## Usage
//! ```bash
//! # Seeded by default
//! cargo run -p tally-register
//!
//! # Start with an empty catalog
//! TALLY_SEED_CATALOG=false cargo run -p tally-register
//! ```

use tally_core::{CoreResult, Money, Product};
use tracing::{debug, info};

use crate::state::RegistryState;

/// (code, name, price in cents, stock)
pub const SAMPLE_CATALOG: &[(&str, &str, i64, i64)] = &[
    ("001", "Rice 5kg", 2590, 10),
    ("002", "Beans 1kg", 890, 20),
    ("003", "Coffee 500g", 1250, 15),
    ("004", "Soybean Oil 900ml", 780, 30),
    ("005", "Sugar 2kg", 970, 25),
];

/// Registers every sample product whose code is still free.
///
/// Returns how many products were added. Codes already in the catalog are
/// skipped so seeding twice is harmless.
pub fn seed_sample_catalog(registry: &RegistryState) -> CoreResult<usize> {
    registry.with_registry_mut(|r| {
        let mut added = 0;
        for &(code, name, price_cents, stock) in SAMPLE_CATALOG {
            if r.find_product(code).is_some() {
                debug!(code, "Sample product already registered");
                continue;
            }
            r.register_product(Product::new(code, name, Money::from_cents(price_cents), stock))?;
            added += 1;
        }

        info!(added, total = r.list_products().len(), "Seeded sample catalog");
        Ok(added)
    })
}
