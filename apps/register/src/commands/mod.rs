//! # Register Commands Module
//!
//! All commands exposed to the presentation layer.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Catalog registration, lookup, price and stock
//! └── sale.rs     ◄─── Draft sale, commit, cancel, cash balance
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Presentation                                                           │
//! │  ────────────                                                           │
//! │  add_line_item(&registry, &draft, "001", 3)                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Register Host                                                          │
//! │  ─────────────                                                          │
//! │  fn add_line_item(                                                      │
//! │      registry: &RegistryState,  ◄── shared registry                    │
//! │      draft: &SaleDraftState,    ◄── current sale                       │
//! │      code: &str,                ◄── call params                        │
//! │      quantity: i64,                                                     │
//! │  ) -> Result<SaleDto, ApiError>                                         │
//! │         │                                                               │
//! │         │ (serde, camelCase)                                            │
//! │         ▼                                                               │
//! │  Presentation receives: SaleDto                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs.

pub mod product;
pub mod sale;

pub use product::*;
pub use sale::*;
