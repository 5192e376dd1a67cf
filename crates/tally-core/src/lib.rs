//! # tally-core: Pure Business Logic for Tally POS
//!
//! This crate is the **heart** of Tally POS. It owns the product catalog,
//! the committed sales and the cash balance, and keeps stock and cash
//! consistent across sale commits and cancellations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Presentation (external collaborator)                │   │
//! │  │    Product Form ──► Sale Entry ──► Sales Management             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ calls                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                tally-register (host commands)                   │   │
//! │  │    register_product, add_line_item, commit_sale, cancel_sale   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ registry  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  commit   │  │   rules   │  │   │
//! │  │   │   Sale    │  │           │  │  cancel   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, SaleLineItem, SaleStatus)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`registry`] - Product + sale store and the transaction logic
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Money, Product, Registry};
//!
//! let mut registry = Registry::new();
//! registry
//!     .register_product(Product::new("001", "Rice 5kg", Money::from_cents(2590), 10))
//!     .unwrap();
//!
//! let mut sale = registry.begin_sale();
//! registry.add_line_item(&mut sale, "001", 3).unwrap();
//! registry.commit_sale(sale).unwrap();
//!
//! assert_eq!(registry.find_product("001").unwrap().stock, 7);
//! assert_eq!(registry.cash_balance().cents(), 7770);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod registry;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use registry::Registry;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single sale
///
/// ## Business Reason
/// Prevents runaway sales and keeps transactions a reasonable size.
pub const MAX_SALE_LINES: usize = 100;

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;
