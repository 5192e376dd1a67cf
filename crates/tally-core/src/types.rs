//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │  SaleLineItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code (unique)  │◄──┼─ lines ─────────┼──►│  product_code   │       │
//! │  │  name           │   │  id (UUID)      │   │  quantity       │       │
//! │  │  price (Money)  │   │  created_at     │   └─────────────────┘       │
//! │  │  stock          │   │  status         │                             │
//! │  └─────────────────┘   └─────────────────┘   ┌─────────────────┐       │
//! │                                              │   SaleStatus    │       │
//! │                                              │  Building       │       │
//! │                                              │  Committed      │       │
//! │                                              │  Cancelled      │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reference, Not Snapshot
//! A line item stores the product *code* only. Its total is resolved through
//! the [`Registry`](crate::Registry) at read time, so a price change is
//! visible on every sale that sells the product.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Business identifier, unique across the registry (e.g. "001").
    pub code: String,

    /// Display name shown to the cashier.
    pub name: String,

    /// Unit price. Always positive once registered.
    pub price: Money,

    /// Units on hand. Never negative.
    pub stock: i64,
}

impl Product {
    /// Creates a product. Nothing is validated until it is registered.
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Product {
            code: code.into(),
            name: name.into(),
            price,
            stock,
        }
    }

    /// Checks whether `quantity` units can be taken from stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Whether any stock is left.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale.
///
/// ```text
/// Building ──commit──► Committed ──cancel──► Cancelled
/// ```
///
/// `Building` sales are held by the caller and never stored in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Items are being added.
    #[default]
    Building,
    /// Stock was taken and the total counted in the cash balance.
    Committed,
    /// Stock was returned and the total removed from the cash balance.
    Cancelled,
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SaleStatus::Building => "building",
            SaleStatus::Committed => "committed",
            SaleStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Sale Line Item
// =============================================================================

/// A (product, quantity) pair within a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineItem {
    /// Code of the referenced product.
    pub product_code: String,
    /// Units sold. Always positive.
    pub quantity: i64,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Generated at creation (UUID v4).
    pub id: String,
    /// Line items in the order they were added.
    pub lines: Vec<SaleLineItem>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub status: SaleStatus,
}

impl Sale {
    /// Starts an empty sale with a fresh id and the current time.
    pub fn new() -> Self {
        Sale {
            id: Uuid::new_v4().to_string(),
            lines: Vec::new(),
            created_at: Utc::now(),
            status: SaleStatus::Building,
        }
    }

    /// Whether the sale has been cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.status == SaleStatus::Cancelled
    }

    /// Whether the sale is still being built.
    #[inline]
    pub fn is_building(&self) -> bool {
        self.status == SaleStatus::Building
    }

    /// Whether the sale has no line items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

impl Default for Sale {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sale_is_empty_and_building() {
        let sale = Sale::new();
        assert!(sale.is_building());
        assert!(sale.is_empty());
        assert!(!sale.is_cancelled());
        assert!(Uuid::parse_str(&sale.id).is_ok());
    }

    #[test]
    fn test_sale_ids_are_unique() {
        assert_ne!(Sale::new().id, Sale::new().id);
    }

    #[test]
    fn test_product_can_sell() {
        let product = Product::new("002", "Beans 1kg", Money::from_cents(890), 2);
        assert!(product.can_sell(2));
        assert!(!product.can_sell(3));
        assert!(product.in_stock());
    }

    #[test]
    fn test_total_quantity() {
        let mut sale = Sale::new();
        sale.lines.push(SaleLineItem {
            product_code: "001".to_string(),
            quantity: 3,
        });
        sale.lines.push(SaleLineItem {
            product_code: "002".to_string(),
            quantity: 2,
        });
        assert_eq!(sale.total_quantity(), 5);
    }

    #[test]
    fn test_sale_status_serializes_snake_case() {
        let json = serde_json::to_string(&SaleStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        assert_eq!(SaleStatus::Committed.to_string(), "committed");
    }
}
