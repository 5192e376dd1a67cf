//! # Registry
//!
//! Owns the product catalog, the committed sales and the cash balance.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. BEGIN                                                              │
//! │     └── begin_sale() → Sale { status: Building }  (held by caller)     │
//! │                                                                         │
//! │  2. ADD ITEMS                                                          │
//! │     └── add_line_item() → checks quantity <= current stock             │
//! │                           (stock is NOT touched yet)                   │
//! │                                                                         │
//! │  3. COMMIT (all-or-nothing)                                            │
//! │     ├── phase 1: check every product against the summed quantities    │
//! │     │            any shortfall → InsufficientStock, nothing mutated    │
//! │     └── phase 2: decrement stock, store sale, add total to cash        │
//! │                                                                         │
//! │  4. (OPTIONAL) CANCEL                                                  │
//! │     └── cancel_sale() → first Committed match becomes Cancelled,       │
//! │                         stock returned, total removed from cash        │
//! │                         no match → no-op                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The registry is a plain single-threaded value: mutations take `&mut self`
//! and run to completion. Callers that share it across threads must put the
//! whole registry behind one writer lock (see the host's `RegistryState`).

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Product, Sale, SaleLineItem, SaleStatus};
use crate::validation::{
    validate_code, validate_price, validate_product_name, validate_quantity,
    validate_restock_quantity, validate_stock,
};
use crate::MAX_SALE_LINES;

/// Product + sale store with the transaction logic.
///
/// ## Invariants
/// - Product codes are unique
/// - Stock is never negative
/// - `cash_balance` equals the summed totals of committed, non-cancelled sales
/// - Sales are append-only; cancelling marks, never removes
#[derive(Debug, Default)]
pub struct Registry {
    /// Registration order.
    products: Vec<Product>,
    /// code → position in `products`.
    index: HashMap<String, usize>,
    /// Commit order.
    sales: Vec<Sale>,
    cash_balance: Money,
}

impl Registry {
    /// Creates an empty registry with a zero cash balance.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Registers a new product.
    ///
    /// ## Errors
    /// - `Validation` if a field breaks the product rules
    /// - `DuplicateCode` if the code is already taken (the existing product
    ///   is left as it was)
    pub fn register_product(&mut self, product: Product) -> CoreResult<()> {
        validate_code(&product.code)?;
        validate_product_name(&product.name)?;
        validate_price(product.price)?;
        validate_stock(product.stock)?;

        if self.index.contains_key(&product.code) {
            warn!(code = %product.code, "Rejected duplicate product code");
            return Err(CoreError::DuplicateCode { code: product.code });
        }

        info!(
            code = %product.code,
            name = %product.name,
            price = %product.price,
            stock = product.stock,
            "Registered product"
        );

        self.index.insert(product.code.clone(), self.products.len());
        self.products.push(product);
        Ok(())
    }

    /// Looks up a product by code. The returned reference is the stored
    /// product, so it always shows the current price and stock.
    pub fn find_product(&self, code: &str) -> Option<&Product> {
        self.index.get(code).map(|&idx| &self.products[idx])
    }

    /// Like [`find_product`](Self::find_product), but signals a miss.
    pub fn product(&self, code: &str) -> CoreResult<&Product> {
        self.find_product(code)
            .ok_or_else(|| CoreError::ProductNotFound(code.to_string()))
    }

    fn position(&self, code: &str) -> CoreResult<usize> {
        self.index
            .get(code)
            .copied()
            .ok_or_else(|| CoreError::ProductNotFound(code.to_string()))
    }

    /// All products in registration order.
    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    /// Products with stock left, in registration order.
    pub fn sellable_products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.products.iter().filter(|p| p.in_stock())
    }

    /// Changes a product's unit price.
    ///
    /// Line totals are read at the current price, so the cash balance is
    /// re-derived from the outstanding sales afterwards. If that balance
    /// would not fit, the old price is kept and `AmountOverflow` returned.
    pub fn update_price(&mut self, code: &str, price: Money) -> CoreResult<()> {
        validate_price(price)?;

        let idx = self.position(code)?;
        let previous = self.products[idx].price;
        self.products[idx].price = price;

        self.cash_balance = match self.outstanding_total() {
            Ok(balance) => balance,
            Err(err) => {
                self.products[idx].price = previous;
                warn!(code, price = %price, error = %err, "Rejected price change");
                return Err(err);
            }
        };

        info!(
            code,
            previous = %previous,
            price = %price,
            cash_balance = %self.cash_balance,
            "Updated product price"
        );
        Ok(())
    }

    /// Adds delivered units to a product's stock. Returns the new level.
    pub fn restock(&mut self, code: &str, quantity: i64) -> CoreResult<i64> {
        validate_restock_quantity(quantity)?;

        let idx = self.position(code)?;
        let stock = self.products[idx]
            .stock
            .checked_add(quantity)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "stock".to_string(),
                min: 0,
                max: i64::MAX,
            })?;
        self.products[idx].stock = stock;

        info!(code, quantity, stock, "Restocked product");
        Ok(stock)
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Starts a new sale. It stays with the caller until committed.
    pub fn begin_sale(&self) -> Sale {
        let sale = Sale::new();
        debug!(sale_id = %sale.id, "Began sale");
        sale
    }

    /// Appends a line to a sale that is still being built.
    ///
    /// Checks the quantity against the product's current stock so the caller
    /// does not build a sale that cannot be committed. Stock is not touched.
    ///
    /// ## Errors
    /// - `InvalidSaleStatus` if the sale was already committed
    /// - `Validation` for a quantity outside 1..=999
    /// - `SaleTooLarge` past 100 lines
    /// - `ProductNotFound` / `InsufficientStock`
    /// - `AmountOverflow` if the sale total would no longer fit
    pub fn add_line_item(&self, sale: &mut Sale, code: &str, quantity: i64) -> CoreResult<()> {
        ensure_building(sale)?;
        validate_quantity(quantity)?;

        if sale.lines.len() >= MAX_SALE_LINES {
            return Err(CoreError::SaleTooLarge {
                max: MAX_SALE_LINES,
            });
        }

        let product = self.product(code)?;
        if !product.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                code: code.to_string(),
                available: product.stock,
                requested: quantity,
            });
        }

        product
            .price
            .checked_mul(quantity)
            .zip(self.checked_sale_total(sale).ok())
            .and_then(|(line_total, total)| total.checked_add(line_total))
            .ok_or_else(|| CoreError::AmountOverflow {
                context: format!("total of sale {}", sale.id),
            })?;

        sale.lines.push(SaleLineItem {
            product_code: code.to_string(),
            quantity,
        });

        debug!(sale_id = %sale.id, code, quantity, lines = sale.lines.len(), "Added line item");
        Ok(())
    }

    /// Commits a sale: takes the stock and counts the total in the cash
    /// balance.
    ///
    /// ## All-or-Nothing
    /// Every product is checked, and the total and new balance computed,
    /// before any stock is decremented. Several lines for the same product
    /// are checked against its stock together. When any check fails no
    /// product, sale or balance changes.
    pub fn commit_sale(&mut self, mut sale: Sale) -> CoreResult<&Sale> {
        ensure_building(&sale)?;

        // Phase 1: check
        let checked = self.stock_demand(&sale).and_then(|demand| {
            let total = self.checked_sale_total(&sale)?;
            let balance = self.cash_balance.checked_add(total).ok_or_else(|| {
                CoreError::AmountOverflow {
                    context: "cash balance".to_string(),
                }
            })?;
            Ok((demand, total, balance))
        });
        let (demand, total, balance) = match checked {
            Ok(checked) => checked,
            Err(err) => {
                warn!(sale_id = %sale.id, error = %err, "Rejected sale commit");
                return Err(err);
            }
        };

        // Phase 2: apply, nothing here can fail
        for (idx, quantity) in demand {
            self.products[idx].stock -= quantity;
        }

        sale.status = SaleStatus::Committed;
        self.cash_balance = balance;

        info!(
            sale_id = %sale.id,
            lines = sale.lines.len(),
            total = %total,
            cash_balance = %self.cash_balance,
            "Committed sale"
        );

        let pos = self.sales.len();
        self.sales.push(sale);
        Ok(&self.sales[pos])
    }

    /// Sums each product's requested quantity over the sale's lines and
    /// checks it against stock. Returns (product position, quantity) pairs
    /// in first-seen order.
    fn stock_demand(&self, sale: &Sale) -> CoreResult<Vec<(usize, i64)>> {
        let mut demand: Vec<(usize, i64)> = Vec::new();
        let mut slots: HashMap<usize, usize> = HashMap::new();

        for line in &sale.lines {
            validate_quantity(line.quantity)?;

            let idx = *self
                .index
                .get(&line.product_code)
                .ok_or_else(|| CoreError::ProductNotFound(line.product_code.clone()))?;

            match slots.get(&idx) {
                Some(&slot) => demand[slot].1 += line.quantity,
                None => {
                    slots.insert(idx, demand.len());
                    demand.push((idx, line.quantity));
                }
            }
        }

        for &(idx, requested) in &demand {
            let product = &self.products[idx];
            if !product.can_sell(requested) {
                return Err(CoreError::InsufficientStock {
                    code: product.code.clone(),
                    available: product.stock,
                    requested,
                });
            }
        }

        Ok(demand)
    }

    /// Cancels the first committed, non-cancelled sale with this id.
    ///
    /// Returns `false` and changes nothing when there is no such sale,
    /// including when it was already cancelled, or when returning its stock
    /// would overflow a product's count. Only the first match is touched.
    pub fn cancel_sale(&mut self, sale_id: &str) -> bool {
        let Some(pos) = self
            .sales
            .iter()
            .position(|s| s.id == sale_id && s.status == SaleStatus::Committed)
        else {
            warn!(sale_id, "No committed sale to cancel");
            return false;
        };

        let Some(restored) = self.restored_stock(&self.sales[pos]) else {
            warn!(sale_id, "Returning stock would overflow, sale left committed");
            return false;
        };

        // Committed totals always fit: the balance is their checked sum
        let total = self.sale_total(&self.sales[pos]);

        self.sales[pos].status = SaleStatus::Cancelled;
        for (idx, stock) in restored {
            self.products[idx].stock = stock;
        }
        self.cash_balance -= total;

        info!(
            sale_id,
            total = %total,
            cash_balance = %self.cash_balance,
            "Cancelled sale"
        );
        true
    }

    /// Stock levels after returning a sale's lines, as (product position,
    /// new stock) pairs. `None` if any level would overflow.
    fn restored_stock(&self, sale: &Sale) -> Option<Vec<(usize, i64)>> {
        let mut restored: Vec<(usize, i64)> = Vec::new();
        for line in &sale.lines {
            let Some(&idx) = self.index.get(&line.product_code) else {
                continue;
            };
            match restored.iter_mut().find(|(i, _)| *i == idx) {
                Some(entry) => entry.1 = entry.1.checked_add(line.quantity)?,
                None => restored.push((idx, self.products[idx].stock.checked_add(line.quantity)?)),
            }
        }
        Some(restored)
    }

    /// The first stored sale with this id, whatever its status.
    pub fn find_sale(&self, sale_id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == sale_id)
    }

    /// Like [`find_sale`](Self::find_sale), but signals a miss.
    pub fn sale(&self, sale_id: &str) -> CoreResult<&Sale> {
        self.find_sale(sale_id)
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))
    }

    /// Stored sales in commit order, optionally hiding cancelled ones.
    pub fn list_sales(&self, include_cancelled: bool) -> impl Iterator<Item = &Sale> + '_ {
        self.sales
            .iter()
            .filter(move |s| include_cancelled || !s.is_cancelled())
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Current cash in the register.
    pub fn cash_balance(&self) -> Money {
        self.cash_balance
    }

    /// A line's total at the product's current price, or `None` when the
    /// product is not registered here or the total does not fit.
    pub fn line_total(&self, line: &SaleLineItem) -> Option<Money> {
        self.find_product(&line.product_code)
            .and_then(|p| p.price.checked_mul(line.quantity))
    }

    /// A sale's total at current prices. Lines for unknown products count
    /// as zero.
    ///
    /// Committed sales and sales built through `add_line_item` always fit.
    /// A total that does not fit (a hand-built sale, or a draft repriced
    /// after entry) saturates at the largest amount.
    pub fn sale_total(&self, sale: &Sale) -> Money {
        self.checked_sale_total(sale)
            .unwrap_or(Money::from_cents(i64::MAX))
    }

    fn checked_sale_total(&self, sale: &Sale) -> CoreResult<Money> {
        sale.lines.iter().try_fold(Money::zero(), |total, line| {
            let Some(product) = self.find_product(&line.product_code) else {
                return Ok(total);
            };
            product
                .price
                .checked_mul(line.quantity)
                .and_then(|line_total| total.checked_add(line_total))
                .ok_or_else(|| CoreError::AmountOverflow {
                    context: format!("total of sale {}", sale.id),
                })
        })
    }

    /// Summed totals of committed, non-cancelled sales.
    fn outstanding_total(&self) -> CoreResult<Money> {
        self.sales
            .iter()
            .filter(|s| s.status == SaleStatus::Committed)
            .try_fold(Money::zero(), |balance, sale| {
                let total = self.checked_sale_total(sale)?;
                balance
                    .checked_add(total)
                    .ok_or_else(|| CoreError::AmountOverflow {
                        context: "cash balance".to_string(),
                    })
            })
    }
}

fn ensure_building(sale: &Sale) -> CoreResult<()> {
    if sale.is_building() {
        Ok(())
    } else {
        Err(CoreError::InvalidSaleStatus {
            sale_id: sale.id.clone(),
            current_status: sale.status.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
