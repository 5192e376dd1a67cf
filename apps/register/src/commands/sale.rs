//! # Sale Commands
//!
//! Commands for the draft sale, committed sales and the cash drawer.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_line_item  ┌──────────┐  commit_sale  ┌───────────┐  │
//! │  │  Empty   │────────────────►│ Building │──────────────►│ Committed │  │
//! │  │  Draft   │                 │  Draft   │               │   Sale    │  │
//! │  └──────────┘                 └──────────┘               └───────────┘  │
//! │       ▲                            │                           │        │
//! │       │         discard_sale       │                      cancel_sale   │
//! │       └────────────────────────────┘                           │        │
//! │                                                                ▼        │
//! │                                                          ┌───────────┐  │
//! │                                                          │ Cancelled │  │
//! │                                                          └───────────┘  │
//! │                                                                         │
//! │  Stock and cash only move on commit and cancel.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tally_core::{Registry, Sale, SaleLineItem};
use tracing::{debug, info};

use crate::config::ConfigState;
use crate::error::ApiError;
use crate::state::{RegistryState, SaleDraftState};

// =============================================================================
// DTOs
// =============================================================================

/// One line of a sale, priced at the product's current price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineDto {
    pub product_code: String,
    /// `None` when the product is not in the catalog
    pub product_name: Option<String>,
    pub quantity: i64,
    pub unit_price_cents: Option<i64>,
    pub line_total_cents: i64,
}

impl SaleLineDto {
    fn from_line(line: &SaleLineItem, registry: &Registry) -> Self {
        let product = registry.find_product(&line.product_code);
        SaleLineDto {
            product_code: line.product_code.clone(),
            product_name: product.map(|p| p.name.clone()),
            quantity: line.quantity,
            unit_price_cents: product.map(|p| p.price.cents()),
            line_total_cents: registry.line_total(line).map_or(0, |m| m.cents()),
        }
    }
}

/// Sale response with lines and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub id: String,
    /// RFC 3339
    pub created_at: String,
    pub status: String,
    pub lines: Vec<SaleLineDto>,
    pub total_quantity: i64,
    pub total_cents: i64,
    pub total_display: String,
}

impl SaleDto {
    pub fn from_sale(sale: &Sale, registry: &Registry, config: &ConfigState) -> Self {
        let total = registry.sale_total(sale);
        SaleDto {
            id: sale.id.clone(),
            created_at: sale.created_at.to_rfc3339(),
            status: sale.status.to_string(),
            lines: sale
                .lines
                .iter()
                .map(|l| SaleLineDto::from_line(l, registry))
                .collect(),
            total_quantity: sale.total_quantity(),
            total_cents: total.cents(),
            total_display: config.format_currency(total.cents()),
        }
    }
}

/// Cash drawer balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashBalanceDto {
    pub cents: i64,
    pub display: String,
}

impl CashBalanceDto {
    fn from_registry(registry: &Registry, config: &ConfigState) -> Self {
        let cents = registry.cash_balance().cents();
        CashBalanceDto {
            cents,
            display: config.format_currency(cents),
        }
    }
}

/// Result of a successful commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSaleResponse {
    pub sale: SaleDto,
    pub cash_balance: CashBalanceDto,
}

/// Sale with the store header, for a receipt view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetailsDto {
    pub store_name: String,
    pub sale: SaleDto,
}

/// Result of [`cancel_sale`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSaleResponse {
    pub sale_id: String,
    /// `false` when no committed sale had this id
    pub cancelled: bool,
    pub cash_balance: CashBalanceDto,
}

// =============================================================================
// Draft Commands
// =============================================================================

/// Starts a new draft, dropping whatever was in the current one.
pub fn begin_sale(
    registry: &RegistryState,
    draft: &SaleDraftState,
    config: &ConfigState,
) -> SaleDto {
    debug!("begin_sale command");
    draft.with_draft_mut(|d| {
        registry.with_registry(|r| {
            *d = r.begin_sale();
            SaleDto::from_sale(d, r, config)
        })
    })
}

/// Gets the current draft.
pub fn current_sale(
    registry: &RegistryState,
    draft: &SaleDraftState,
    config: &ConfigState,
) -> SaleDto {
    debug!("current_sale command");
    draft.with_draft(|d| registry.with_registry(|r| SaleDto::from_sale(d, r, config)))
}

/// Adds a line to the current draft.
///
/// ## Behavior
/// - Quantity is checked against current stock; stock does not move
/// - The same product may appear on several lines
///
/// ## Errors
/// - `NOT_FOUND` for an unknown product
/// - `INSUFFICIENT_STOCK` when the line alone exceeds stock
/// - `VALIDATION_ERROR` for a quantity outside 1..=999 or a full draft
pub fn add_line_item(
    registry: &RegistryState,
    draft: &SaleDraftState,
    config: &ConfigState,
    code: &str,
    quantity: i64,
) -> Result<SaleDto, ApiError> {
    debug!(code = %code, quantity, "add_line_item command");
    draft.with_draft_mut(|d| {
        registry.with_registry(|r| {
            r.add_line_item(d, code, quantity)?;
            Ok::<_, ApiError>(SaleDto::from_sale(d, r, config))
        })
    })
}

/// Drops the current draft without touching stock or cash.
///
/// ## Returns
/// The fresh, empty draft
pub fn discard_sale(
    registry: &RegistryState,
    draft: &SaleDraftState,
    config: &ConfigState,
) -> SaleDto {
    draft.with_draft_mut(|d| {
        info!(sale_id = %d.id, lines = d.lines.len(), "Discarded draft sale");
        registry.with_registry(|r| {
            *d = r.begin_sale();
            SaleDto::from_sale(d, r, config)
        })
    })
}

/// Commits the current draft.
///
/// ## Behavior
/// - An empty draft is rejected before reaching the registry
/// - On success a fresh draft replaces the committed one
/// - On failure the draft is kept so the cashier can fix it
pub fn commit_sale(
    registry: &RegistryState,
    draft: &SaleDraftState,
    config: &ConfigState,
) -> Result<CommitSaleResponse, ApiError> {
    debug!("commit_sale command");
    draft.with_draft_mut(|d| {
        if d.is_empty() {
            return Err(ApiError::validation("Sale has no items"));
        }

        let response = registry.with_registry_mut(|r| {
            let sale_id = r.commit_sale(d.clone())?.id.clone();
            let committed = r.sale(&sale_id)?;
            Ok::<_, ApiError>(CommitSaleResponse {
                sale: SaleDto::from_sale(committed, r, config),
                cash_balance: CashBalanceDto::from_registry(r, config),
            })
        })?;

        *d = Sale::new();
        Ok(response)
    })
}

// =============================================================================
// Committed Sale Commands
// =============================================================================

/// Lists committed sales in commit order.
pub fn list_sales(
    registry: &RegistryState,
    config: &ConfigState,
    include_cancelled: bool,
) -> Vec<SaleDto> {
    debug!(include_cancelled, "list_sales command");
    registry.with_registry(|r| {
        r.list_sales(include_cancelled)
            .map(|s| SaleDto::from_sale(s, r, config))
            .collect()
    })
}

/// Gets one committed sale with the store header.
pub fn get_sale_details(
    registry: &RegistryState,
    config: &ConfigState,
    sale_id: &str,
) -> Result<SaleDetailsDto, ApiError> {
    debug!(sale_id = %sale_id, "get_sale_details command");
    registry.with_registry(|r| {
        let sale = r.sale(sale_id)?;
        Ok::<_, ApiError>(SaleDetailsDto {
            store_name: config.store_name.clone(),
            sale: SaleDto::from_sale(sale, r, config),
        })
    })
}

/// Cancels a committed sale, returning its stock and removing its total
/// from the cash balance.
///
/// Unknown or already-cancelled ids are not an error: the response carries
/// `cancelled: false` and nothing changes.
pub fn cancel_sale(
    registry: &RegistryState,
    config: &ConfigState,
    sale_id: &str,
) -> CancelSaleResponse {
    debug!(sale_id = %sale_id, "cancel_sale command");
    registry.with_registry_mut(|r| {
        let cancelled = r.cancel_sale(sale_id);
        CancelSaleResponse {
            sale_id: sale_id.to_string(),
            cancelled,
            cash_balance: CashBalanceDto::from_registry(r, config),
        }
    })
}

/// Gets the cash drawer balance.
pub fn cash_balance(registry: &RegistryState, config: &ConfigState) -> CashBalanceDto {
    debug!("cash_balance command");
    registry.with_registry(|r| CashBalanceDto::from_registry(r, config))
}
