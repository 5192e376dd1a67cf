//! # Product Commands
//!
//! Catalog commands: registration, lookup, price changes and deliveries.

use serde::{Deserialize, Serialize};
use tally_core::{Money, Product};
use tracing::debug;

use crate::config::ConfigState;
use crate::error::ApiError;
use crate::state::RegistryState;

/// Product data transfer object for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub code: String,
    pub name: String,
    pub price_cents: i64,
    pub price_display: String,
    pub stock: i64,
    pub in_stock: bool,
}

impl ProductDto {
    pub fn from_product(product: &Product, config: &ConfigState) -> Self {
        ProductDto {
            code: product.code.clone(),
            name: product.name.clone(),
            price_cents: product.price.cents(),
            price_display: config.format_currency(product.price.cents()),
            stock: product.stock,
            in_stock: product.in_stock(),
        }
    }
}

/// Input for [`register_product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProductRequest {
    pub code: String,
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Adds a product to the catalog.
///
/// ## Errors
/// - `DUPLICATE_CODE` if the code is taken (the stored product is kept)
/// - `VALIDATION_ERROR` for a bad code, name, price or stock
pub fn register_product(
    registry: &RegistryState,
    config: &ConfigState,
    request: RegisterProductRequest,
) -> Result<ProductDto, ApiError> {
    debug!(code = %request.code, "register_product command");

    let product = Product::new(
        request.code,
        request.name,
        Money::from_cents(request.price_cents),
        request.stock,
    );
    let dto = ProductDto::from_product(&product, config);

    registry.with_registry_mut(|r| r.register_product(product))?;
    Ok(dto)
}

/// Lists every product in registration order.
pub fn list_products(registry: &RegistryState, config: &ConfigState) -> Vec<ProductDto> {
    debug!("list_products command");
    registry.with_registry(|r| {
        r.list_products()
            .iter()
            .map(|p| ProductDto::from_product(p, config))
            .collect()
    })
}

/// Lists products that still have stock.
pub fn list_sellable_products(registry: &RegistryState, config: &ConfigState) -> Vec<ProductDto> {
    debug!("list_sellable_products command");
    registry.with_registry(|r| {
        r.sellable_products()
            .map(|p| ProductDto::from_product(p, config))
            .collect()
    })
}

/// Looks up a product by code.
pub fn find_product(
    registry: &RegistryState,
    config: &ConfigState,
    code: &str,
) -> Result<ProductDto, ApiError> {
    debug!(code = %code, "find_product command");
    registry.with_registry(|r| {
        r.find_product(code)
            .map(|p| ProductDto::from_product(p, config))
            .ok_or_else(|| ApiError::not_found("Product", code))
    })
}

/// Changes a product's unit price.
pub fn update_price(
    registry: &RegistryState,
    config: &ConfigState,
    code: &str,
    price_cents: i64,
) -> Result<ProductDto, ApiError> {
    debug!(code = %code, price_cents, "update_price command");
    registry.with_registry_mut(|r| {
        r.update_price(code, Money::from_cents(price_cents))?;
        Ok::<_, ApiError>(ProductDto::from_product(r.product(code)?, config))
    })
}

/// Records a delivery of `quantity` units.
pub fn restock(
    registry: &RegistryState,
    config: &ConfigState,
    code: &str,
    quantity: i64,
) -> Result<ProductDto, ApiError> {
    debug!(code = %code, quantity, "restock command");
    registry.with_registry_mut(|r| {
        r.restock(code, quantity)?;
        Ok::<_, ApiError>(ProductDto::from_product(r.product(code)?, config))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn request(code: &str, price_cents: i64, stock: i64) -> RegisterProductRequest {
        RegisterProductRequest {
            code: code.to_string(),
            name: format!("Product {}", code),
            price_cents,
            stock,
        }
    }

    #[test]
    fn test_register_and_find() {
        let registry = RegistryState::default();
        let config = ConfigState::default();

        let dto = register_product(&registry, &config, request("001", 2590, 10)).unwrap();
        assert_eq!(dto.price_display, "$25.90");
        assert!(dto.in_stock);

        let found = find_product(&registry, &config, "001").unwrap();
        assert_eq!(found, dto);
    }

    #[test]
    fn test_register_duplicate_keeps_original() {
        let registry = RegistryState::default();
        let config = ConfigState::default();
        register_product(&registry, &config, request("001", 2590, 10)).unwrap();

        let err = register_product(&registry, &config, request("001", 100, 1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateCode);

        let found = find_product(&registry, &config, "001").unwrap();
        assert_eq!(found.price_cents, 2590);
        assert_eq!(found.stock, 10);
    }

    #[test]
    fn test_register_rejects_invalid_input() {
        let registry = RegistryState::default();
        let config = ConfigState::default();

        let err = register_product(&registry, &config, request("001", 0, 10)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = register_product(&registry, &config, request("", 100, 10)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(list_products(&registry, &config).is_empty());
    }

    #[test]
    fn test_find_missing_product() {
        let registry = RegistryState::default();
        let err = find_product(&registry, &ConfigState::default(), "404").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 404");
    }

    #[test]
    fn test_list_sellable_skips_empty_stock() {
        let registry = RegistryState::default();
        let config = ConfigState::default();
        register_product(&registry, &config, request("001", 100, 0)).unwrap();
        register_product(&registry, &config, request("002", 100, 3)).unwrap();

        let all: Vec<String> = list_products(&registry, &config)
            .into_iter()
            .map(|p| p.code)
            .collect();
        assert_eq!(all, vec!["001", "002"]);

        let sellable = list_sellable_products(&registry, &config);
        assert_eq!(sellable.len(), 1);
        assert_eq!(sellable[0].code, "002");
    }

    #[test]
    fn test_update_price_and_restock() {
        let registry = RegistryState::default();
        let config = ConfigState::default();
        register_product(&registry, &config, request("001", 2590, 0)).unwrap();

        let dto = update_price(&registry, &config, "001", 2790).unwrap();
        assert_eq!(dto.price_cents, 2790);

        let dto = restock(&registry, &config, "001", 12).unwrap();
        assert_eq!(dto.stock, 12);
        assert!(dto.in_stock);

        let err = restock(&registry, &config, "001", 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = update_price(&registry, &config, "404", 100).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_dto_serializes_camel_case() {
        let registry = RegistryState::default();
        let config = ConfigState::default();
        let dto = register_product(&registry, &config, request("001", 2590, 10)).unwrap();

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["priceCents"], 2590);
        assert_eq!(json["inStock"], true);
    }
}
