//! # Tally Register Library
//!
//! Host for a single point-of-sale register. Wires logging, configuration
//! and shared state around the `tally-core` registry and exposes the
//! register's commands.
//!
//! ## Module Organization
//! ```text
//! tally_register_lib/
//! ├── lib.rs          ◄─── You are here (startup)
//! ├── config.rs       ◄─── Configuration from the environment
//! ├── seed.rs         ◄─── Sample catalog
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── registry.rs ◄─── Shared registry behind a RwLock
//! │   └── draft.rs    ◄─── Current draft sale
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Catalog commands
//! │   └── sale.rs     ◄─── Sale and cash commands
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod seed;
pub mod state;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ConfigState;
use error::StartupError;
use state::{RegistryState, SaleDraftState};

/// Everything a register needs, built once at startup.
#[derive(Debug, Clone)]
pub struct Register {
    pub registry: RegistryState,
    pub draft: SaleDraftState,
    pub config: ConfigState,
}

impl Register {
    /// Builds empty state and seeds the sample catalog when configured to.
    pub fn new(config: ConfigState) -> Result<Self, StartupError> {
        let registry = RegistryState::default();
        if config.seed_sample_catalog {
            seed::seed_sample_catalog(&registry)?;
        }

        Ok(Register {
            registry,
            draft: SaleDraftState::new(),
            config,
        })
    }
}

/// One catalog entry in the startup log.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry<'a> {
    code: &'a str,
    name: &'a str,
    price: String,
    stock: i64,
}

/// Runs the register startup.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Register Startup                                  │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,tally=debug, override with RUST_LOG                 │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • TALLY_* environment variables over defaults                       │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • RegistryState: empty registry behind a RwLock                     │
/// │     • SaleDraftState: empty draft behind a Mutex                        │
/// │                                                                         │
/// │  4. Seed Sample Catalog (optional) ───────────────────────────────────► │
/// │                                                                         │
/// │  5. Log Catalog Summary ──────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<Register, StartupError> {
    init_tracing();

    info!("Starting Tally register v{}", env!("CARGO_PKG_VERSION"));

    let config = ConfigState::from_env()?;
    info!(
        store = %config.store_name,
        seed = config.seed_sample_catalog,
        "Loaded configuration"
    );

    let register = Register::new(config)?;
    log_catalog_summary(&register)?;

    Ok(register)
}

fn log_catalog_summary(register: &Register) -> Result<(), StartupError> {
    let config = &register.config;
    let (catalog, sellable) = register.registry.with_registry(|r| {
        let catalog: Vec<CatalogEntry<'_>> = r
            .list_products()
            .iter()
            .map(|p| CatalogEntry {
                code: &p.code,
                name: &p.name,
                price: config.format_currency(p.price.cents()),
                stock: p.stock,
            })
            .collect();
        serde_json::to_string(&catalog).map(|json| (json, r.sellable_products().count()))
    })?;

    let cash = register
        .registry
        .with_registry(|r| config.format_currency(r.cash_balance().cents()));

    info!(
        store = %config.store_name,
        sellable,
        cash = %cash,
        catalog = %catalog,
        "Register ready"
    );
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally=trace` - Show trace for tally crates only
/// - Default: `info,tally=debug`
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tally=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_seeds_when_configured() {
        let register = Register::new(ConfigState::default()).unwrap();
        let count = register.registry.with_registry(|r| r.list_products().len());
        assert_eq!(count, seed::SAMPLE_CATALOG.len());
        assert!(register.draft.with_draft(|d| d.is_empty()));
    }

    #[test]
    fn test_register_without_seed_is_empty() {
        let config = ConfigState {
            seed_sample_catalog: false,
            ..ConfigState::default()
        };
        let register = Register::new(config).unwrap();
        assert!(register
            .registry
            .with_registry(|r| r.list_products().is_empty()));
    }

    #[test]
    fn test_catalog_summary_logs_without_error() {
        let register = Register::new(ConfigState::default()).unwrap();
        assert!(log_catalog_summary(&register).is_ok());
    }
}
