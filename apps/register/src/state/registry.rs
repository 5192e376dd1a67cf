//! # Registry State
//!
//! Shares the single `Registry` between commands.
//!
//! ## Why One Writer Lock?
//! `commit_sale` checks stock and then decrements it; `cancel_sale` finds a
//! sale and then restores stock. Neither sequence is atomic on its own, so
//! every mutation holds the write lock for its whole run. Reads (catalog,
//! sale listings, cash balance) share the read lock and never observe a
//! mutation half-way.

use std::sync::{Arc, PoisonError, RwLock};

use tally_core::Registry;

/// Shared handle to the registry.
///
/// Cloning is cheap and every clone points at the same registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryState {
    registry: Arc<RwLock<Registry>>,
}

impl RegistryState {
    /// Executes a function with read access to the registry.
    ///
    /// ## Usage
    /// ```rust
    /// use tally_register_lib::state::RegistryState;
    ///
    /// let state = RegistryState::default();
    /// let count = state.with_registry(|r| r.list_products().len());
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_registry<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Registry) -> R,
    {
        // Registry mutations are all-or-nothing, so a panicked holder
        // cannot have left it half-updated.
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        f(&registry)
    }

    /// Executes a function with exclusive write access to the registry.
    pub fn with_registry_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Registry) -> R,
    {
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut registry)
    }
}
