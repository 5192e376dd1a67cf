//! # Sale Draft State
//!
//! Holds the sale currently being built at the register.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Operations                                     │
//! │                                                                         │
//! │  Presentation Action      Command                 Draft Change          │
//! │  ───────────────────      ───────                 ────────────          │
//! │                                                                         │
//! │  New Sale ───────────────► begin_sale() ────────► replaced             │
//! │  Add Item ───────────────► add_line_item() ─────► lines.push(line)     │
//! │  Cancel Current Sale ────► discard_sale() ──────► replaced             │
//! │  Finish Sale ────────────► commit_sale() ───────► replaced on success  │
//! │  View ───────────────────► current_sale() ──────► (read only)          │
//! │                                                                         │
//! │  The draft is never stored in the registry until it is committed.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tally_core::Sale;

/// The register's current draft sale.
#[derive(Debug, Clone)]
pub struct SaleDraftState {
    draft: Arc<Mutex<Sale>>,
}

impl SaleDraftState {
    /// Starts with an empty draft.
    pub fn new() -> Self {
        SaleDraftState {
            draft: Arc::new(Mutex::new(Sale::new())),
        }
    }

    /// Executes a function with read access to the draft.
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Sale) -> R,
    {
        let draft = self.draft.lock().unwrap_or_else(PoisonError::into_inner);
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// drafts.with_draft_mut(|sale| registry.add_line_item(sale, "001", 1))?;
    /// ```
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Sale) -> R,
    {
        let mut draft = self.draft.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut draft)
    }
}

impl Default for SaleDraftState {
    fn default() -> Self {
        Self::new()
    }
}
