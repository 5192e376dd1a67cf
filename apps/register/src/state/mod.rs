//! # State Module
//!
//! Shared state handed to every command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │  RegistryState   │  │  SaleDraftState  │  │   ConfigState    │      │
//! │  │                  │  │                  │  │                  │      │
//! │  │  Arc<RwLock<     │  │  Arc<Mutex<      │  │  store name      │      │
//! │  │    Registry      │  │    Sale          │  │  currency        │      │
//! │  │  >>              │  │  >>              │  │                  │      │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • RegistryState: one writer at a time, readers share                  │
//! │  • SaleDraftState: exclusive access                                    │
//! │  • ConfigState: read-only after initialization                         │
//! │                                                                         │
//! │  LOCK ORDER: draft before registry, never the other way round          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod draft;
mod registry;

pub use draft::SaleDraftState;
pub use registry::RegistryState;
