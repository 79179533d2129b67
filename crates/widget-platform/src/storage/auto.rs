//! Pick the best available store backend.
//!
//! Priority: localStorage → Memory (fallback). The session layer swallows
//! storage errors either way, so the widget stays usable even when both
//! degrade.

use std::rc::Rc;
use widget_core::ports::SessionStore;
use super::{LocalStorageStore, MemoryStore};

/// Open the best available store backend.
/// Returns a trait object so callers are backend-agnostic.
pub fn auto_detect_store() -> Rc<dyn SessionStore> {
    match LocalStorageStore::open() {
        Ok(local) => {
            log::info!("Session store backend: localStorage");
            Rc::new(local)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryStore::new())
        }
    }
}
