//! Auth token lookup.
//!
//! The host page keeps its auth token in localStorage under a configurable
//! key; the widget only ever reads it.

use widget_core::ports::TokenSource;

pub struct LocalStorageTokenSource {
    key: String,
}

impl LocalStorageTokenSource {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenSource for LocalStorageTokenSource {
    /// Best-effort: any storage failure, and the empty string, read as
    /// "no token".
    fn token(&self) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        storage
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }
}
