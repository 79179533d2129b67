//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `widget-core` (pure Rust).
//! Implementations live in `widget-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use widget_types::{
    protocol::{ChatRawResponse, ChatRequestBody},
    session::UserInfo,
    Result,
};

// ─── Session Store Port ──────────────────────────────────────

/// Durable string key-value storage.
///
/// Synchronous on purpose: session reads must be idempotent and effectively
/// instantaneous (localStorage semantics), and the session layer never
/// blocks on storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Clock Port ──────────────────────────────────────────────

/// Wall clock in ms since the Unix epoch. Injected so expiry windows are
/// testable.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

// ─── Token Source Port ───────────────────────────────────────

/// Best-effort access to the host page's auth token.
/// Implementations report missing or empty tokens as `None`.
pub trait TokenSource {
    fn token(&self) -> Option<String>;
}

// ─── Question API Port ───────────────────────────────────────

/// The remote question-answering endpoint.
#[async_trait(?Send)]
pub trait QuestionApi {
    /// One POST per call, no retries. Non-2xx responses surface as
    /// `WidgetError::Http`.
    async fn ask(&self, body: &ChatRequestBody) -> Result<ChatRawResponse>;
}

// ─── Identity API Port ───────────────────────────────────────

/// Collaborator endpoint returning fresh contact details for the
/// authenticated actor.
#[async_trait(?Send)]
pub trait IdentityApi {
    async fn fetch_user_info(&self) -> Result<Option<UserInfo>>;
}
