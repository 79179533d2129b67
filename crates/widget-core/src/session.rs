//! Session state — the durable record behind the chat panel.
//!
//! One session record per browser profile, a pending-history buffer used
//! while no session id exists yet, and a vendor identity marker that keeps
//! one actor's chat history from leaking into another's session.
//!
//! Every write is best-effort: storage failures are swallowed (logged at
//! debug) and the widget degrades to in-memory behavior for the page
//! lifetime. Reads never raise; they report "no session" instead.

use std::rc::Rc;

use widget_types::message::Message;
use widget_types::session::{SessionRecord, UserInfo};

use crate::ports::{Clock, SessionStore, TokenSource};

/// Storage key of the session record.
pub const SESSION_KEY: &str = "chat:session";
/// Storage key of the pending-history buffer.
pub const PENDING_HISTORY_KEY: &str = "chat:pending-history";
/// Storage key of the vendor identity marker.
pub const VENDOR_ID_KEY: &str = "chat:vendor";

/// Inactivity window after which a session record is discarded.
pub const SESSION_TTL_MS: i64 = 15 * 60 * 1000;
/// Most recent messages kept; oldest entries are dropped first.
pub const HISTORY_CAP: usize = 50;

pub struct SessionManager {
    store: Rc<dyn SessionStore>,
    tokens: Rc<dyn TokenSource>,
    clock: Rc<dyn Clock>,
}

impl SessionManager {
    pub fn new(
        store: Rc<dyn SessionStore>,
        tokens: Rc<dyn TokenSource>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            tokens,
            clock,
        }
    }

    // ─── Vendor identity ─────────────────────────────────────

    /// Best-effort fingerprint of "who is using this browser profile".
    ///
    /// The stored record's email is the most reliable identity; before the
    /// first round trip only the auth token is available, so its hash
    /// stands in. A cache-partitioning heuristic, not an identity proof.
    pub fn vendor_id(&self) -> Option<String> {
        if let Some(email) = self
            .peek_record()
            .and_then(|r| r.user_info)
            .and_then(|u| u.email)
        {
            return Some(email);
        }
        self.tokens
            .token()
            .map(|t| format!("vendor_{}", base36(token_hash(&t))))
    }

    /// Detect a vendor switch and wipe the previous actor's data if so.
    ///
    /// Runs before TTL or content checks on every read, so stale
    /// cross-vendor data is never observed by a caller. Storage errors are
    /// swallowed and read as "no change". Returns true when a change was
    /// detected.
    pub fn check_vendor_change(&self) -> bool {
        let current = self.vendor_id();
        let marker = self.get_quiet(VENDOR_ID_KEY);
        match (current, marker) {
            // Vendor logged out: drop their data and the marker.
            (None, Some(_)) => {
                self.clear();
                self.remove_quiet(VENDOR_ID_KEY);
                true
            }
            (Some(current), Some(marker)) if current != marker => {
                self.clear();
                self.set_quiet(VENDOR_ID_KEY, &current);
                true
            }
            // First observation of this vendor.
            (Some(current), None) => {
                self.set_quiet(VENDOR_ID_KEY, &current);
                false
            }
            _ => false,
        }
    }

    // ─── Read path ───────────────────────────────────────────

    /// The active session record, if any.
    ///
    /// Expired records and records created under a different vendor
    /// identity are deleted on sight and reported as absent. Idempotent:
    /// repeated calls with no intervening writes return the same result.
    pub fn record(&self) -> Option<SessionRecord> {
        self.check_vendor_change();

        let raw = self.get_quiet(SESSION_KEY)?;
        let record = match SessionRecord::decode(&raw) {
            Ok(record) => record,
            Err(e) => {
                log::debug!("discarding unreadable session record: {}", e);
                return None;
            }
        };

        if let Some(exp) = record.exp {
            if exp <= self.clock.now_ms() {
                self.remove_quiet(SESSION_KEY);
                return None;
            }
        }

        if let (Some(current), Some(stored)) = (self.vendor_id(), record.vendor_id.as_deref()) {
            if current != stored {
                self.clear();
                return None;
            }
        }

        Some(record)
    }

    pub fn session_id(&self) -> Option<String> {
        self.record().map(|r| r.id)
    }

    // ─── Write paths ─────────────────────────────────────────

    /// Record a (possibly new) session id issued by the server.
    ///
    /// Refreshes the expiry window, drains the pending buffer into the
    /// record, and re-stamps the vendor marker. `reset_user_info` drops
    /// stored contact details — used when the server rotates to a
    /// genuinely new session.
    pub fn set_session_id(&self, id: &str, reset_user_info: bool) {
        let exp = Some(self.clock.now_ms() + SESSION_TTL_MS);
        let prev = self.record();
        let pending = self.pending_history();
        let drained = !pending.is_empty();
        let vendor_id = self.vendor_id();

        let record = SessionRecord {
            id: id.to_string(),
            exp,
            vendor_id: vendor_id.clone(),
            user_info: if reset_user_info {
                None
            } else {
                prev.as_ref().and_then(|p| p.user_info.clone())
            },
            chat_history: if drained {
                pending
            } else {
                prev.map(|p| p.chat_history).unwrap_or_default()
            },
        };
        self.write_record(&record);
        if drained {
            self.remove_quiet(PENDING_HISTORY_KEY);
        }
        if let Some(vendor_id) = vendor_id {
            self.set_quiet(VENDOR_ID_KEY, &vendor_id);
        }
    }

    /// Merge contact details into the active session. No-op without one.
    ///
    /// A changed email is a vendor switch: the previous actor's record and
    /// pending buffer are dropped before the new details are written, and
    /// the email becomes the vendor marker.
    pub fn set_user_info(&self, user_info: UserInfo) {
        let Some(prev) = self.record() else { return };

        let vendor_id = user_info.email.clone().or(prev.vendor_id.clone());
        if let Some(email) = &user_info.email {
            if let Some(marker) = self.get_quiet(VENDOR_ID_KEY) {
                if marker != *email {
                    self.clear();
                }
            }
            self.set_quiet(VENDOR_ID_KEY, email);
        }

        let record = SessionRecord {
            user_info: Some(user_info),
            vendor_id,
            ..prev
        };
        self.write_record(&record);
    }

    /// Refresh the expiry window without altering other fields. No-op
    /// without an active session.
    pub fn touch(&self) {
        let Some(prev) = self.record() else { return };
        let record = SessionRecord {
            exp: Some(self.clock.now_ms() + SESSION_TTL_MS),
            ..prev
        };
        self.write_record(&record);
    }

    /// Drop the session record and the pending buffer unconditionally.
    pub fn clear(&self) {
        self.remove_quiet(SESSION_KEY);
        self.remove_quiet(PENDING_HISTORY_KEY);
    }

    /// Append one message: to the record when a session exists, to the
    /// pending buffer otherwise. Only the most recent `HISTORY_CAP`
    /// entries are kept.
    pub fn append_message(&self, message: Message) {
        match self.record() {
            Some(mut record) => {
                record.chat_history.push(message);
                drop_oldest(&mut record.chat_history);
                self.write_record(&record);
            }
            None => {
                let mut pending = self.pending_history();
                pending.push(message);
                drop_oldest(&mut pending);
                self.write_pending(&pending);
            }
        }
    }

    /// Replace the visible history wholesale.
    pub fn set_history(&self, history: Vec<Message>) {
        match self.record() {
            Some(mut record) => {
                record.chat_history = history;
                self.write_record(&record);
            }
            None => self.write_pending(&history),
        }
    }

    /// The history a caller should display: the record's once a session
    /// exists, the pending buffer before that.
    pub fn history(&self) -> Vec<Message> {
        match self.record() {
            Some(record) => record.chat_history,
            None => self.pending_history(),
        }
    }

    // ─── Pending buffer ──────────────────────────────────────

    fn pending_history(&self) -> Vec<Message> {
        let Some(raw) = self.get_quiet(PENDING_HISTORY_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::debug!("discarding unreadable pending history: {}", e);
            Vec::new()
        })
    }

    fn write_pending(&self, history: &[Message]) {
        match serde_json::to_string(history) {
            Ok(json) => self.set_quiet(PENDING_HISTORY_KEY, &json),
            Err(e) => log::debug!("failed to encode pending history: {}", e),
        }
    }

    // ─── Storage helpers (best-effort) ───────────────────────

    /// Raw record read without the vendor-change pass. Used by identity
    /// derivation, which runs inside that pass.
    fn peek_record(&self) -> Option<SessionRecord> {
        let raw = self.get_quiet(SESSION_KEY)?;
        SessionRecord::decode(&raw).ok()
    }

    fn write_record(&self, record: &SessionRecord) {
        match record.encode() {
            Ok(json) => self.set_quiet(SESSION_KEY, &json),
            Err(e) => log::debug!("failed to encode session record: {}", e),
        }
    }

    fn get_quiet(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("storage read failed for {}: {}", key, e);
                None
            }
        }
    }

    fn set_quiet(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            log::debug!("storage write failed for {}: {}", key, e);
        }
    }

    fn remove_quiet(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            log::debug!("storage delete failed for {}: {}", key, e);
        }
    }
}

fn drop_oldest(history: &mut Vec<Message>) {
    if history.len() > HISTORY_CAP {
        let excess = history.len() - HISTORY_CAP;
        history.drain(..excess);
    }
}

// ─── Vendor token hash ───────────────────────────────────────

/// 32-bit rolling hash over UTF-16 units, matching the fingerprint earlier
/// widget builds derived from the same token. Not a security boundary.
fn token_hash(token: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in token.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    hash.unsigned_abs()
}

fn base36(mut n: u32) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    while n > 0 {
        let digit = (n % 36) as u8;
        let c = if digit < 10 {
            (b'0' + digit) as char
        } else {
            (b'a' + digit - 10) as char
        };
        out.insert(0, c);
        n /= 36;
    }
    out
}
