use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::Message;
use crate::Result;

/// Contact details of the current actor. Server-supplied extra fields are
/// preserved so a round trip does not lose them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The persisted session record, one per browser profile.
///
/// Serialized camelCase so records written by earlier widget builds keep
/// decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    /// Absolute expiry in ms since the epoch. `None` never expires (legacy).
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_info: Option<UserInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub chat_history: Vec<Message>,
}

/// Raw persisted shape: the current JSON object, or a bare session id as
/// written by the oldest widget builds.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSession {
    Record(SessionRecord),
    Legacy(String),
}

impl SessionRecord {
    /// Decode a persisted record, normalizing the legacy bare-string format
    /// to `{ id, exp: None }`. The one place both shapes are handled.
    pub fn decode(raw: &str) -> Result<SessionRecord> {
        Ok(match serde_json::from_str::<StoredSession>(raw)? {
            StoredSession::Record(record) => record,
            StoredSession::Legacy(id) => SessionRecord {
                id,
                exp: None,
                vendor_id: None,
                user_info: None,
                chat_history: Vec::new(),
            },
        })
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
