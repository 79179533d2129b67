//! Wire shapes of the question endpoint, plus the normalized answer handed
//! to the embedding UI.

use serde::{Deserialize, Serialize};

use crate::session::UserInfo;

/// Contact fields the server may ask the widget to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

/// POST body of the question endpoint. Optional fields are omitted
/// entirely, never sent as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequestBody {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_info: Option<UserInfo>,
}

/// Response body of the question endpoint, as the server sends it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRawResponse {
    pub response: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub relevant_pages: Option<Vec<String>>,
    #[serde(default)]
    pub requires_user_info: Option<bool>,
    #[serde(default)]
    pub missing_fields: Option<Vec<ContactField>>,
    #[serde(default)]
    pub user_info: Option<UserInfo>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub source_document: Option<String>,
    #[serde(default)]
    pub has_contact_form: Option<bool>,
}

/// Normalized success shape returned to the embedding UI.
/// Serialized camelCase, matching the JS API of earlier widget builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAnswer {
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub relevant_pages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub requires_user_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub missing_fields: Option<Vec<ContactField>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_info: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub has_contact_form: Option<bool>,
}

impl ChatAnswer {
    /// Normalize a raw response. `sessionId` falls back to the id that was
    /// sent when the server omits one.
    pub fn from_raw(raw: ChatRawResponse, sent_session_id: Option<String>) -> Self {
        Self {
            answer: raw.response,
            session_id: raw.session_id.or(sent_session_id),
            relevant_pages: raw.relevant_pages,
            requires_user_info: raw.requires_user_info,
            missing_fields: raw.missing_fields,
            user_info: raw.user_info,
            source_type: raw.source_type,
            source_document: raw.source_document,
            has_contact_form: raw.has_contact_form,
        }
    }
}
