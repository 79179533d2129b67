use serde::{Deserialize, Serialize};

/// Widget configuration supplied by the embedding page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Question endpoint, POSTed once per submitted question.
    pub chat_api_url: String,
    /// Collaborator endpoint returning fresh contact details for the
    /// authenticated actor. Without it the widget only ever sends stored
    /// contact details.
    pub identity_api_url: Option<String>,
    /// localStorage key under which the host page keeps its auth token.
    pub token_key: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            chat_api_url: String::new(),
            identity_api_url: None,
            token_key: "token".to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn new(chat_api_url: impl Into<String>) -> Self {
        Self {
            chat_api_url: chat_api_url.into(),
            ..Default::default()
        }
    }
}
