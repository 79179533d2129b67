use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum WidgetError {
    #[error("request failed: {status} {status_text} {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("{0}")]
    Other(String),
}

impl WidgetError {
    /// Auth-failure statuses that invalidate the locally stored session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            WidgetError::Http {
                status: 401 | 440,
                ..
            }
        )
    }
}

impl From<serde_json::Error> for WidgetError {
    fn from(e: serde_json::Error) -> Self {
        WidgetError::Serialization(e.to_string())
    }
}
