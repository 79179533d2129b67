//! Chat transport — the single question/answer round trip and the session
//! bookkeeping driven by its outcome.

use std::rc::Rc;

use widget_types::protocol::{ChatAnswer, ChatRequestBody};
use widget_types::session::UserInfo;
use widget_types::{Result, WidgetError};

use crate::ports::{IdentityApi, QuestionApi, TokenSource};
use crate::session::SessionManager;

pub struct ChatClient {
    sessions: Rc<SessionManager>,
    api: Rc<dyn QuestionApi>,
    identity: Rc<dyn IdentityApi>,
    tokens: Rc<dyn TokenSource>,
}

impl ChatClient {
    pub fn new(
        sessions: Rc<SessionManager>,
        api: Rc<dyn QuestionApi>,
        identity: Rc<dyn IdentityApi>,
        tokens: Rc<dyn TokenSource>,
    ) -> Self {
        Self {
            sessions,
            api,
            identity,
            tokens,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// One question/answer round trip. Exactly one POST, no retries.
    ///
    /// Server-driven session rotation, TTL refresh, user-info persistence
    /// and auth-failure cleanup all happen here; the caller only renders
    /// the returned answer, or the error as a system message. Callers must
    /// not issue a second call while one is outstanding.
    pub async fn send_question(&self, question: &str) -> Result<ChatAnswer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(WidgetError::EmptyQuestion);
        }

        let user_info = self.outgoing_user_info().await;
        let sent_session_id = self.sessions.session_id();

        let body = ChatRequestBody {
            question: question.to_string(),
            session_id: sent_session_id.clone(),
            user_info,
        };

        let raw = match self.api.ask(&body).await {
            Ok(raw) => raw,
            Err(e) => {
                if e.is_auth_failure() {
                    log::info!("auth failure from chat endpoint, clearing session");
                    self.sessions.clear();
                }
                return Err(e);
            }
        };

        match &raw.session_id {
            // A different server-issued id means a new server-side
            // conversation: rotate, and wipe history carried over from the
            // old one.
            Some(new_id) if sent_session_id.as_deref() != Some(new_id.as_str()) => {
                self.sessions.set_session_id(new_id, true);
                if sent_session_id.is_some() {
                    self.sessions.set_history(Vec::new());
                }
            }
            _ => {
                if sent_session_id.is_some() {
                    self.sessions.touch();
                }
            }
        }

        if let Some(incoming) = &raw.user_info {
            let stored = self.sessions.record().and_then(|r| r.user_info);
            if stored.as_ref() != Some(incoming) {
                self.sessions.set_user_info(incoming.clone());
            }
        }

        Ok(ChatAnswer::from_raw(raw, sent_session_id))
    }

    /// Contact details to attach to the outgoing request: fresh from the
    /// identity endpoint when an auth token is present, the last persisted
    /// value otherwise — and on any identity failure.
    async fn outgoing_user_info(&self) -> Option<UserInfo> {
        let stored = || self.sessions.record().and_then(|r| r.user_info);
        if self.tokens.token().is_none() {
            return stored();
        }
        match self.identity.fetch_user_info().await {
            Ok(Some(info)) => Some(info),
            Ok(None) => stored(),
            Err(e) => {
                log::debug!("identity lookup failed, using stored contact details: {}", e);
                stored()
            }
        }
    }
}
