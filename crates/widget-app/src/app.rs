//! The JS-facing widget handle.
//!
//! The embedding page's UI layer (floating button, panel, contact form)
//! drives these methods and renders the results; rendering is entirely its
//! concern. Callers must not issue a second `ask` while one is outstanding.

use std::rc::Rc;

use gloo_utils::format::JsValueSerdeExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use widget_core::ports::{IdentityApi, SessionStore, TokenSource};
use widget_core::session::SessionManager;
use widget_core::transport::ChatClient;
use widget_platform::clock::SystemClock;
use widget_platform::http::{HttpIdentityApi, HttpQuestionApi};
use widget_platform::storage::auto_detect_store;
use widget_platform::token::LocalStorageTokenSource;
use widget_types::config::WidgetConfig;
use widget_types::message::Message;
use widget_types::session::UserInfo;

#[wasm_bindgen]
pub struct ChatWidget {
    client: Rc<ChatClient>,
    sessions: Rc<SessionManager>,
}

#[wasm_bindgen]
impl ChatWidget {
    /// Wire the widget against the given question endpoint. The identity
    /// endpoint is optional; without it the widget only ever sends stored
    /// contact details.
    #[wasm_bindgen(constructor)]
    pub fn new(chat_api_url: String, identity_api_url: Option<String>) -> ChatWidget {
        Self::from_config(WidgetConfig {
            chat_api_url,
            identity_api_url,
            ..WidgetConfig::default()
        })
    }

    /// Submit a question. Resolves to the normalized answer object
    /// (camelCase fields), rejects with the error message — render that as
    /// a system message.
    pub fn ask(&self, question: String) -> js_sys::Promise {
        let client = self.client.clone();
        future_to_promise(async move {
            match client.send_question(&question).await {
                Ok(answer) => JsValue::from_serde(&answer)
                    .map_err(|e| JsValue::from_str(&e.to_string())),
                Err(e) => Err(JsValue::from_str(&e.to_string())),
            }
        })
    }

    /// The history to display on open: the session record's once a session
    /// exists, the pending buffer before that.
    pub fn history(&self) -> JsValue {
        JsValue::from_serde(&self.sessions.history()).unwrap_or(JsValue::NULL)
    }

    /// Persist a rendered message so it survives reloads. `role` is one of
    /// "user", "assistant" or "system".
    #[wasm_bindgen(js_name = recordMessage)]
    pub fn record_message(&self, role: &str, content: String) {
        let message = match role {
            "assistant" => Message::assistant(content),
            "system" => Message::system(content),
            _ => Message::user(content),
        };
        self.sessions.append_message(message);
    }

    /// Save contact details entered in the host's form.
    /// Accepts `{ name?, email?, phone? }`.
    #[wasm_bindgen(js_name = saveContact)]
    pub fn save_contact(&self, value: JsValue) -> Result<(), JsValue> {
        let info: UserInfo = value
            .into_serde()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.sessions.set_user_info(info);
        Ok(())
    }

    #[wasm_bindgen(js_name = sessionId)]
    pub fn session_id(&self) -> Option<String> {
        self.sessions.session_id()
    }

    #[wasm_bindgen(js_name = clearSession)]
    pub fn clear_session(&self) {
        self.sessions.clear();
    }
}

impl ChatWidget {
    fn from_config(config: WidgetConfig) -> Self {
        let store: Rc<dyn SessionStore> = auto_detect_store();
        let tokens: Rc<dyn TokenSource> =
            Rc::new(LocalStorageTokenSource::new(config.token_key.clone()));

        let sessions = Rc::new(SessionManager::new(
            store,
            tokens.clone(),
            Rc::new(SystemClock),
        ));

        let identity: Rc<dyn IdentityApi> = match &config.identity_api_url {
            Some(url) => Rc::new(HttpIdentityApi::new(url.clone(), tokens.clone())),
            None => Rc::new(NoIdentityApi),
        };

        let client = Rc::new(ChatClient::new(
            sessions.clone(),
            Rc::new(HttpQuestionApi::new(config.chat_api_url.clone())),
            identity,
            tokens,
        ));

        Self { client, sessions }
    }
}

/// Stands in when no identity endpoint is configured; the transport then
/// falls back to stored contact details.
struct NoIdentityApi;

#[async_trait::async_trait(?Send)]
impl IdentityApi for NoIdentityApi {
    async fn fetch_user_info(&self) -> widget_types::Result<Option<UserInfo>> {
        Ok(None)
    }
}
