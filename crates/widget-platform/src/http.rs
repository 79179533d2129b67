//! HTTP adapters for the question endpoint and the collaborator identity
//! endpoint. Uses browser `fetch()` via gloo-net for WASM compatibility.

use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;

use widget_core::ports::{IdentityApi, QuestionApi, TokenSource};
use widget_types::{
    protocol::{ChatRawResponse, ChatRequestBody},
    session::UserInfo,
    Result, WidgetError,
};

// ─── Question endpoint ───────────────────────────────────────

pub struct HttpQuestionApi {
    url: String,
}

impl HttpQuestionApi {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl QuestionApi for HttpQuestionApi {
    async fn ask(&self, body: &ChatRequestBody) -> Result<ChatRawResponse> {
        let response = Request::post(&self.url)
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| WidgetError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        if !response.ok() {
            // Body text is detail only; losing it must not mask the status.
            let body = response.text().await.unwrap_or_default();
            return Err(WidgetError::Http {
                status: response.status(),
                status_text: response.status_text(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| WidgetError::Serialization(e.to_string()))
    }
}

// ─── Identity endpoint ───────────────────────────────────────

/// Raw shape of the vendor profile endpoint.
#[derive(Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    vendor_name: Option<String>,
    #[serde(default)]
    vendor_email: Option<String>,
    #[serde(default)]
    vendor_phone: Option<String>,
}

pub struct HttpIdentityApi {
    url: String,
    tokens: Rc<dyn TokenSource>,
}

impl HttpIdentityApi {
    pub fn new(url: impl Into<String>, tokens: Rc<dyn TokenSource>) -> Self {
        Self {
            url: url.into(),
            tokens,
        }
    }
}

#[async_trait(?Send)]
impl IdentityApi for HttpIdentityApi {
    async fn fetch_user_info(&self) -> Result<Option<UserInfo>> {
        let Some(token) = self.tokens.token() else {
            return Ok(None);
        };

        let response = Request::get(&self.url)
            .header("Authorization", &format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        if !response.ok() {
            return Ok(None);
        }

        let profile: ProfileResponse = response
            .json()
            .await
            .map_err(|e| WidgetError::Serialization(e.to_string()))?;

        Ok(Some(UserInfo {
            name: profile.vendor_name,
            email: profile.vendor_email,
            phone: profile.vendor_phone,
            extra: Default::default(),
        }))
    }
}
