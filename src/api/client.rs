use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::ApiError;
use super::types::{
    ChatMessage, ChatResponse, LoginData, LoginResponse, RegisterData, SendMessageRequest,
};
use crate::i18n::Language;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api";

/// Session name used when the caller does not pick one.
pub const DEFAULT_SESSION: &str = "default";

const JSON: &str = "application/json";

/// HTTP client for the chat API.
///
/// Every call is a single attempt; retries are left to the caller.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientSetup)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn login(&self, credentials: &LoginData) -> Result<LoginResponse, ApiError> {
        const ENDPOINT: &str = "/auth/login";

        let request = self
            .request(Method::POST, ENDPOINT, &[], None)?
            .json(credentials);
        let body = self.execute(ENDPOINT, request).await?;
        let login: LoginResponse = parse(ENDPOINT, &body)?;

        if login.token.is_empty() || login.username.is_empty() {
            return Err(ApiError::MalformedResponse {
                endpoint: ENDPOINT.to_string(),
                reason: "empty token or username".to_string(),
            });
        }

        Ok(login)
    }

    /// Registers a new account. The response body is ignored.
    pub async fn register(&self, details: &RegisterData) -> Result<(), ApiError> {
        const ENDPOINT: &str = "/auth/register";

        let request = self
            .request(Method::POST, ENDPOINT, &[], None)?
            .json(details);
        self.execute(ENDPOINT, request).await?;
        Ok(())
    }

    pub async fn send_message(
        &self,
        message: &str,
        username: Option<&str>,
        token: Option<&str>,
        session_name: &str,
        language: Option<Language>,
    ) -> Result<ChatResponse, ApiError> {
        const ENDPOINT: &str = "/chat/send";

        if token.is_none_or(str::is_empty) {
            tracing::warn!("sending chat message without a token; the server may reject it");
        }

        let body = SendMessageRequest {
            message,
            username,
            language: language.map(Language::code),
        };
        let request = self
            .request(
                Method::POST,
                ENDPOINT,
                &[("sessionName", session_name)],
                token,
            )?
            .json(&body);
        let body = self.execute(ENDPOINT, request).await?;
        parse(ENDPOINT, &body)
    }

    pub async fn get_chat_history(&self, token: Option<&str>) -> Result<Vec<ChatMessage>, ApiError> {
        const ENDPOINT: &str = "/chat/history";

        let request = self.request(Method::GET, ENDPOINT, &[], token)?;
        let body = self.execute(ENDPOINT, request).await?;
        parse(ENDPOINT, &body)
    }

    pub async fn get_chat_session(
        &self,
        session_name: &str,
        token: Option<&str>,
    ) -> Result<Vec<ChatMessage>, ApiError> {
        const ENDPOINT: &str = "/chat/session";

        let request = self.request(
            Method::GET,
            ENDPOINT,
            &[("sessionName", session_name)],
            token,
        )?;
        let body = self.execute(ENDPOINT, request).await?;
        parse(ENDPOINT, &body)
    }

    fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<RequestBuilder, ApiError> {
        let raw = format!("{}{endpoint}", self.base_url.trim_end_matches('/'));
        // An empty pair list would still leave a trailing `?`.
        let parsed = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query)
        };
        let url = parsed.map_err(|e| ApiError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            request = request.bearer_auth(token);
        }

        Ok(request)
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn execute(&self, endpoint: &str, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(base_url = %self.base_url, endpoint, error = %e, "request failed");
            ApiError::Connection(e)
        })?;

        let status = response.status();
        tracing::debug!(endpoint, %status, "response received");

        let body = response.text().await.map_err(ApiError::Connection)?;

        if !status.is_success() {
            return Err(ApiError::http(status, body));
        }

        Ok(body)
    }
}

fn parse<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}
