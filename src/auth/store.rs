use anyhow::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::storage::{Storage, TOKEN_KEY, USERNAME_KEY};
use crate::api::{ApiClient, ApiError, LoginData, RegisterData};
use crate::i18n::{Language, translations};

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

/// Holds the client's session and is the only writer of its persisted form.
///
/// Network outcomes never surface as `Err`: `login` and `register` return
/// `Ok(false)` and leave a message in [`error`](Self::error). `Err` is reserved
/// for failures of the storage collaborator.
pub struct AuthStore<S: Storage> {
    api: ApiClient,
    storage: S,
    session: Option<Session>,
    error: Option<String>,
    loading: Arc<AtomicBool>,
    language: Language,
}

/// Keeps the loading flag raised while alive.
struct LoadingGuard(Arc<AtomicBool>);

impl LoadingGuard {
    fn raise(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(Arc::clone(flag))
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<S: Storage> AuthStore<S> {
    /// Creates a store, rehydrating the session from `storage`.
    ///
    /// A half-persisted session (token without username or the reverse)
    /// rehydrates as anonymous.
    pub fn new(api: ApiClient, storage: S) -> Self {
        let session = match (storage.get(TOKEN_KEY), storage.get(USERNAME_KEY)) {
            (Some(token), Some(username)) => Some(Session { token, username }),
            (None, None) => None,
            _ => {
                tracing::warn!("ignoring incomplete persisted session");
                None
            }
        };

        Self {
            api,
            storage,
            session,
            error: None,
            loading: Arc::new(AtomicBool::new(false)),
            language: Language::default(),
        }
    }

    /// Sets the language used for locally generated error messages.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Returns a handle to the loading flag that can be observed while a
    /// call is in flight.
    pub fn loading_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.loading)
    }

    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Logs in and persists the session on success.
    pub async fn login(&mut self, credentials: &LoginData) -> Result<bool> {
        let _loading = LoadingGuard::raise(&self.loading);
        self.error = None;

        let fallback = translations(self.language).messages.login_error;
        let response = match self.api.login(credentials).await {
            Ok(response) => response,
            Err(e) => {
                self.error = Some(self.describe_failure(&e, fallback));
                return Ok(false);
            }
        };

        self.storage.set_many(&[
            (TOKEN_KEY, response.token.as_str()),
            (USERNAME_KEY, response.username.as_str()),
        ])?;
        tracing::debug!(username = %response.username, "logged in");

        self.session = Some(Session {
            token: response.token,
            username: response.username,
        });

        Ok(true)
    }

    /// Registers an account. Never establishes a session.
    pub async fn register(&mut self, details: &RegisterData) -> bool {
        let _loading = LoadingGuard::raise(&self.loading);
        self.error = None;

        let fallback = translations(self.language).messages.register_error;
        match self.api.register(details).await {
            Ok(()) => true,
            Err(e) => {
                self.error = Some(self.describe_failure(&e, fallback));
                false
            }
        }
    }

    /// Clears the session from memory and storage.
    ///
    /// Memory is cleared first, so the client is anonymous even if removing
    /// the persisted keys fails.
    pub fn logout(&mut self) -> Result<()> {
        self.session = None;
        self.error = None;
        self.storage.remove_many(&[TOKEN_KEY, USERNAME_KEY])
    }

    fn describe_failure(&self, err: &ApiError, fallback: &str) -> String {
        match err {
            ApiError::Connection(cause) => {
                tracing::warn!(error = %cause, "auth request could not reach the server");
                translations(self.language).messages.network_error.to_string()
            }
            ApiError::Http { status, .. } => {
                tracing::debug!(%status, "auth request rejected");
                err.server_text().unwrap_or(fallback).to_string()
            }
            ApiError::MalformedResponse { .. }
            | ApiError::InvalidUrl { .. }
            | ApiError::ClientSetup(_) => {
                tracing::warn!(error = %err, "auth request failed");
                fallback.to_string()
            }
        }
    }
}
