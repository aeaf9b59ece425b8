//! Subcommand implementations.

use anyhow::Result;

use crate::api::{ApiClient, ApiError};
use crate::auth::{AuthStore, FileStorage, Storage, load_language};
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::i18n::{Language, validate_language};

/// Login, registration, logout and status handlers.
pub mod auth;

/// Chat mode command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// Language command handlers.
pub mod language;

/// One-shot message and history handlers.
pub mod messages;

/// Exit code for failures with no more specific code.
pub const FAILURE: exitcode::ExitCode = 1;

/// Failures a command reports to the user as-is.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The command needs a session and none is stored.
    #[error("{0}")]
    NotLoggedIn(&'static str),
    /// The server or the network turned the request down.
    #[error("{0}")]
    Failed(String),
}

/// Maps an error to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> exitcode::ExitCode {
    if let Some(err) = err.downcast_ref::<CommandError>() {
        return match err {
            CommandError::NotLoggedIn(_) => exitcode::NOPERM,
            CommandError::Failed(_) => exitcode::UNAVAILABLE,
        };
    }

    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Connection(_)) => exitcode::UNAVAILABLE,
        Some(ApiError::Http { .. } | ApiError::MalformedResponse { .. }) => exitcode::PROTOCOL,
        Some(ApiError::InvalidUrl { .. }) => exitcode::CONFIG,
        Some(ApiError::ClientSetup(_)) => exitcode::SOFTWARE,
        None => FAILURE,
    }
}

/// Settings shared by every command that talks to the API.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: ResolvedConfig,
    lang_override: Option<Language>,
}

impl Context {
    /// Resolves configuration from CLI options, environment and config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is unreadable, the resolved
    /// settings are invalid, or `lang` is not a supported tag.
    pub fn resolve(
        api_url: Option<String>,
        session: Option<String>,
        lang: Option<&str>,
    ) -> Result<Self> {
        let lang_override = lang.map(validate_language).transpose()?;
        let config_file = ConfigManager::new().load_or_default()?;
        let config = resolve_config(&ResolveOptions { api_url, session }, &config_file)?;

        Ok(Self {
            config,
            lang_override,
        })
    }

    pub const fn new(config: ResolvedConfig, lang_override: Option<Language>) -> Self {
        Self {
            config,
            lang_override,
        }
    }

    /// `--lang` if given, else the persisted choice, else the default.
    pub fn language_for<S: Storage>(&self, storage: &S) -> Language {
        self.lang_override
            .or_else(|| load_language(storage))
            .unwrap_or_default()
    }

    pub fn api_client(&self) -> Result<ApiClient> {
        let client = match self.config.timeout {
            Some(timeout) => ApiClient::with_timeout(&self.config.base_url, timeout)?,
            None => ApiClient::new(&self.config.base_url),
        };
        Ok(client)
    }

    /// Opens the persisted state and rehydrates the session from it.
    pub fn open_store(&self) -> Result<AuthStore<FileStorage>> {
        let storage = FileStorage::open_default()?;
        self.store_with(storage)
    }

    /// Builds a store over an explicit storage backend.
    pub fn store_with<S: Storage>(&self, storage: S) -> Result<AuthStore<S>> {
        let language = self.language_for(&storage);
        Ok(AuthStore::new(self.api_client()?, storage).with_language(language))
    }
}

/// Fails with the localized "not logged in" message for anonymous stores.
pub fn require_login<S: Storage>(store: &AuthStore<S>) -> Result<()> {
    if store.is_authenticated() {
        Ok(())
    } else {
        let t = crate::i18n::translations(store.language());
        Err(CommandError::NotLoggedIn(t.messages.not_logged_in).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::{LANGUAGE_KEY, MemoryStorage, TOKEN_KEY, USERNAME_KEY};

    fn context(lang_override: Option<Language>) -> Context {
        Context::new(
            ResolvedConfig {
                base_url: "http://127.0.0.1:9/api".to_string(),
                timeout: None,
                session_name: "default".to_string(),
            },
            lang_override,
        )
    }

    #[test]
    fn test_language_priority() {
        let mut storage = MemoryStorage::new();
        assert_eq!(context(None).language_for(&storage), Language::PtBr);

        storage.set(LANGUAGE_KEY, "en").unwrap();
        assert_eq!(context(None).language_for(&storage), Language::En);
        assert_eq!(
            context(Some(Language::PtBr)).language_for(&storage),
            Language::PtBr
        );
    }

    #[test]
    fn test_require_login() {
        let ctx = context(Some(Language::En));
        let store = ctx.store_with(MemoryStorage::new()).unwrap();
        let err = require_login(&store).unwrap_err();
        assert!(err.to_string().contains("not logged in"));
        assert_eq!(exit_code_for(&err), exitcode::NOPERM);

        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "abc").unwrap();
        storage.set(USERNAME_KEY, "ana").unwrap();
        let store = ctx.store_with(storage).unwrap();
        assert!(require_login(&store).is_ok());
    }

    #[test]
    fn test_exit_codes() {
        let failed: anyhow::Error = CommandError::Failed("nope".to_string()).into();
        assert_eq!(exit_code_for(&failed), exitcode::UNAVAILABLE);

        let http: anyhow::Error = ApiError::Http {
            status: reqwest::StatusCode::FORBIDDEN,
            body: "forbidden".to_string(),
        }
        .into();
        assert_eq!(exit_code_for(&http), exitcode::PROTOCOL);

        let cause = reqwest::Client::new().get("not a url").build().unwrap_err();
        let setup: anyhow::Error = ApiError::ClientSetup(cause).into();
        assert_eq!(exit_code_for(&setup), exitcode::SOFTWARE);

        let other = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&other), FAILURE);
    }
}
