use anyhow::{Result, bail};

use super::{CommandError, Context, require_login};
use crate::auth::{AuthStore, Storage};
use crate::chat::{Conversation, print_transcript};
use crate::i18n::translations;
use crate::ui::{Spinner, Style};

/// Sends one message and prints the bot reply to stdout.
///
/// # Errors
///
/// Fails when anonymous, when the message is blank, or with
/// [`CommandError::Failed`] carrying the raw error when the turn fails. The
/// localized failure reply is still printed in that case.
pub async fn send<S: Storage>(
    store: &AuthStore<S>,
    session_name: &str,
    message: &str,
) -> Result<String> {
    require_login(store)?;
    let language = store.language();
    let t = translations(language);

    let mut conversation = Conversation::new(session_name);
    let spinner = Spinner::new(t.chat.typing);
    let reply = conversation
        .submit(store, message, language)
        .await
        .map(|reply| reply.text.clone());
    spinner.stop();

    let Some(reply) = reply else {
        bail!("Message cannot be empty");
    };

    match conversation.error() {
        Some(error) => {
            println!("{reply}");
            Err(CommandError::Failed(error.to_string()).into())
        }
        None => Ok(reply),
    }
}

pub async fn run_send(ctx: &Context, message: &str) -> Result<()> {
    let store = ctx.open_store()?;
    let reply = send(&store, &ctx.config.session_name, message).await?;
    println!("{reply}");
    Ok(())
}

pub async fn run_history(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    require_login(&store)?;
    let t = translations(store.language());

    let spinner = Spinner::new(t.chat.typing);
    let messages = store.api().get_chat_history(store.token()).await;
    spinner.stop();
    let messages = messages?;

    println!("{}", Style::header(t.menu.history));
    print_transcript(&messages, store.username().unwrap_or_default(), t);
    Ok(())
}

pub async fn run_session(ctx: &Context, name: &str) -> Result<()> {
    let store = ctx.open_store()?;
    require_login(&store)?;
    let t = translations(store.language());

    let spinner = Spinner::new(t.chat.typing);
    let messages = store.api().get_chat_session(name, store.token()).await;
    spinner.stop();
    let messages = messages?;

    println!("{} {}", Style::label("session"), Style::value(name));
    print_transcript(&messages, store.username().unwrap_or_default(), t);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::auth::{MemoryStorage, TOKEN_KEY, USERNAME_KEY};
    use crate::i18n::Language;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer, logged_in: bool) -> AuthStore<MemoryStorage> {
        let mut storage = MemoryStorage::new();
        if logged_in {
            storage.set(TOKEN_KEY, "abc").unwrap();
            storage.set(USERNAME_KEY, "ana").unwrap();
        }
        AuthStore::new(ApiClient::new(format!("{}/api", server.uri())), storage)
            .with_language(Language::En)
    }

    #[tokio::test]
    async fn test_send_returns_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/send"))
            .and(query_param("sessionName", "work"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "Oh, hi."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server, true);
        let reply = send(&store, "work", "oi").await.unwrap();

        assert_eq!(reply, "Oh, hi.");
    }

    #[tokio::test]
    async fn test_send_failure_reports_raw_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/send"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let store = store_for(&server, true);
        let err = send(&store, "default", "oi").await.unwrap_err();

        assert_eq!(err.to_string(), "forbidden");
        assert_eq!(store.token(), Some("abc"));
    }

    #[tokio::test]
    async fn test_send_requires_login() {
        let server = MockServer::start().await;
        let store = store_for(&server, false);

        let err = send(&store, "default", "oi").await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CommandError>(),
            Some(CommandError::NotLoggedIn(_))
        ));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_rejects_blank_message() {
        let server = MockServer::start().await;
        let store = store_for(&server, true);

        assert!(send(&store, "default", "   ").await.is_err());
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
