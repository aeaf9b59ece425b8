use anyhow::Result;

use super::{CommandError, Context};
use crate::api::{LoginData, RegisterData};
use crate::auth::{AuthStore, Storage};
use crate::cli::forms;
use crate::i18n::translations;
use crate::status;
use crate::ui::{Spinner, Style, handle_prompt_cancellation};

/// Logs in with `credentials`, printing the outcome.
///
/// # Errors
///
/// Returns [`CommandError::Failed`] with the server's or the localized
/// message when the login is rejected.
pub async fn sign_in<S: Storage>(store: &mut AuthStore<S>, credentials: &LoginData) -> Result<()> {
    let t = translations(store.language());

    let spinner = Spinner::new(t.auth.login);
    let ok = store.login(credentials).await?;
    spinner.stop();

    if ok {
        status!("{} {}", Style::success("✓"), t.messages.login_success);
        println!(
            "{}, {}",
            t.auth.welcome,
            Style::value(store.username().unwrap_or_default())
        );
        Ok(())
    } else {
        let message = store.error().unwrap_or(t.messages.login_error).to_string();
        Err(CommandError::Failed(message).into())
    }
}

/// Registers an account, printing the outcome. Does not log in.
///
/// # Errors
///
/// Returns [`CommandError::Failed`] when the registration is rejected.
pub async fn sign_up<S: Storage>(store: &mut AuthStore<S>, details: &RegisterData) -> Result<()> {
    let t = translations(store.language());

    let spinner = Spinner::new(t.auth.register);
    let ok = store.register(details).await;
    spinner.stop();

    if ok {
        println!("{} {}", Style::success("✓"), t.messages.register_success);
        Ok(())
    } else {
        let message = store
            .error()
            .unwrap_or(t.messages.register_error)
            .to_string();
        Err(CommandError::Failed(message).into())
    }
}

pub async fn run_login(ctx: &Context, username: Option<&str>) -> Result<()> {
    let mut store = ctx.open_store()?;
    let t = translations(store.language());

    if let Some(current) = store.username() {
        status!(
            "{} {}",
            Style::label("Currently signed in as"),
            Style::value(current)
        );
    }

    let Some(credentials) = handle_prompt_cancellation(|| forms::login_form(t, username))? else {
        return Ok(());
    };

    sign_in(&mut store, &credentials).await
}

pub async fn run_register(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let t = translations(store.language());

    let Some(details) = handle_prompt_cancellation(|| forms::register_form(t))? else {
        return Ok(());
    };

    sign_up(&mut store, &details).await
}

pub fn run_logout(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let t = translations(store.language());

    store.logout()?;
    status!("{} {}", Style::success("✓"), t.messages.logged_out);
    Ok(())
}

/// Prints who is signed in, where requests go and where state lives.
pub fn run_status(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let t = translations(store.language());
    let language = store.language();

    println!("{}", Style::header("Status"));
    match store.username() {
        Some(username) => println!("  {}      {}", Style::label("user"), Style::value(username)),
        None => println!(
            "  {}      {}",
            Style::label("user"),
            Style::warning(t.messages.not_logged_in)
        ),
    }
    println!(
        "  {}       {}",
        Style::label("api"),
        Style::secondary(&ctx.config.base_url)
    );
    println!(
        "  {}   {}",
        Style::label("session"),
        Style::value(&ctx.config.session_name)
    );
    println!(
        "  {}  {} ({})",
        Style::label("language"),
        Style::code(language.code()),
        language.display_name()
    );
    println!(
        "  {}     {}",
        Style::label("state"),
        Style::secondary(store.storage().path().display())
    );

    Ok(())
}
