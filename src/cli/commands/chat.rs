use anyhow::Result;

use super::Context;
use super::auth::{sign_in, sign_up};
use crate::auth::{AuthStore, Storage};
use crate::chat::ChatSession;
use crate::cli::forms::{self, AuthChoice};
use crate::i18n::translations;
use crate::ui::{handle_prompt_cancellation, print_error};

/// Runs the interactive chat, signing in first when no session is stored.
pub async fn run_chat(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;

    if !store.is_authenticated() && !authenticate(&mut store).await? {
        return Ok(());
    }

    let language = store.language();
    let mut session = ChatSession::new(store, ctx.config.session_name.clone(), language);
    session.run().await
}

/// Loops over the welcome forms until a login succeeds.
///
/// Returns `false` if the user cancels. A successful registration leads
/// back to the login form, since registering never signs in.
async fn authenticate<S: Storage>(store: &mut AuthStore<S>) -> Result<bool> {
    let t = translations(store.language());
    let mut choice = match handle_prompt_cancellation(|| forms::choose_auth(t))? {
        Some(choice) => choice,
        None => return Ok(false),
    };

    loop {
        match choice {
            AuthChoice::Login => {
                let Some(credentials) = handle_prompt_cancellation(|| forms::login_form(t, None))?
                else {
                    return Ok(false);
                };
                match sign_in(store, &credentials).await {
                    Ok(()) => {
                        println!();
                        return Ok(true);
                    }
                    Err(e) => print_error(&e.to_string()),
                }
            }
            AuthChoice::Register => {
                let Some(details) = handle_prompt_cancellation(|| forms::register_form(t))? else {
                    return Ok(false);
                };
                match sign_up(store, &details).await {
                    Ok(()) => choice = AuthChoice::Login,
                    Err(e) => print_error(&e.to_string()),
                }
            }
        }
    }
}
