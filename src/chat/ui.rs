//! Chat mode UI components.

use crate::api::{ChatMessage, Sender};
use crate::i18n::{Language, Translations};
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What `/config` shows.
pub struct ConfigView<'a> {
    pub api_url: &'a str,
    pub session: &'a str,
    pub username: Option<&'a str>,
    pub language: Language,
}

pub fn print_header(t: &Translations, username: &str, session: &str) {
    println!(
        "{} {} - {}, {}",
        Style::header(t.chat.bot_name),
        Style::version(format!("v{VERSION}")),
        t.auth.welcome,
        Style::value(username)
    );
    println!("{} {}", Style::label("session"), Style::value(session));
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(view: &ConfigView<'_>) {
    println!("{}", Style::header("Configuration"));
    println!("  {}       {}", Style::label("api"), Style::secondary(view.api_url));
    println!("  {}   {}", Style::label("session"), Style::value(view.session));
    println!(
        "  {}      {}",
        Style::label("user"),
        view.username
            .map_or_else(|| Style::secondary("(anonymous)"), Style::value)
    );
    println!(
        "  {}  {} ({})",
        Style::label("language"),
        Style::code(view.language.code()),
        view.language.display_name()
    );
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let commands = [
        ("/new", "Start a new chat"),
        ("/history", "Show your full chat history"),
        ("/session <name>", "Switch to a named session"),
        ("/lang <code>", "Switch language (pt-BR, en)"),
        ("/config", "Show current configuration"),
        ("/logout", "Log out and exit"),
        ("/help", "Show this help"),
        ("/quit", "Exit chat mode"),
    ];
    for (command, description) in commands {
        println!(
            "  {} {}",
            Style::command(format!("{command:<17}")),
            Style::secondary(description)
        );
    }
    println!();
}

/// Prints one message as `HH:MM name: text`.
pub fn print_message(message: &ChatMessage, username: &str, t: &Translations) {
    let time = message.display_time();
    let name = match message.sender {
        Sender::User => Style::user(username),
        Sender::Bot => Style::bot(t.chat.bot_name),
    };

    if time.is_empty() {
        println!("{name}: {}", message.text);
    } else {
        println!("{} {name}: {}", Style::secondary(time), message.text);
    }
}

/// Prints a whole message sequence, or the empty-state hint.
pub fn print_transcript(messages: &[ChatMessage], username: &str, t: &Translations) {
    if messages.is_empty() {
        println!("{}", Style::hint(t.chat.empty_state));
    }
    for message in messages {
        print_message(message, username, t);
    }
    println!();
}

/// Prints the error banner.
pub fn print_error(message: &str) {
    crate::ui::print_error(message);
    eprintln!();
}
