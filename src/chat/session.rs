use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::conversation::Conversation;
use super::ui::{self, ConfigView};
use crate::auth::{AuthStore, Storage, save_language};
use crate::i18n::{Language, Translations, translations, validate_language};
use crate::ui::{Spinner, Style};

/// What the REPL should do after handling a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// An interactive chat session.
///
/// Owns the auth store for the lifetime of the REPL so `/logout` and `/lang`
/// can persist their changes.
pub struct ChatSession<S: Storage> {
    auth: AuthStore<S>,
    conversation: Conversation,
    language: Language,
}

impl<S: Storage> ChatSession<S> {
    pub fn new(auth: AuthStore<S>, session_name: impl Into<String>, language: Language) -> Self {
        Self {
            auth: auth.with_language(language),
            conversation: Conversation::new(session_name),
            language,
        }
    }

    pub const fn auth(&self) -> &AuthStore<S> {
        &self.auth
    }

    pub const fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    fn strings(&self) -> &'static Translations {
        translations(self.language)
    }

    fn display_name(&self) -> String {
        self.auth.username().unwrap_or("you").to_string()
    }

    pub async fn run(&mut self) -> Result<()> {
        let t = self.strings();
        ui::print_header(t, &self.display_name(), self.conversation.session_name());
        ui::print_transcript(self.conversation.messages(), &self.display_name(), t);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_placeholder(self.strings().chat.placeholder)
                .with_help_message("/help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if self.handle_command(cmd).await? == Flow::Exit {
                            break;
                        }
                    }
                    Input::Text(text) => self.send_and_print(&text).await,
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Runs one turn, showing the typing indicator while it is pending.
    async fn send_and_print(&mut self, text: &str) {
        let username = self.display_name();
        let language = self.language;
        let t = self.strings();

        let spinner = Spinner::new(t.chat.typing);
        let reply = self
            .conversation
            .submit(&self.auth, text, language)
            .await
            .cloned();
        spinner.stop();

        if let Some(reply) = reply {
            ui::print_message(&reply, &username, t);
        }
        if let Some(error) = self.conversation.error() {
            ui::print_error(error);
        } else {
            println!();
        }
    }

    /// Handles a slash command.
    ///
    /// # Errors
    ///
    /// Returns an error only when persisting local state fails.
    pub async fn handle_command(&mut self, cmd: SlashCommand) -> Result<Flow> {
        match cmd {
            SlashCommand::Config => {
                ui::print_config(&ConfigView {
                    api_url: self.auth.api().base_url(),
                    session: self.conversation.session_name(),
                    username: self.auth.username(),
                    language: self.language,
                });
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::History => self.show_history().await,
            SlashCommand::Lang(code) => self.switch_language(code.as_deref())?,
            SlashCommand::Logout => {
                self.auth.logout()?;
                println!("{}", Style::success(self.strings().messages.logged_out));
                return Ok(Flow::Exit);
            }
            SlashCommand::New => {
                self.conversation.new_chat();
                println!("{} {}", Style::success("✓"), self.strings().chat.new_chat);
                println!();
            }
            SlashCommand::Quit => return Ok(Flow::Exit),
            SlashCommand::Session(name) => self.switch_session(name.as_deref()).await,
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        Ok(Flow::Continue)
    }

    async fn show_history(&self) {
        let t = self.strings();
        let spinner = Spinner::new(t.chat.typing);
        let result = self.auth.api().get_chat_history(self.auth.token()).await;
        spinner.stop();

        match result {
            Ok(messages) => {
                println!("{}", Style::header(t.menu.history));
                ui::print_transcript(&messages, &self.display_name(), t);
            }
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    async fn switch_session(&mut self, name: Option<&str>) {
        let Some(name) = name else {
            ui::print_error("Usage: /session <name>");
            return;
        };

        let t = self.strings();
        let spinner = Spinner::new(t.chat.typing);
        let result = self
            .auth
            .api()
            .get_chat_session(name, self.auth.token())
            .await;
        spinner.stop();

        match result {
            Ok(messages) => {
                self.conversation.load_session(name, messages);
                println!(
                    "{} Switched to session {}",
                    Style::success("✓"),
                    Style::value(name)
                );
                ui::print_transcript(self.conversation.messages(), &self.display_name(), t);
            }
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    /// Switches the UI language and persists the choice.
    ///
    /// # Errors
    ///
    /// Returns an error if the choice cannot be written to storage. An unknown
    /// code is reported and otherwise ignored.
    pub fn switch_language(&mut self, code: Option<&str>) -> Result<()> {
        let Some(code) = code else {
            ui::print_error("Usage: /lang <code>");
            return Ok(());
        };

        let language = match validate_language(code) {
            Ok(language) => language,
            Err(e) => {
                ui::print_error(&e.to_string());
                return Ok(());
            }
        };

        save_language(self.auth.storage_mut(), language)?;
        self.auth.set_language(language);
        self.language = language;
        println!(
            "{} {}: {}",
            Style::success("✓"),
            self.strings().menu.language,
            Style::code(language.code())
        );
        println!();
        Ok(())
    }
}
