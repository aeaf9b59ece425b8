//! Chat turns and the interactive chat mode.
//!
//! [`Conversation`] sequences turns for one chat view; [`ChatSession`] wraps
//! it in a REPL with slash commands.

/// Slash command parsing and autocomplete.
pub mod command;
mod conversation;
mod session;
mod ui;

pub use conversation::{Conversation, PendingTurn};
pub use session::{ChatSession, Flow};
pub use ui::{print_message, print_transcript};
