//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

/// Interactive sign-in and registration forms.
pub mod forms;

pub use args::{Args, Command};
