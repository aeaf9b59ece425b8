//! # quip - terminal client for the SarcasticBot chat API
//!
//! `quip` signs a user in against a remote chat service, keeps the session
//! token between runs, and exchanges messages with the bot, either one at a
//! time or in an interactive chat mode.
//!
//! ## Quick Start
//!
//! ```bash
//! # Sign in (the token is remembered)
//! quip login
//!
//! # Interactive chat mode
//! quip
//!
//! # One-shot message
//! quip send "Is it going to rain?"
//!
//! # Switch the UI to English
//! quip language en
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/quip/config.toml`:
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8081/api"
//! timeout_secs = 30
//!
//! [chat]
//! session = "default"
//! ```
//!
//! The session token, username and UI language live in
//! `~/.local/share/quip/state.json`.

/// HTTP client for the chat API.
pub mod api;

/// Session store and its persistence.
pub mod auth;

/// Chat turns and the interactive chat mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// File system utilities.
pub mod fs;

/// UI languages and their string tables.
pub mod i18n;

/// Diagnostics logging setup.
pub mod logging;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration and state.
pub mod paths;

/// Terminal UI components (spinner, colors).
pub mod ui;
