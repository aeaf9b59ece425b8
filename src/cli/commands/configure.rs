//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::Text;

use crate::api::{DEFAULT_BASE_URL, DEFAULT_SESSION};
use crate::config::{ApiConfig, ChatConfig, ConfigFile, ConfigManager, validate_base_url};
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the config file's settings. Otherwise prompts for the
/// API URL, request timeout and default session, then saves them.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new();
    let config = manager.load_or_default()?;

    if show {
        print_config(&manager, &config);
        return Ok(());
    }

    let Some(updated) = handle_prompt_cancellation(|| prompt_config(&config))? else {
        return Ok(());
    };

    manager.save(&updated)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_config(manager: &ConfigManager, config: &ConfigFile) {
    println!(
        "{} {}",
        Style::header("Configuration"),
        Style::secondary(manager.config_path().display())
    );
    println!(
        "  {}      {}",
        Style::label("base_url"),
        config
            .api
            .base_url
            .as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("timeout_secs"),
        config
            .api
            .timeout_secs
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    println!(
        "  {}       {}",
        Style::label("session"),
        config
            .chat
            .session
            .as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
}

fn prompt_config(current: &ConfigFile) -> Result<ConfigFile> {
    let base_url = Text::new("API base URL:")
        .with_default(current.api.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
        .prompt()?;

    let current_timeout = current
        .api
        .timeout_secs
        .map(|secs| secs.to_string())
        .unwrap_or_default();
    let timeout = Text::new("Request timeout in seconds:")
        .with_initial_value(&current_timeout)
        .with_help_message("Leave empty for no timeout")
        .prompt()?;

    let session = Text::new("Default session:")
        .with_default(current.chat.session.as_deref().unwrap_or(DEFAULT_SESSION))
        .prompt()?;

    build_config(&base_url, &timeout, &session)
}

/// Validates the answers and turns them into a config file.
fn build_config(base_url: &str, timeout: &str, session: &str) -> Result<ConfigFile> {
    let base_url = base_url.trim();
    validate_base_url(base_url)?;

    let session = session.trim();
    if session.is_empty() {
        bail!("Session name cannot be empty");
    }

    Ok(ConfigFile {
        api: ApiConfig {
            base_url: Some(base_url.to_string()),
            timeout_secs: parse_timeout(timeout)?,
        },
        chat: ChatConfig {
            session: Some(session.to_string()),
        },
    })
}

fn parse_timeout(input: &str) -> Result<Option<u64>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    match input.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(secs)),
        _ => bail!("Invalid timeout: '{input}' (expected a positive number of seconds)"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("").unwrap(), None);
        assert_eq!(parse_timeout(" 30 ").unwrap(), Some(30));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_build_config() {
        let config = build_config(" http://chat.local/api ", "", " work ").unwrap();

        assert_eq!(config.api.base_url.as_deref(), Some("http://chat.local/api"));
        assert!(config.api.timeout_secs.is_none());
        assert_eq!(config.chat.session.as_deref(), Some("work"));
    }

    #[test]
    fn test_build_config_rejects_bad_answers() {
        assert!(build_config("ftp://chat.local", "", "default").is_err());
        assert!(build_config("http://chat.local/api", "", "  ").is_err());
        assert!(build_config("http://chat.local/api", "-1", "default").is_err());
    }
}
