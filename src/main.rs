use anyhow::Result;
use clap::Parser;

use quip_cli::cli::commands::{self, Context, auth, chat, configure, language, messages};
use quip_cli::cli::{Args, Command};
use quip_cli::output::{self, OutputConfig};
use quip_cli::{logging, ui};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || std::env::var("NO_COLOR").is_ok(),
    });
    logging::init(args.verbose);

    if let Err(e) = run(args).await {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(commands::exit_code_for(&e));
    }
}

async fn run(args: Args) -> Result<()> {
    let Args {
        api_url,
        lang,
        command,
        ..
    } = args;
    let resolve =
        |session: Option<String>| Context::resolve(api_url.clone(), session, lang.as_deref());

    match command {
        Some(Command::Languages) => {
            language::run_languages();
            Ok(())
        }
        Some(Command::Language { code }) => language::run_language(&code),
        Some(Command::Configure { show }) => configure::run_configure(show),
        None => chat::run_chat(&resolve(None)?).await,
        Some(Command::Chat { session }) => chat::run_chat(&resolve(session)?).await,
        Some(Command::Login { username }) => {
            auth::run_login(&resolve(None)?, username.as_deref()).await
        }
        Some(Command::Register) => auth::run_register(&resolve(None)?).await,
        Some(Command::Logout) => auth::run_logout(&resolve(None)?),
        Some(Command::Status) => auth::run_status(&resolve(None)?),
        Some(Command::Send { message, session }) => {
            messages::run_send(&resolve(session)?, &message).await
        }
        Some(Command::History) => messages::run_history(&resolve(None)?).await,
        Some(Command::Session { name }) => messages::run_session(&resolve(None)?, &name).await,
    }
}
