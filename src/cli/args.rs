use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quip")]
#[command(about = "Terminal client for the SarcasticBot chat API")]
#[command(version)]
pub struct Args {
    /// API base URL (e.g., http://localhost:8081/api)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// UI language (pt-BR, en)
    #[arg(short = 'l', long = "lang", global = true)]
    pub lang: Option<String>,

    /// Suppress status output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Show debug diagnostics on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat mode (the default)
    Chat {
        /// Chat session name
        #[arg(short = 's', long)]
        session: Option<String>,
    },
    /// Sign in and remember the session
    Login {
        /// Username (prompted when omitted)
        #[arg(short = 'u', long)]
        username: Option<String>,
    },
    /// Create an account
    Register,
    /// Forget the stored session
    Logout,
    /// Show who is signed in and where requests go
    Status,
    /// Send a single message and print the reply
    Send {
        /// Message text
        message: String,

        /// Chat session name
        #[arg(short = 's', long)]
        session: Option<String>,
    },
    /// Print your full chat history
    History,
    /// Print the messages of a named session
    Session {
        /// Session name
        name: String,
    },
    /// List supported UI languages
    Languages,
    /// Set the UI language
    Language {
        /// Language code (pt-BR, en)
        code: String,
    },
    /// Configure quip settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
