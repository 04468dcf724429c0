//! Bank Portal CLI - the bank portal in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use bankportal_core::workflows::funds::FundsAction;
use bankportal_core::AccountNb;
use commands::{accounts, analytics, auth, cards, contact, transactions, users};

/// Bank Portal - the bank portal in your terminal
#[derive(Parser)]
#[command(name = "bp", version, about, long_about = None)]
struct Cli {
    /// Log HTTP traffic and internal events
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and keep the session for later commands
    Login {
        #[arg(long, short)]
        username: Option<String>,
        /// Password (prompted for when omitted; BANKPORTAL_PASSWORD also works)
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign out and forget the saved session
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the signed-in user's profile
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the URL that starts Google sign-in in a browser
    OauthUrl,

    /// Reset a forgotten password
    Reset {
        #[command(subcommand)]
        command: auth::ResetCommands,
    },

    /// Accounts
    Accounts {
        #[command(subcommand)]
        command: accounts::AccountsCommands,
    },

    /// Deposit money into an account (admin)
    Deposit {
        account_nb: AccountNb,
        amount: Decimal,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Withdraw money from an account (admin)
    Withdraw {
        account_nb: AccountNb,
        amount: Decimal,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transactions and transfers
    Transactions {
        #[command(subcommand)]
        command: transactions::TransactionsCommands,
    },

    /// Manage users (admin)
    Users {
        #[command(subcommand)]
        command: users::UsersCommands,
    },

    /// Debit cards
    Cards {
        #[command(subcommand)]
        command: cards::CardsCommands,
    },

    /// Contact messages
    Contact {
        #[command(subcommand)]
        command: contact::ContactCommands,
    },

    /// Show bank-wide statistics (admin)
    Analytics {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the banking assistant a question
    Ask {
        /// The question (read from stdin when omitted)
        prompt: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported as an alert
        Err(e) if e.is::<output::Failed>() => ExitCode::FAILURE,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` turns on debug output
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { username, password, json } => auth::login(username, password, json),
        Commands::Logout { json } => auth::logout(json),
        Commands::Whoami { json } => auth::whoami(json),
        Commands::OauthUrl => auth::oauth_url(),
        Commands::Reset { command } => auth::reset(command),
        Commands::Accounts { command } => accounts::run(command),
        Commands::Deposit { account_nb, amount, json } => {
            accounts::funds(FundsAction::Deposit, account_nb, amount, json)
        }
        Commands::Withdraw { account_nb, amount, json } => {
            accounts::funds(FundsAction::Withdraw, account_nb, amount, json)
        }
        Commands::Transactions { command } => transactions::run(command),
        Commands::Users { command } => users::run(command),
        Commands::Cards { command } => cards::run(command),
        Commands::Contact { command } => contact::run(command),
        Commands::Analytics { json } => analytics::run(json),
        Commands::Ask { prompt, json } => analytics::ask(prompt, json),
    }
}
