//! Debit card commands

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{confirm, with_context};
use crate::output;
use bankportal_core::workflows::{self, cards::CardForm};

#[derive(Subcommand)]
pub enum CardsCommands {
    /// Your debit cards
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Issue a card (admin)
    Create {
        /// Card holder
        #[arg(long)]
        username: String,
        /// Account the card draws from
        #[arg(long)]
        account: String,
        /// Validity: 3, 5, or a duration such as "3 years"
        #[arg(long, default_value = "3")]
        expires: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Renew or change a card (admin)
    Update {
        #[arg(long)]
        username: String,
        #[arg(long)]
        account: String,
        #[arg(long, default_value = "3")]
        expires: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a card (admin)
    Delete {
        #[arg(long)]
        username: String,
        #[arg(long)]
        account: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: CardsCommands) -> Result<()> {
    match command {
        CardsCommands::List { json } => with_context(|ctx| {
            let cards = ctx.debit_card_api.list()?;
            if json {
                return output::print_json(&cards);
            }
            if cards.is_empty() {
                println!("No debit cards found.");
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Account", "Holder", "Expires", "Status"]);
            for card in &cards {
                let status = if card.is_active() {
                    card.card_status.green().to_string()
                } else {
                    card.card_status.red().to_string()
                };
                table.add_row(vec![
                    card.account_nb.to_string(),
                    card.username.clone(),
                    card.expiration_date.clone(),
                    status,
                ]);
            }
            println!("{}", table);
            Ok(())
        }),
        CardsCommands::Create {
            username,
            account,
            expires,
            json,
        } => {
            let form = CardForm {
                username,
                account_nb: account,
                card_expiration_date: expires,
            };
            with_context(|ctx| {
                output::outcome(workflows::cards::create(&ctx.debit_card_api, &form), json)?;
                Ok(())
            })
        }
        CardsCommands::Update {
            username,
            account,
            expires,
            json,
        } => {
            let form = CardForm {
                username,
                account_nb: account,
                card_expiration_date: expires,
            };
            with_context(|ctx| {
                output::outcome(workflows::cards::update(&ctx.debit_card_api, &form), json)?;
                Ok(())
            })
        }
        CardsCommands::Delete {
            username,
            account,
            force,
            json,
        } => {
            let prompt = format!("Delete the debit card of '{}' on account {}?", username, account);
            if !confirm(&prompt, force || json)? {
                println!("Cancelled.");
                return Ok(());
            }
            with_context(|ctx| {
                output::outcome(workflows::cards::delete(&ctx.debit_card_api, &username, &account), json)?;
                Ok(())
            })
        }
    }
}
