//! Transaction commands - recent, per-account history, verified transfer

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use rust_decimal::Decimal;

use super::{read_document, with_context};
use crate::output;
use bankportal_core::domain::{CreateTransaction, TransactionData};
use bankportal_core::workflows;
use bankportal_core::AccountNb;

#[derive(Subcommand)]
pub enum TransactionsCommands {
    /// Your most recent transactions
    Recent {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Transactions of one account
    List {
        account_nb: AccountNb,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send money to another account, verified with your national ID
    Send {
        /// Sending account
        #[arg(long)]
        from: AccountNb,
        /// Receiving account
        #[arg(long)]
        to: AccountNb,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        message: Option<String>,
        /// Image of your national ID
        #[arg(long)]
        id_image: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: TransactionsCommands) -> Result<()> {
    match command {
        TransactionsCommands::Recent { json } => with_context(|ctx| {
            let transactions = ctx.transaction_api.recent()?;
            print_transactions(&transactions, json)
        }),
        TransactionsCommands::List { account_nb, json } => with_context(|ctx| {
            let transactions = ctx.transaction_api.account_transactions(account_nb)?;
            print_transactions(&transactions, json)
        }),
        TransactionsCommands::Send {
            from,
            to,
            amount,
            message,
            id_image,
            json,
        } => {
            let document = id_image.as_deref().map(read_document).transpose()?;
            let mut transaction = CreateTransaction::new(from, to, amount);
            if let Some(message) = message {
                transaction = transaction.with_message(message);
            }

            with_context(|ctx| {
                let spinner = output::spinner("Verifying identity and sending...", json);
                let result = workflows::transfer::send(
                    &ctx.auth_api,
                    &ctx.scanner,
                    &ctx.transaction_api,
                    transaction,
                    document.as_ref(),
                );
                spinner.finish_and_clear();
                output::outcome(result, json)?;
                Ok(())
            })
        }
    }
}

fn print_transactions(transactions: &[TransactionData], json: bool) -> Result<()> {
    if json {
        return output::print_json(transactions);
    }
    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Date", "From", "To", "Value", "Message"]);
    for tx in transactions {
        table.add_row(vec![
            tx.date.clone(),
            tx.sender_account_number.to_string(),
            tx.receiver_account_number.to_string(),
            format!("{:.2}", tx.value),
            tx.message.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
    Ok(())
}
