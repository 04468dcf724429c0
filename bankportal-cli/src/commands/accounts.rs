//! Account commands - list, details, create, search, statement, deposit/withdraw

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use rust_decimal::Decimal;

use super::{search_options, with_context};
use crate::output;
use bankportal_core::domain::{AccountForm, AccountType, DepositWithdraw};
use bankportal_core::search::{AccountNbsExcept, AllAccountNbs};
use bankportal_core::workflows::{self, funds::FundsAction};
use bankportal_core::AccountNb;

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// List your account numbers
    List {
        /// Only checking accounts (the ones that can send transfers)
        #[arg(long)]
        checking: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the details of one account
    Info {
        account_nb: AccountNb,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open a new account (admin)
    Create {
        /// Account number; generated by the backend when omitted
        #[arg(long)]
        number: Option<AccountNb>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        branch: String,
        /// CHECKINGS or SAVINGS
        #[arg(long = "type", value_parser = parse_account_type)]
        account_type: AccountType,
        /// Opening balance
        #[arg(long)]
        balance: Decimal,
        /// Owner username (repeatable)
        #[arg(long = "owner", required = true)]
        owners: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search account numbers (admin)
    Search {
        /// Text to search for
        #[arg(default_value = "")]
        query: String,
        /// Leave this account out of the results
        #[arg(long)]
        except: Option<AccountNb>,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print an account statement
    Statement {
        account_nb: AccountNb,
        /// Write the statement to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_account_type(value: &str) -> Result<AccountType, String> {
    value.parse()
}

pub fn run(command: AccountsCommands) -> Result<()> {
    match command {
        AccountsCommands::List { checking, json } => with_context(|ctx| {
            let nbs = if checking {
                ctx.account_api.checking_account_nbs()?
            } else {
                ctx.store.accounts.fetch_accounts(&ctx.account_api)?.to_vec()
            };
            if json {
                return output::print_json(&nbs);
            }
            if nbs.is_empty() {
                println!("No accounts found.");
                return Ok(());
            }
            for nb in nbs {
                println!("  {}", nb);
            }
            Ok(())
        }),
        AccountsCommands::Info { account_nb, json } => with_context(|ctx| {
            let info = ctx.store.accounts.fetch_account_info(&ctx.account_api, account_nb)?;
            if json {
                return output::print_json(info);
            }
            let mut table = output::create_table();
            for (label, value) in info.statement_lines() {
                table.add_row(vec![label.to_string(), value]);
            }
            println!("{}", table);
            Ok(())
        }),
        AccountsCommands::Create {
            number,
            name,
            branch,
            account_type,
            balance,
            owners,
            json,
        } => with_context(|ctx| {
            let account_nb = match number {
                Some(nb) => nb,
                None => {
                    let generated = workflows::accounts::generate_number(&ctx.account_api);
                    match output::outcome(generated, json)? {
                        Some(nb) => nb,
                        None => return Ok(()),
                    }
                }
            };
            let form = AccountForm {
                account_nb,
                account_name: name,
                account_branch: branch,
                account_type,
                account_balance: balance,
                users: owners,
            };
            output::outcome(workflows::accounts::create(&ctx.account_api, &form), json)?;
            if !json {
                println!("  Account number: {}", account_nb.to_string().bold());
            }
            Ok(())
        }),
        AccountsCommands::Search {
            query,
            except,
            pages,
            json,
        } => with_context(|ctx| {
            let (nbs, total_pages) = match except {
                Some(exclude) => {
                    let source = AccountNbsExcept {
                        api: &ctx.account_api,
                        exclude,
                    };
                    search_options(ctx, &source, &query, pages)?
                }
                None => search_options(ctx, &AllAccountNbs(&ctx.account_api), &query, pages)?,
            };
            if json {
                return output::print_json(&serde_json::json!({
                    "accountNbs": nbs,
                    "totalPages": total_pages,
                }));
            }
            for nb in &nbs {
                println!("  {}", nb);
            }
            println!("{}", format!("{} result(s), {} page(s) available", nbs.len(), total_pages).dimmed());
            Ok(())
        }),
        AccountsCommands::Statement { account_nb, output: target } => with_context(|ctx| {
            let info = ctx.account_api.account_info(account_nb)?;
            let statement = render_statement(&info.statement_lines())?;
            match target {
                Some(path) => {
                    std::fs::write(&path, statement)
                        .with_context(|| format!("Failed to write statement to {:?}", path))?;
                    output::success(&format!("Statement saved to {}", path.display()));
                }
                None => print!("{}", statement),
            }
            Ok(())
        }),
    }
}

/// `Label,Value` records under a one-field title record
fn render_statement(lines: &[(&'static str, String)]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    writer.write_record(["Account Details Statement"])?;
    for (label, value) in lines {
        writer.write_record([*label, value.as_str()])?;
    }
    let bytes = writer.into_inner().context("Failed to finish statement")?;
    String::from_utf8(bytes).context("Statement is not valid UTF-8")
}

/// Deposit into or withdraw from an account (admin)
pub fn funds(action: FundsAction, account_nb: AccountNb, amount: Decimal, json: bool) -> Result<()> {
    with_context(|ctx| {
        let request = DepositWithdraw::new(account_nb, amount);
        let modified = output::outcome(workflows::funds::submit(&ctx.account_api, action, &request), json)?;
        if let (Some(account), false) = (modified, json) {
            if let Some(balance) = account.get("accountBalance") {
                println!("  New balance: {}", balance);
            }
        }
        Ok(())
    })
}
