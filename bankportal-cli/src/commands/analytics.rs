//! Analytics dashboard (admin) and the assistant

use std::io::Read;

use anyhow::{Context, Result};
use colored::Colorize;

use super::with_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    with_context(|ctx| {
        let summary = ctx.analytics_api.summary()?;
        if json {
            return output::print_json(&summary);
        }

        println!("{}", "Bank Analytics".bold());
        println!();

        let mut table = output::create_table();
        table.add_row(vec!["Users", &summary.total_users.to_string()]);
        table.add_row(vec!["Accounts", &summary.total_accounts.to_string()]);
        println!("{}", table);
        println!();

        if !summary.account_types.breakdown.is_empty() {
            println!("{}", "Account types".bold());
            let mut types = output::create_table();
            types.set_header(vec!["Type", "Count", "Share"]);
            for entry in &summary.account_types.breakdown {
                types.add_row(vec![
                    entry.account_type.clone(),
                    entry.count.to_string(),
                    format!("{:.1}%", entry.percentage),
                ]);
            }
            println!("{}", types);
            println!();
        }

        if !summary.value_over_time.is_empty() {
            println!("{}", "Transaction value over time".bold());
            let mut values = output::create_table();
            values.set_header(vec!["Date", "Total"]);
            for point in &summary.value_over_time {
                values.add_row(vec![point.date.clone(), format!("{:.2}", point.total_value)]);
            }
            println!("{}", values);
        }
        Ok(())
    })
}

/// Ask the assistant; the prompt is read from stdin when piped
pub fn ask(prompt: Option<String>, json: bool) -> Result<()> {
    let prompt = match prompt {
        Some(p) => p,
        None if atty::isnt(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read prompt from stdin")?;
            buffer
        }
        None => anyhow::bail!("Provide a question as an argument or via stdin"),
    };
    if prompt.trim().is_empty() {
        anyhow::bail!("The question is empty");
    }

    with_context(|ctx| {
        let reply = ctx.assistant_api.ask(prompt.trim())?;
        if json {
            return output::print_json(&serde_json::json!({ "reply": reply }));
        }
        println!("{}", reply);
        Ok(())
    })
}
