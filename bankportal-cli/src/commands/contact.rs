//! Contact commands - send a message (user), browse messages (admin)

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Input;

use super::with_context;
use crate::output;
use bankportal_core::domain::MessageFilters;
use bankportal_core::workflows;

#[derive(Subcommand)]
pub enum ContactCommands {
    /// Send a message to the bank
    Send {
        #[arg(long)]
        subject: String,
        /// Message text; prompted for when omitted
        #[arg(long)]
        message: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse messages sent by users (admin)
    List {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: ContactCommands) -> Result<()> {
    match command {
        ContactCommands::Send { subject, message, json } => {
            let message = match message {
                Some(m) => m,
                None => Input::new().with_prompt("Message").interact_text()?,
            };
            with_context(|ctx| {
                let slice = &mut ctx.store.contact;
                slice.set_subject(subject);
                slice.set_message(message);
                output::outcome(workflows::contact::send(slice, &ctx.contact_api), json)?;
                Ok(())
            })
        }
        ContactCommands::List {
            username,
            first_name,
            last_name,
            phone,
            country,
            city,
            page,
            limit,
            json,
        } => with_context(|ctx| {
            let filters = MessageFilters {
                username,
                first_name,
                last_name,
                phone_number: phone,
                country,
                city,
                page,
                limit,
            };
            let page = ctx.contact_api.list(&filters)?;
            if json {
                return output::print_json(&page);
            }
            if page.messages.is_empty() {
                println!("No messages found.");
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Date", "From", "Location", "Subject", "Message"]);
            for msg in &page.messages {
                let from = match (&msg.first_name, &msg.last_name) {
                    (Some(first), Some(last)) => format!("{} {}", first, last),
                    _ => msg.username.clone().unwrap_or_else(|| "N/A".to_string()),
                };
                let location = [msg.city.as_deref(), msg.country.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(", ");
                table.add_row(vec![
                    msg.created_at.clone(),
                    from,
                    location,
                    msg.subject.clone(),
                    msg.message.clone(),
                ]);
            }
            println!("{}", table);
            println!(
                "{}",
                format!("Page {} of {} ({} messages)", page.page, page.total_pages, page.total).dimmed()
            );
            Ok(())
        }),
    }
}
