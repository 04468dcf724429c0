//! User administration commands (admin)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Password;

use super::{confirm, read_document, search_options, with_context};
use crate::output;
use bankportal_core::domain::{CreateUser, UpdateUser, UserFilters};
use bankportal_core::search::{CardHolders, Usernames};
use bankportal_core::workflows;

#[derive(Subcommand)]
pub enum UsersCommands {
    /// List users, optionally filtered
    List {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a user, verified with their national ID
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: String,
        /// Phone number in +<digits> form
        #[arg(long)]
        phone: String,
        /// Country code the ID was issued in
        #[arg(long)]
        country: String,
        #[arg(long)]
        city: String,
        /// Image of the user's national ID
        #[arg(long)]
        id_image: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a user's details; fields left out stay as they are
    Update {
        username: String,
        #[arg(long)]
        new_username: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        password: bool,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        city: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a user
    Delete {
        username: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search usernames
    Search {
        #[arg(default_value = "")]
        query: String,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search users holding a debit card
    Holders {
        #[arg(default_value = "")]
        query: String,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct FilterArgs {
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    email: Option<String>,
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
}

pub fn run(command: UsersCommands) -> Result<()> {
    match command {
        UsersCommands::List {
            filters,
            page,
            limit,
            json,
        } => with_context(|ctx| {
            let filters = UserFilters {
                username: filters.username,
                email: filters.email,
                first_name: filters.first_name,
                last_name: filters.last_name,
                phone_number: filters.phone,
                country: filters.country,
                city: filters.city,
                page,
                limit,
            };
            let users = ctx.user_api.filtered(&filters)?;
            if json {
                return output::print_json(&users);
            }

            let mut table = output::create_table();
            table.set_header(vec!["Username", "Name", "Email", "Phone", "Country", "City", "Role"]);
            for user in &users.users {
                table.add_row(vec![
                    user.username.clone(),
                    user.full_name(),
                    user.email.clone(),
                    user.phone_number.clone(),
                    user.country.clone(),
                    user.city.clone(),
                    user.role_name.as_str().to_string(),
                ]);
            }
            println!("{}", table);
            println!(
                "{}",
                format!("Page {} of {} ({} users)", users.page, users.total_pages, users.total).dimmed()
            );
            Ok(())
        }),
        UsersCommands::Create {
            username,
            email,
            first_name,
            last_name,
            dob,
            phone,
            country,
            city,
            id_image,
            json,
        } => {
            let password = Password::new()
                .with_prompt("Password for the new user")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()?;
            let document = id_image.as_deref().map(read_document).transpose()?;
            let user = CreateUser {
                username,
                email,
                password,
                first_name,
                last_name,
                dob,
                phone_number: phone,
                country,
                city,
                ..CreateUser::default()
            };

            with_context(|ctx| {
                let spinner = output::spinner("Scanning ID and creating user...", json);
                let result = workflows::users::create(&ctx.scanner, &ctx.user_api, user, document.as_ref());
                spinner.finish_and_clear();
                output::outcome(result, json)?;
                Ok(())
            })
        }
        UsersCommands::Update {
            username,
            new_username,
            password,
            email,
            first_name,
            last_name,
            dob,
            phone,
            country,
            city,
            json,
        } => {
            let password = if password {
                Some(Password::new().with_prompt("New password").interact()?)
            } else {
                None
            };
            let form = UpdateUser {
                username,
                new_username,
                password,
                email,
                first_name,
                last_name,
                dob,
                phone_number: phone,
                country,
                city,
            };

            with_context(|ctx| {
                ctx.store.user_admin.set_update_form_data(form);
                let form = ctx.store.user_admin.update_form_data.clone();
                let result = workflows::users::update(&mut ctx.store.user_admin, &ctx.user_api, form);
                output::outcome(result, json)?;
                Ok(())
            })
        }
        UsersCommands::Delete { username, force, json } => {
            if !confirm(&format!("Delete user '{}'?", username), force || json)? {
                println!("Cancelled.");
                return Ok(());
            }
            with_context(|ctx| {
                let result = workflows::users::delete(&mut ctx.store.user_admin, &ctx.user_api, &username);
                output::outcome(result, json)?;
                Ok(())
            })
        }
        UsersCommands::Search { query, pages, json } => with_context(|ctx| {
            let (names, total_pages) = search_options(ctx, &Usernames(&ctx.user_api), &query, pages)?;
            print_names(&names, total_pages, json)
        }),
        UsersCommands::Holders { query, pages, json } => with_context(|ctx| {
            let (names, total_pages) = search_options(ctx, &CardHolders(&ctx.user_api), &query, pages)?;
            print_names(&names, total_pages, json)
        }),
    }
}

fn print_names(names: &[String], total_pages: u32, json: bool) -> Result<()> {
    if json {
        return output::print_json(&serde_json::json!({
            "usernames": names,
            "totalPages": total_pages,
        }));
    }
    for name in names {
        println!("  {}", name);
    }
    println!("{}", format!("{} result(s), {} page(s) available", names.len(), total_pages).dimmed());
    Ok(())
}
