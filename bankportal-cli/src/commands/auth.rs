//! Session commands - login, logout, whoami, password reset

use std::env;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::{get_context, with_context};
use crate::output;
use bankportal_core::domain::LoginPayload;
use bankportal_core::workflows::{self, auth::ResetForm};

/// Environment variable holding the login password (for scripts)
const PASSWORD_ENV: &str = "BANKPORTAL_PASSWORD";

#[derive(Subcommand)]
pub enum ResetCommands {
    /// Email a password reset link
    Request {
        /// Account email address
        email: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a new password using the token and id from the reset link
    Confirm {
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        id: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn get_password(flag: Option<String>) -> Result<String> {
    if let Some(p) = flag {
        return Ok(p);
    }
    if let Ok(p) = env::var(PASSWORD_ENV) {
        return Ok(p);
    }
    Ok(Password::new().with_prompt("Password").interact()?)
}

pub fn login(username: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let payload = LoginPayload {
        username,
        password: get_password(password)?,
    };

    with_context(|ctx| {
        let result = workflows::auth::login(&ctx.auth_api, &ctx.location, &payload);
        let user = output::outcome(result, json)?;
        if let (Some(user), false) = (user, json) {
            println!(
                "  Signed in as {} ({}), landing on {}",
                user.full_name().bold(),
                user.role_name.as_str(),
                ctx.location.path()
            );
        }
        Ok(())
    })
}

pub fn logout(json: bool) -> Result<()> {
    with_context(|ctx| {
        if !ctx.auth.is_authenticated() {
            if !json {
                println!("{}", "Not logged in".dimmed());
            }
            return Ok(());
        }
        // The session is dropped locally even if the backend call fails
        let result = ctx.auth_api.logout();
        if json {
            output::print_json(&serde_json::json!({ "loggedOut": true }))?;
        } else {
            match &result {
                Ok(()) => output::success("Logged out"),
                Err(e) => output::warning(&format!("Logged out locally ({})", e)),
            }
        }
        Ok(())
    })
}

pub fn whoami(json: bool) -> Result<()> {
    with_context(|ctx| {
        let user = ctx.store.user_profile.get_user_profile(&ctx.auth_api)?.clone();
        if json {
            return output::print_json(&user);
        }

        let mut table = output::create_table();
        table.add_row(vec!["Username", &user.username]);
        table.add_row(vec!["Name", &user.full_name()]);
        table.add_row(vec!["Email", &user.email]);
        table.add_row(vec!["Phone", &user.phone_number]);
        table.add_row(vec!["Date of birth", &user.dob]);
        table.add_row(vec!["Location", &format!("{}, {}", user.city, user.country)]);
        table.add_row(vec!["Role", user.role_name.as_str()]);
        println!("{}", table);
        Ok(())
    })
}

pub fn oauth_url() -> Result<()> {
    let ctx = get_context()?;
    println!("{}", ctx.config.google_oauth_url());
    Ok(())
}

pub fn reset(command: ResetCommands) -> Result<()> {
    match command {
        ResetCommands::Request { email, json } => with_context(|ctx| {
            let result = workflows::auth::request_reset(&ctx.auth_api, &email);
            if let Some(Some(link)) = output::outcome(result, json)? {
                if !json {
                    println!("  Reset link: {}", link);
                }
            }
            Ok(())
        }),
        ResetCommands::Confirm { token, id, json } => {
            let new_password = Password::new().with_prompt("New password").interact()?;
            let confirm_password = Password::new().with_prompt("Confirm password").interact()?;
            let form = ResetForm {
                token,
                id,
                new_password,
                confirm_password,
            };
            with_context(|ctx| {
                output::outcome(workflows::auth::reset_password(&ctx.auth_api, &ctx.location, form), json)?;
                Ok(())
            })
        }
    }
}
