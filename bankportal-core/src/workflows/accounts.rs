//! Account creation (admin)

use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

use super::Outcome;
use crate::domain::{AccountForm, AccountNb};
use crate::services::AccountApi;
use crate::state::Alert;

/// Ask the backend for a new account number to put in the form
pub fn generate_number(api: &AccountApi) -> Outcome<AccountNb> {
    match api.generate_account_nb() {
        Ok(nb) => Outcome::done(nb, Alert::success("Account number generated successfully!")),
        Err(_) => Outcome::rejected(Alert::error("Error generating account number.")),
    }
}

pub fn create(api: &AccountApi, form: &AccountForm) -> Outcome<JsonValue> {
    if form.account_balance <= Decimal::ZERO {
        return Outcome::rejected(Alert::error("Account balance must be greater than 0."));
    }
    match api.create_account(form) {
        Ok(body) => Outcome::done(body, Alert::success("Account created successfully!")),
        Err(e) => Outcome::failed(&e, "Error creating account. Please try again."),
    }
}
