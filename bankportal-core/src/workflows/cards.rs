//! Debit card management (admin)
//!
//! The card forms take the account number as free text. It must contain a
//! positive number once non-digits are stripped.

use super::Outcome;
use crate::domain::debit_card::{expand_expiration, parse_card_account_nb};
use crate::domain::{DebitCard, DebitCardInput, DebitCardMutation, DeleteDebitCard};
use crate::services::DebitCardApi;
use crate::state::Alert;

pub const INVALID_ACCOUNT: &str = "Account number should be greater than 0 and not empty";

/// Raw values of the create/update card form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardForm {
    pub username: String,
    pub account_nb: String,
    /// `"3"`, `"5"` or a full duration such as `"3 years"`
    pub card_expiration_date: String,
}

impl CardForm {
    fn to_input(&self) -> Option<DebitCardInput> {
        Some(DebitCardInput {
            username: self.username.trim().to_string(),
            account_nb: parse_card_account_nb(&self.account_nb)?,
            card_expiration_date: expand_expiration(&self.card_expiration_date),
        })
    }
}

pub fn create(api: &DebitCardApi, form: &CardForm) -> Outcome<DebitCard> {
    let Some(input) = form.to_input() else {
        return Outcome::rejected(Alert::error(INVALID_ACCOUNT));
    };
    match api.create(&input) {
        Ok(response) => mutation_outcome(response, "Debit card created successfully!"),
        Err(_) => Outcome::rejected(Alert::error("Error creating debit card")),
    }
}

pub fn update(api: &DebitCardApi, form: &CardForm) -> Outcome<DebitCard> {
    let Some(input) = form.to_input() else {
        return Outcome::rejected(Alert::error(INVALID_ACCOUNT));
    };
    match api.update(&input) {
        Ok(response) => mutation_outcome(response, "Debit card updated successfully!"),
        Err(_) => Outcome::rejected(Alert::error("Error updating debit card")),
    }
}

pub fn delete(api: &DebitCardApi, username: &str, account_nb: &str) -> Outcome<DeleteDebitCard> {
    let Some(account_nb) = parse_card_account_nb(account_nb) else {
        return Outcome::rejected(Alert::error(INVALID_ACCOUNT));
    };
    let input = DeleteDebitCard {
        username: username.trim().to_string(),
        account_nb,
    };
    match api.delete(&input) {
        Ok(response) if response.deleted => {
            Outcome::done(input, Alert::success("Debit card deleted successfully!"))
        }
        Ok(response) => Outcome::rejected(Alert::error(response.message)),
        Err(e) => Outcome::failed(&e, "Error deleting debit card"),
    }
}

/// A mutation succeeded when it returned the card; otherwise its message
/// explains why not
fn mutation_outcome(response: DebitCardMutation, success: &str) -> Outcome<DebitCard> {
    match response.data {
        Some(card) => Outcome::done(card, Alert::success(success)),
        None => Outcome::rejected(Alert::error(response.message)),
    }
}
