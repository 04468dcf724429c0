//! Debit card domain model

use serde::{Deserialize, Serialize};

use super::account::AccountNb;

/// A debit card linked to an account and a holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebitCard {
    pub username: String,
    pub account_nb: AccountNb,
    pub expiration_date: String,
    pub card_status: String,
}

impl DebitCard {
    pub fn is_active(&self) -> bool {
        self.card_status.eq_ignore_ascii_case("active")
    }
}

/// Input for `createDebitCard` and `updateDebitCard`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebitCardInput {
    pub username: String,
    pub account_nb: AccountNb,
    pub card_expiration_date: String,
}

/// Input for `deleteDebitCard`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDebitCard {
    pub username: String,
    pub account_nb: AccountNb,
}

/// Response of the create/update mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitCardMutation {
    pub message: String,
    pub data: Option<DebitCard>,
}

/// Response of the delete mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitCardDeletion {
    pub message: String,
    pub deleted: bool,
}

/// Expand the "3"/"5" shorthand of the expiration picker into "N years"
pub fn expand_expiration(value: &str) -> String {
    match value.trim() {
        "3" => "3 years".to_string(),
        "5" => "5 years".to_string(),
        other => other.to_string(),
    }
}

/// Parse a card form's account number: digits only, strictly positive
pub fn parse_card_account_nb(value: &str) -> Option<AccountNb> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.parse::<AccountNb>() {
        Ok(nb) if nb > 0 => Some(nb),
        _ => None,
    }
}
