//! Verified transfer between accounts (user)
//!
//! A transfer only goes out with the sender's identity attached: the ID
//! image is scanned against the country on the user's profile and the
//! extracted document number travels with the transaction.

use serde_json::Value as JsonValue;

use super::Outcome;
use crate::domain::{CreateTransaction, IdentityDocument};
use crate::ports::IdentityScanner;
use crate::services::{AuthApi, TransactionApi};
use crate::state::Alert;

pub const MISSING_DOCUMENT: &str = "Please upload your National ID for verification before sending.";
const SEND_FAILED: &str = "Failed to send transaction";

pub fn send(
    auth: &AuthApi,
    scanner: &dyn IdentityScanner,
    transactions: &TransactionApi,
    transaction: CreateTransaction,
    document: Option<&IdentityDocument>,
) -> Outcome<JsonValue> {
    if let Err(msg) = transaction.validate() {
        return Outcome::rejected(Alert::warning(msg));
    }
    let Some(document) = document.filter(|d| !d.is_empty()) else {
        return Outcome::rejected(Alert::error(MISSING_DOCUMENT));
    };

    let user = match auth.me() {
        Ok(user) => user,
        Err(e) => return Outcome::failed(&e, SEND_FAILED),
    };
    let identity = match scanner.scan(document, &user.country) {
        Ok(identity) => identity,
        Err(e) => return Outcome::failed(&e, SEND_FAILED),
    };

    let verified = CreateTransaction {
        document_number: Some(identity.document_number),
        country_full: Some(identity.country_full),
        ..transaction
    };
    match transactions.create(&verified) {
        Ok(body) => Outcome::done(body, Alert::success("Transaction verified and sent successfully!")),
        Err(e) => Outcome::failed(&e, SEND_FAILED),
    }
}
