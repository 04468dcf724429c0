//! Transaction domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::account::AccountNb;

/// Transfer request between two accounts
///
/// The identity fields are attached after the sender's identity document has
/// been scanned; the backend rejects transfers without them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransaction {
    pub sender_account_nb: AccountNb,
    pub receiver_account_nb: AccountNb,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_full: Option<String>,
}

impl CreateTransaction {
    pub fn new(sender: AccountNb, receiver: AccountNb, amount: Decimal) -> Self {
        Self {
            sender_account_nb: sender,
            receiver_account_nb: receiver,
            amount,
            message: None,
            document_number: None,
            country_full: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.message = if message.trim().is_empty() { None } else { Some(message) };
        self
    }

    /// Required fields: both accounts and a non-zero amount
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.sender_account_nb == 0 || self.receiver_account_nb == 0 || self.amount.is_zero() {
            return Err("All fields except message are required");
        }
        if self.amount < Decimal::ZERO {
            return Err("Amount must be greater than 0");
        }
        Ok(())
    }

    pub fn is_verified(&self) -> bool {
        self.document_number.is_some() && self.country_full.is_some()
    }
}

/// A transaction row as listed on the dashboard and transactions page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub sender_account_number: AccountNb,
    pub receiver_account_number: AccountNb,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub date: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Total transferred value on one day (analytics)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionValueOverTime {
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_requires_all_fields() {
        let tx = CreateTransaction::new(1001, 1002, Decimal::new(50, 0));
        assert!(tx.validate().is_ok());

        assert!(CreateTransaction::new(0, 1002, Decimal::new(50, 0)).validate().is_err());
        assert!(CreateTransaction::new(1001, 0, Decimal::new(50, 0)).validate().is_err());
        assert!(CreateTransaction::new(1001, 1002, Decimal::ZERO).validate().is_err());
        assert!(CreateTransaction::new(1001, 1002, Decimal::new(-1, 0)).validate().is_err());
    }

    #[test]
    fn test_blank_message_is_dropped() {
        let tx = CreateTransaction::new(1, 2, Decimal::ONE).with_message("   ");
        assert!(tx.message.is_none());

        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("message").is_none());
        assert!(json.get("documentNumber").is_none());
    }

    #[test]
    fn test_transaction_row_from_backend() {
        let row: TransactionData = serde_json::from_value(serde_json::json!({
            "senderAccountNumber": 1001,
            "receiverAccountNumber": 1002,
            "value": 20,
            "date": "2025-01-15"
        }))
        .unwrap();
        assert_eq!(row.value, Decimal::new(20, 0));
        assert!(row.message.is_none());
    }
}
