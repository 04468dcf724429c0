//! Account domain model

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Backend-generated account number. Unique and never reassigned.
pub type AccountNb = u64;

/// Kind of bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    #[serde(rename = "CHECKINGS")]
    Checkings,
    #[serde(rename = "SAVINGS")]
    Savings,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checkings => "CHECKINGS",
            AccountType::Savings => "SAVINGS",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CHECKINGS" | "CHECKING" => Ok(AccountType::Checkings),
            "SAVINGS" | "SAVING" => Ok(AccountType::Savings),
            other => Err(format!("unknown account type '{}'", other)),
        }
    }
}

/// Details of a single account, as shown on the user's account page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub account_name: String,
    pub account_nb: AccountNb,
    #[serde(with = "rust_decimal::serde::float")]
    pub account_balance: Decimal,
    pub account_branch: String,
    pub account_type: AccountType,
    /// Creation date exactly as the backend formats it
    pub account_creation_date: String,
    #[serde(default)]
    pub owners: Vec<String>,
}

impl AccountInfo {
    /// Balance as "$1234.50 USD"
    pub fn formatted_balance(&self) -> String {
        format!("${:.2} USD", self.account_balance)
    }

    /// Label/value rows of an account details statement
    pub fn statement_lines(&self) -> Vec<(&'static str, String)> {
        let owners = if self.owners.is_empty() {
            "N/A".to_string()
        } else {
            self.owners.join(", ")
        };
        vec![
            ("Account Name", self.account_name.clone()),
            ("Account Number", self.account_nb.to_string()),
            ("Account Type", self.account_type.to_string()),
            ("Branch", self.account_branch.clone()),
            ("Date Opened", self.account_creation_date.clone()),
            ("Current Balance", self.formatted_balance()),
            ("Owner(s)", owners),
        ]
    }
}

/// Payload for creating an account (admin action)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountForm {
    pub account_nb: AccountNb,
    pub account_name: String,
    pub account_branch: String,
    pub account_type: AccountType,
    #[serde(with = "rust_decimal::serde::float")]
    pub account_balance: Decimal,
    /// Owner usernames
    pub users: Vec<String>,
}

/// Deposit or withdrawal request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositWithdraw {
    pub account_nb: AccountNb,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl DepositWithdraw {
    pub fn new(account_nb: AccountNb, amount: Decimal) -> Self {
        Self { account_nb, amount }
    }

    /// Check the request before it is sent
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.account_nb == 0 || self.amount <= Decimal::ZERO {
            return Err("Please enter a valid account number and amount.");
        }
        Ok(())
    }
}

/// Share of accounts of one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountTypePercentage {
    #[serde(rename = "type")]
    pub account_type: String,
    pub count: u64,
    pub percentage: f64,
}

/// Account type distribution used by the analytics page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountTypeBreakdown {
    pub total: u64,
    pub breakdown: Vec<AccountTypePercentage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> AccountInfo {
        AccountInfo {
            account_name: "Main".into(),
            account_nb: 100234,
            account_balance: Decimal::new(125050, 2),
            account_branch: "Hamra".into(),
            account_type: AccountType::Checkings,
            account_creation_date: "2024-03-01".into(),
            owners: vec![],
        }
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!("checkings".parse::<AccountType>(), Ok(AccountType::Checkings));
        assert_eq!(" SAVINGS ".parse::<AccountType>(), Ok(AccountType::Savings));
        assert!("credit".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_account_info_from_backend_json() {
        let info: AccountInfo = serde_json::from_value(serde_json::json!({
            "accountName": "Main",
            "accountNb": 100234,
            "accountBalance": 1250.5,
            "accountBranch": "Hamra",
            "accountType": "CHECKINGS",
            "accountCreationDate": "2024-03-01",
            "owners": ["jane", "john"]
        }))
        .unwrap();

        assert_eq!(info.account_balance, Decimal::new(12505, 1));
        assert_eq!(info.owners, vec!["jane", "john"]);
    }

    #[test]
    fn test_statement_lines() {
        let lines = sample_info().statement_lines();
        assert_eq!(lines[1], ("Account Number", "100234".to_string()));
        assert_eq!(lines[5], ("Current Balance", "$1250.50 USD".to_string()));
        assert_eq!(lines[6], ("Owner(s)", "N/A".to_string()));
    }

    #[test]
    fn test_deposit_validation() {
        assert!(DepositWithdraw::new(100234, Decimal::new(10, 0)).validate().is_ok());
        assert!(DepositWithdraw::new(100234, Decimal::ZERO).validate().is_err());
        assert!(DepositWithdraw::new(100234, Decimal::new(-5, 0)).validate().is_err());
        assert!(DepositWithdraw::new(0, Decimal::new(10, 0)).validate().is_err());
    }

    #[test]
    fn test_deposit_amount_is_a_json_number() {
        let json = serde_json::to_value(DepositWithdraw::new(7, Decimal::new(2550, 2))).unwrap();
        assert_eq!(json, serde_json::json!({"accountNb": 7, "amount": 25.5}));
    }
}
