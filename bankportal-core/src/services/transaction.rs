//! Transaction endpoints

use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::{decode_or, log_failure};
use crate::adapters::ApiClient;
use crate::domain::result::Result;
use crate::domain::{AccountNb, CreateTransaction, TransactionData, TransactionValueOverTime};

pub struct TransactionApi {
    api: Arc<ApiClient>,
}

impl TransactionApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub fn create(&self, transaction: &CreateTransaction) -> Result<JsonValue> {
        self.api
            .post("/transactions/create", transaction)
            .inspect_err(log_failure("creating transaction"))
    }

    /// Transactions touching one of the signed-in user's accounts
    pub fn account_transactions(&self, account_nb: AccountNb) -> Result<Vec<TransactionData>> {
        let body = self
            .api
            .get(
                "/transactions/getUserTransactions",
                &[("accountNb", account_nb.to_string())],
            )
            .inspect_err(log_failure("fetching user transactions"))?;
        decode_or(&body, "/data/transactions", Vec::new())
    }

    /// Latest transactions across the user's accounts (dashboard)
    pub fn recent(&self) -> Result<Vec<TransactionData>> {
        let body = self
            .api
            .get("/transactions/getRecentUserTrans", &[])
            .inspect_err(log_failure("fetching recent transactions"))?;
        decode_or(&body, "/data/recentTransactions", Vec::new())
    }

    pub fn value_over_time(&self) -> Result<Vec<TransactionValueOverTime>> {
        let body = self
            .api
            .get("/transactions/value-over-time", &[])
            .inspect_err(log_failure("fetching transaction value over time"))?;
        decode_or(&body, "/data", Vec::new())
    }
}
