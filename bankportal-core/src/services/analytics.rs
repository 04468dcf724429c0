//! Admin analytics KPIs

use std::sync::Arc;

use serde::Serialize;

use super::{AccountApi, TransactionApi, UserApi};
use crate::adapters::ApiClient;
use crate::domain::result::Result;
use crate::domain::{AccountTypeBreakdown, TransactionValueOverTime};

/// Everything the analytics page shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_users: u64,
    pub total_accounts: u64,
    pub account_types: AccountTypeBreakdown,
    pub value_over_time: Vec<TransactionValueOverTime>,
}

pub struct AnalyticsApi {
    accounts: AccountApi,
    users: UserApi,
    transactions: TransactionApi,
}

impl AnalyticsApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            accounts: AccountApi::new(Arc::clone(&api)),
            users: UserApi::new(Arc::clone(&api)),
            transactions: TransactionApi::new(api),
        }
    }

    pub fn total_users(&self) -> Result<u64> {
        self.users.total_normal_users()
    }

    pub fn total_accounts(&self) -> Result<u64> {
        self.accounts.total_accounts()
    }

    pub fn account_types(&self) -> Result<AccountTypeBreakdown> {
        self.accounts.type_percentage()
    }

    pub fn value_over_time(&self) -> Result<Vec<TransactionValueOverTime>> {
        self.transactions.value_over_time()
    }

    /// Fetch all four figures; the first failure aborts
    pub fn summary(&self) -> Result<AnalyticsSummary> {
        Ok(AnalyticsSummary {
            total_users: self.total_users()?,
            total_accounts: self.total_accounts()?,
            account_types: self.account_types()?,
            value_over_time: self.value_over_time()?,
        })
    }
}
