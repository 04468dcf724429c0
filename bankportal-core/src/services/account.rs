//! Account endpoints

use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::{decode, decode_or, decode_page, log_failure, page_params};
use crate::adapters::ApiClient;
use crate::domain::result::Result;
use crate::domain::{AccountForm, AccountInfo, AccountNb, AccountTypeBreakdown, DepositWithdraw};
use crate::ports::{Page, PageQuery};

pub struct AccountApi {
    api: Arc<ApiClient>,
}

impl AccountApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Deposit into an account, returning the modified account
    pub fn deposit(&self, request: &DepositWithdraw) -> Result<JsonValue> {
        let body = self
            .api
            .put("/accounts/depositMoney", request)
            .inspect_err(log_failure("depositing amount"))?;
        Ok(body.get("modifiedAcc").cloned().unwrap_or_default())
    }

    /// Withdraw from an account, returning the modified account
    pub fn withdraw(&self, request: &DepositWithdraw) -> Result<JsonValue> {
        let body = self
            .api
            .put("/accounts/withdrawMoney", request)
            .inspect_err(log_failure("withdrawing amount"))?;
        Ok(body.get("modifiedAcc").cloned().unwrap_or_default())
    }

    /// Checking accounts of the signed-in user (transfer senders)
    pub fn checking_account_nbs(&self) -> Result<Vec<AccountNb>> {
        let body = self
            .api
            .get("/accounts/getCheckingAccountsNbs", &[])
            .inspect_err(log_failure("fetching checking account numbers"))?;
        decode_or(&body, "/data/accountNbs", Vec::new())
    }

    /// Every account of the signed-in user
    pub fn my_account_nbs(&self) -> Result<Vec<AccountNb>> {
        let body = self
            .api
            .get("/accounts/getAllAccountsNbs", &[])
            .inspect_err(log_failure("fetching account numbers"))?;
        decode_or(&body, "/data/accountNbs", Vec::new())
    }

    pub fn create_account(&self, form: &AccountForm) -> Result<JsonValue> {
        self.api
            .post("/accounts/createUserAccount", form)
            .inspect_err(log_failure("creating user bank account"))
    }

    pub fn account_info(&self, account_nb: AccountNb) -> Result<AccountInfo> {
        let body = self
            .api
            .get(&format!("/accounts/getAccountInfo/{}", account_nb), &[])
            .inspect_err(log_failure("fetching account info"))?;
        decode(&body, "/data/accountInfo")
    }

    /// Ask the backend for a fresh, unused account number
    pub fn generate_account_nb(&self) -> Result<AccountNb> {
        let body = self
            .api
            .get("/accounts/generateAccountNumber", &[])
            .inspect_err(log_failure("generating account number"))?;
        decode(&body, "/data/accountNb")
    }

    /// One page of every account number in the system
    pub fn all_account_nbs(&self, query: &PageQuery) -> Result<Page<AccountNb>> {
        let body = self
            .api
            .get("/accounts/all-account-nbs", &page_params(query))
            .inspect_err(log_failure("fetching account numbers"))?;
        decode_page(&body, "accounts", "accountNb")
    }

    /// Same as [`all_account_nbs`](Self::all_account_nbs) without `exclude`
    pub fn all_account_nbs_except(&self, exclude: AccountNb, query: &PageQuery) -> Result<Page<AccountNb>> {
        let mut params = vec![("exclude", exclude.to_string())];
        params.extend(page_params(query));
        let body = self
            .api
            .get("/accounts/all-account-nbs-except", &params)
            .inspect_err(log_failure("fetching account numbers (excluding one)"))?;
        decode_page(&body, "accounts", "accountNb")
    }

    pub fn total_accounts(&self) -> Result<u64> {
        let body = self
            .api
            .get("/accounts/total-accounts", &[])
            .inspect_err(log_failure("fetching total accounts"))?;
        decode_or(&body, "/data/totalAccounts", 0)
    }

    pub fn type_percentage(&self) -> Result<AccountTypeBreakdown> {
        let body = self
            .api
            .get("/accounts/type-percentage", &[])
            .inspect_err(log_failure("fetching account type percentage"))?;
        decode_or(&body, "/data", AccountTypeBreakdown::default())
    }
}
