//! The user's accounts and the one being viewed

use super::RequestState;
use crate::domain::result::Result;
use crate::domain::{AccountInfo, AccountNb};
use crate::services::AccountApi;

#[derive(Debug, Clone, Default)]
pub struct AccountsSlice {
    pub accounts: Vec<AccountNb>,
    pub selected_account: Option<AccountNb>,
    pub account_info: Option<AccountInfo>,
    pub request: RequestState,
}

impl AccountsSlice {
    pub fn set_selected_account(&mut self, account_nb: Option<AccountNb>) {
        self.selected_account = account_nb;
    }

    pub fn fetch_accounts(&mut self, api: &AccountApi) -> Result<&[AccountNb]> {
        self.accounts = self
            .request
            .track("Failed to load accounts", || api.my_account_nbs())?;
        Ok(&self.accounts)
    }

    pub fn fetch_account_info(&mut self, api: &AccountApi, account_nb: AccountNb) -> Result<&AccountInfo> {
        let info = self
            .request
            .track("Failed to load account details", || api.account_info(account_nb))?;
        Ok(self.account_info.insert(info))
    }
}
