//! Backend lists behind the search fields

use crate::domain::result::Result;
use crate::domain::AccountNb;
use crate::ports::{Page, PageQuery, PageSource};
use crate::services::{AccountApi, UserApi};

/// Every account number in the system
pub struct AllAccountNbs<'a>(pub &'a AccountApi);

impl PageSource<AccountNb> for AllAccountNbs<'_> {
    fn fetch_page(&self, query: &PageQuery) -> Result<Page<AccountNb>> {
        self.0.all_account_nbs(query)
    }
}

/// Every account number except one, e.g. the sender of a transfer
pub struct AccountNbsExcept<'a> {
    pub api: &'a AccountApi,
    pub exclude: AccountNb,
}

impl PageSource<AccountNb> for AccountNbsExcept<'_> {
    fn fetch_page(&self, query: &PageQuery) -> Result<Page<AccountNb>> {
        self.api.all_account_nbs_except(self.exclude, query)
    }
}

/// All usernames (account owners)
pub struct Usernames<'a>(pub &'a UserApi);

impl PageSource<String> for Usernames<'_> {
    fn fetch_page(&self, query: &PageQuery) -> Result<Page<String>> {
        self.0.usernames(query)
    }
}

/// Users that hold a debit card
pub struct CardHolders<'a>(pub &'a UserApi);

impl PageSource<String> for CardHolders<'_> {
    fn fetch_page(&self, query: &PageQuery) -> Result<Page<String>> {
        self.0.card_holders(query)
    }
}
