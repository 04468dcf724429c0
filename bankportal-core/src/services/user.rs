//! User administration endpoints

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{decode_or, decode_page, log_failure, page_params};
use crate::adapters::http::field;
use crate::adapters::ApiClient;
use crate::domain::result::Result;
use crate::domain::{CreateUser, DeleteUser, UpdateUser, User, UserFilters, UserPage};
use crate::ports::{Page, PageQuery};

pub struct UserApi {
    api: Arc<ApiClient>,
}

/// `data` of the filtered user listing; any field may be missing
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawUserPage {
    users: Option<Vec<User>>,
    total: Option<u64>,
    page: Option<u32>,
    limit: Option<u32>,
    total_pages: Option<u32>,
}

impl From<RawUserPage> for UserPage {
    fn from(raw: RawUserPage) -> Self {
        let defaults = UserPage::default();
        // Zero counts as missing, like the page widgets expect
        Self {
            users: raw.users.unwrap_or_default(),
            total: raw.total.unwrap_or(defaults.total),
            page: raw.page.filter(|&p| p > 0).unwrap_or(defaults.page),
            limit: raw.limit.filter(|&l| l > 0).unwrap_or(defaults.limit),
            total_pages: raw.total_pages.filter(|&t| t > 0).unwrap_or(defaults.total_pages),
        }
    }
}

impl UserApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Create a user; returns the created user as the backend reports it
    pub fn create(&self, user: &CreateUser) -> Result<JsonValue> {
        let body = self
            .api
            .post("/users/create", user)
            .inspect_err(log_failure("creating user"))?;
        Ok(field(&body, "/data").cloned().unwrap_or_default())
    }

    pub fn filtered(&self, filters: &UserFilters) -> Result<UserPage> {
        let params = filter_params(filters)?;
        let params: Vec<(&str, String)> = params.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        let body = self
            .api
            .get("/users/getFilteredUsers", &params)
            .inspect_err(log_failure("fetching filtered users"))?;
        let raw: RawUserPage = decode_or(&body, "/data", RawUserPage::default())?;
        Ok(raw.into())
    }

    pub fn update(&self, update: &UpdateUser) -> Result<JsonValue> {
        self.api
            .put("/users/update", update)
            .inspect_err(log_failure("updating user"))
    }

    pub fn delete(&self, user: &DeleteUser) -> Result<()> {
        self.api
            .delete(&format!("/users/delete/{}", user.username))
            .inspect_err(log_failure("deleting user"))?;
        Ok(())
    }

    /// One page of users holding at least one debit card
    pub fn card_holders(&self, query: &PageQuery) -> Result<Page<String>> {
        let body = self
            .api
            .get("/users/card-holders", &page_params(query))
            .inspect_err(log_failure("fetching card holders"))?;
        decode_page(&body, "users", "username")
    }

    pub fn usernames(&self, query: &PageQuery) -> Result<Page<String>> {
        let body = self
            .api
            .get("/users/all-usernames", &page_params(query))
            .inspect_err(log_failure("fetching usernames"))?;
        decode_page(&body, "users", "username")
    }

    pub fn total_normal_users(&self) -> Result<u64> {
        let body = self
            .api
            .get("/users/total-normal-users", &[])
            .inspect_err(log_failure("fetching total users"))?;
        decode_or(&body, "/data/totalUsers", 0)
    }
}

/// Flatten filters into query parameters, dropping unset ones
fn filter_params(filters: &UserFilters) -> Result<Vec<(String, String)>> {
    let JsonValue::Object(map) = serde_json::to_value(filters)? else {
        return Ok(Vec::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(k, v)| match v {
            JsonValue::String(s) if s.is_empty() => None,
            JsonValue::String(s) => Some((k, s)),
            JsonValue::Null => None,
            other => Some((k, other.to_string())),
        })
        .collect())
}
