//! API layer - one module per backend resource
//!
//! Each API maps an intent to a single REST or GraphQL call and normalizes
//! the response envelope. Failures are logged and passed up unchanged.

mod account;
mod analytics;
mod assistant;
mod auth;
mod contact;
mod debit_card;
mod transaction;
mod user;

pub use account::AccountApi;
pub use analytics::{AnalyticsApi, AnalyticsSummary};
pub use assistant::AssistantApi;
pub use auth::AuthApi;
pub use contact::ContactApi;
pub use debit_card::DebitCardApi;
pub use transaction::TransactionApi;
pub use user::UserApi;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::adapters::http::field;
use crate::domain::result::{Error, Result};
use crate::ports::{Page, PageQuery};

/// Decode the value at `pointer`, or fall back to `default` when it's absent
pub(crate) fn decode_or<T: DeserializeOwned>(body: &JsonValue, pointer: &str, default: T) -> Result<T> {
    match field(body, pointer) {
        Some(value) => Ok(serde_json::from_value(value.clone())?),
        None => Ok(default),
    }
}

/// Decode the value at `pointer`; its absence is an error
pub(crate) fn decode<T: DeserializeOwned>(body: &JsonValue, pointer: &str) -> Result<T> {
    let value = field(body, pointer)
        .ok_or_else(|| Error::Other(format!("Unexpected response: missing {}", pointer)))?;
    Ok(serde_json::from_value(value.clone())?)
}

/// `page`, `limit` and `search` query parameters of the paged option lists
pub(crate) fn page_params(query: &PageQuery) -> Vec<(&'static str, String)> {
    vec![
        ("page", query.page.to_string()),
        ("limit", query.limit.to_string()),
        ("search", query.search.clone()),
    ]
}

/// Read one page of options from `data.{list}[].{key}` and `data.totalPages`
pub(crate) fn decode_page<T: DeserializeOwned>(body: &JsonValue, list: &str, key: &str) -> Result<Page<T>> {
    let items = match field(body, &format!("/data/{}", list)).and_then(JsonValue::as_array) {
        Some(rows) => rows
            .iter()
            .filter_map(|row| row.get(key).cloned())
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()?,
        None => Vec::new(),
    };
    let total_pages = field(body, "/data/totalPages")
        .and_then(JsonValue::as_u64)
        .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX));
    Ok(Page::new(items, total_pages))
}

/// Log a failed call with what it was trying to do
pub(crate) fn log_failure(action: &'static str) -> impl Fn(&Error) {
    move |e| tracing::error!(error = %e, "Error {}", action)
}
