//! GraphQL client over the shared REST client
//!
//! Requests go through [`ApiClient`], so they carry the same session cookie
//! and hit the same 401 interceptor as REST calls.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};

use super::http::{extract_messages, ApiClient};
use crate::domain::result::{Error, Result};

#[derive(Debug, Clone)]
pub struct GraphQlClient {
    api: Arc<ApiClient>,
}

impl GraphQlClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Run `query` and return the raw `data` object
    pub fn execute(&self, query: &str, variables: JsonValue) -> Result<JsonValue> {
        let body = json!({ "query": query, "variables": variables });
        let response = self.api.post(self.api.graphql_path(), &body)?;

        let errors = extract_messages(&json!({ "errors": response.get("errors") }));
        if !errors.is_empty() {
            tracing::error!(?errors, "GraphQL request returned errors");
            return Err(Error::GraphQl(errors));
        }

        match response.get("data") {
            Some(data) if !data.is_null() => Ok(data.clone()),
            _ => Err(Error::GraphQl(vec!["Response contained no data".to_string()])),
        }
    }

    /// Run `query` and decode `data.<field>`
    pub fn query<T: DeserializeOwned>(&self, query: &str, variables: JsonValue, field: &str) -> Result<T> {
        let mut data = self.execute(query, variables)?;
        let value = data.get_mut(field).map(JsonValue::take).unwrap_or(JsonValue::Null);
        Ok(serde_json::from_value(value)?)
    }
}
