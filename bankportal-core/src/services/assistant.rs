//! Chatbot assistant

use std::sync::Arc;

use serde_json::json;

use super::{decode, log_failure};
use crate::adapters::ApiClient;
use crate::domain::result::Result;

pub struct AssistantApi {
    api: Arc<ApiClient>,
}

impl AssistantApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Send a prompt and return the assistant's reply text
    pub fn ask(&self, prompt: &str) -> Result<String> {
        let body = self
            .api
            .post("/assistant/ask", &json!({ "prompt": prompt }))
            .inspect_err(log_failure("asking assistant"))?;
        decode(&body, "/data/reply")
    }
}
