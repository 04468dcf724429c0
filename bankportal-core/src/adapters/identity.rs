//! Identity scanning through the backend proxy
//!
//! The backend forwards the document to the ID analysis provider and keeps
//! the provider credentials to itself.

use std::sync::Arc;

use serde_json::json;

use super::http::ApiClient;
use crate::domain::result::{Error, Result};
use crate::domain::{IdentityDocument, ScannedIdentity};
use crate::ports::IdentityScanner;

pub const SCAN_PATH: &str = "/identity/scan";

/// Shown when the scan succeeded but did not yield both fields
pub const EXTRACTION_FAILED: &str = "Failed to extract user details from national ID Image.";

pub struct BackendIdentityScanner {
    api: Arc<ApiClient>,
}

impl BackendIdentityScanner {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl IdentityScanner for BackendIdentityScanner {
    fn scan(&self, document: &IdentityDocument, country: &str) -> Result<ScannedIdentity> {
        if document.is_empty() {
            return Err(Error::identity_scan("The identity document is empty."));
        }

        let body = json!({
            "document": document.to_data_url(),
            "country": country,
            "type": "I",
        });
        let response = self.api.post(SCAN_PATH, &body).inspect_err(|e| {
            tracing::error!(error = %e, "identity scan request failed");
        })?;

        let data = response.get("data").cloned().unwrap_or_default();
        ScannedIdentity::from_scan_data(&data).ok_or_else(|| {
            tracing::warn!("identity scan returned no document number or country");
            Error::identity_scan(EXTRACTION_FAILED)
        })
    }
}
