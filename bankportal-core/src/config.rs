//! Configuration management
//!
//! Settings live in `settings.json` inside the portal directory:
//! ```json
//! {
//!   "api": { "url": "http://localhost:3000", "graphqlPath": "/graphql", "timeoutSecs": 30 },
//!   "search": { "pageSize": 5, "debounceMs": 400 }
//! }
//! ```
//! Unknown keys are kept when the file is saved back.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_GRAPHQL_PATH: &str = "/graphql";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Environment variable overriding the backend URL
pub const API_URL_ENV: &str = "BANKPORTAL_API_URL";
/// Environment variable overriding the request timeout (seconds)
pub const TIMEOUT_ENV: &str = "BANKPORTAL_TIMEOUT_SECS";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(default)]
    search: SearchSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    graphql_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    debounce_ms: Option<u64>,
}

/// Portal configuration (resolved view of settings + environment)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub graphql_path: String,
    pub timeout: Duration,
    pub page_size: u32,
    pub debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            graphql_path: DEFAULT_GRAPHQL_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl Config {
    /// Load config from the portal directory
    ///
    /// The backend URL and timeout can be overridden with
    /// `BANKPORTAL_API_URL` / `BANKPORTAL_TIMEOUT_SECS`.
    pub fn load(portal_dir: &Path) -> Result<Self> {
        let raw = read_settings(portal_dir)?;
        let defaults = Config::default();

        let api_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or(raw.api.url)
            .unwrap_or(defaults.api_url);

        let timeout_secs = match std::env::var(TIMEOUT_ENV).ok() {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a number of seconds", TIMEOUT_ENV))?,
            None => raw.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            graphql_path: raw.api.graphql_path.unwrap_or(defaults.graphql_path),
            timeout: Duration::from_secs(timeout_secs),
            page_size: raw.search.page_size.unwrap_or(defaults.page_size).max(1),
            debounce: raw
                .search
                .debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
        })
    }

    /// Save config to the portal directory, preserving keys we don't manage
    pub fn save(&self, portal_dir: &Path) -> Result<()> {
        let mut settings = read_settings(portal_dir)?;

        settings.api.url = Some(self.api_url.clone());
        settings.api.graphql_path = Some(self.graphql_path.clone());
        settings.api.timeout_secs = Some(self.timeout.as_secs());
        settings.search.page_size = Some(self.page_size);
        settings.search.debounce_ms = Some(self.debounce.as_millis() as u64);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(portal_dir.join("settings.json"), content)?;
        Ok(())
    }

    /// Full URL of the GraphQL endpoint
    pub fn graphql_url(&self) -> String {
        format!("{}/{}", self.api_url, self.graphql_path.trim_start_matches('/'))
    }

    /// Browser entry point of the Google sign-in flow
    pub fn google_oauth_url(&self) -> String {
        format!("{}/auth/google", self.api_url)
    }
}

fn read_settings(portal_dir: &Path) -> Result<SettingsFile> {
    let settings_path = portal_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {:?}", settings_path))?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}
