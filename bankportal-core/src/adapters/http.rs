//! REST client for the portal backend
//!
//! One configured `reqwest` client shared by every API module. It carries the
//! session cookie, sends JSON, tags each request with an `X-Request-Id`, and
//! runs the unauthorized interceptor: a 401 on anything but the login call
//! logs the session out and sends the user to `/login`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value as JsonValue;
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::ports::Navigator;
use crate::session::{AuthContext, Route};

/// Query string pairs
pub type Query<'a> = [(&'a str, String)];

/// HTTP client wrapper with cookie session and 401 handling
pub struct ApiClient {
    client: Client,
    base_url: Url,
    graphql_path: String,
    timeout: Duration,
    jar: Arc<Jar>,
    auth: AuthContext,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("graphql_path", &self.graphql_path)
            .finish()
    }
}

impl ApiClient {
    /// Build a client for the backend described by `config`
    pub fn new(
        config: &Config,
        auth: AuthContext,
        navigator: Arc<dyn Navigator>,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid API URL '{}'", config.api_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API URL '{}' cannot be used as a base URL", config.api_url);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .cookie_provider(Arc::clone(&jar))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            graphql_path: config.graphql_path.clone(),
            timeout: config.timeout,
            jar,
            auth,
            navigator,
        })
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn graphql_path(&self) -> &str {
        &self.graphql_path
    }

    // === Verbs ===

    pub fn get(&self, path: &str, query: &Query<'_>) -> Result<JsonValue> {
        self.execute(Method::GET, path, query, None)
    }

    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<JsonValue> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, path, &[], Some(body))
    }

    /// POST without a request body
    pub fn post_empty(&self, path: &str) -> Result<JsonValue> {
        self.execute(Method::POST, path, &[], None)
    }

    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<JsonValue> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PUT, path, &[], Some(body))
    }

    pub fn delete(&self, path: &str) -> Result<JsonValue> {
        self.execute(Method::DELETE, path, &[], None)
    }

    // === Session cookies ===

    /// Cookies the backend has set for this origin, as a `Cookie` header value
    pub fn session_cookies(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|v| v.to_str().ok().map(str::to_string))
            .filter(|s| !s.is_empty())
    }

    /// Put previously saved cookies back into the jar
    pub fn restore_cookies(&self, cookies: &str) {
        for pair in cookies.split(';').map(str::trim).filter(|p| p.contains('=')) {
            self.jar.add_cookie_str(pair, &self.base_url);
        }
    }

    // === Internals ===

    fn url(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{}/{}", base, path.trim_start_matches('/'));
        Url::parse(&full).map_err(|e| Error::Config(format!("Invalid request URL '{}': {}", full, e)))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self
            .client
            .request(method, self.url(path)?)
            .header("X-Request-Id", Uuid::new_v4().to_string()))
    }

    fn execute(
        &self,
        method: Method,
        path: &str,
        query: &Query<'_>,
        body: Option<JsonValue>,
    ) -> Result<JsonValue> {
        tracing::debug!(%method, path, "request");

        let mut request = self.request(method.clone(), path)?;
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().map_err(|e| self.map_request_error(e))?;
        let status = response.status();
        let text = response.text().map_err(|e| self.map_request_error(e))?;
        let payload = parse_body(&text);

        if status.is_success() {
            return Ok(payload);
        }

        let messages = extract_messages(&payload);
        if status == StatusCode::UNAUTHORIZED {
            self.on_unauthorized(path);
            return Err(Error::Unauthorized { messages });
        }

        tracing::error!(%method, path, status = status.as_u16(), ?messages, "request failed");
        Err(Error::Api {
            status: status.as_u16(),
            messages,
        })
    }

    /// Response interceptor for 401s
    ///
    /// Login failures are the caller's business. Anything else means the
    /// session is gone: tell the backend, forget the user, go to `/login`.
    fn on_unauthorized(&self, path: &str) {
        if path.contains("/login") {
            return;
        }
        tracing::warn!(path, "session expired or unauthorized, logging out");

        // Sent directly so a 401 on logout cannot re-enter the interceptor
        match self.request(Method::POST, "/auth/logout").and_then(|r| {
            r.send().map_err(|e| self.map_request_error(e))
        }) {
            Ok(resp) if !resp.status().is_success() => {
                tracing::error!(status = resp.status().as_u16(), "auto logout rejected");
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "error during auto logout"),
        }

        self.auth.clear();
        self.navigator.navigate(Route::Login.path());
    }

    /// Map transport errors to user-facing messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Transport(format!(
                "Connection timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            Error::Transport(format!("Unable to connect to {}", self.base_url))
        } else {
            Error::Transport(format!("Request failed: {}", error))
        }
    }
}

fn parse_body(text: &str) -> JsonValue {
    if text.trim().is_empty() {
        return JsonValue::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string()))
}

/// Pull human-readable messages out of an error body
///
/// Backend validation errors put either a string or a list of strings in
/// `message`; GraphQL puts them in `errors[].message`.
pub(crate) fn extract_messages(body: &JsonValue) -> Vec<String> {
    match body.get("message") {
        Some(JsonValue::String(s)) if !s.is_empty() => return vec![s.clone()],
        Some(JsonValue::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|m| m.as_str().map(str::to_string))
                .collect();
            if !messages.is_empty() {
                return messages;
            }
        }
        _ => {}
    }
    if let Some(JsonValue::Array(errors)) = body.get("errors") {
        let messages: Vec<String> = errors
            .iter()
            .filter_map(|e| e.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .collect();
        if !messages.is_empty() {
            return messages;
        }
    }
    match body.get("error") {
        Some(JsonValue::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Read a nested field from a response envelope, if it's there
pub(crate) fn field<'a>(value: &'a JsonValue, pointer: &str) -> Option<&'a JsonValue> {
    value.pointer(pointer).filter(|v| !v.is_null())
}
