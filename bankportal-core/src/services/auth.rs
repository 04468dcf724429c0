//! Authentication endpoints

use std::sync::Arc;

use serde_json::{json, Value as JsonValue};

use super::{decode, log_failure};
use crate::adapters::ApiClient;
use crate::domain::result::Result;
use crate::domain::{LoginPayload, PasswordReset, User};

pub struct AuthApi {
    api: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Log in and record the user in the shared auth context
    ///
    /// A 401 here is a wrong password, not an expired session, so the
    /// client does not log out on it.
    pub fn login(&self, payload: &LoginPayload) -> Result<User> {
        let body = self
            .api
            .post("/auth/login", payload)
            .inspect_err(log_failure("logging in"))?;
        let user: User = decode(&body, "/data")?;
        tracing::info!(username = %user.username, role = user.role_name.as_str(), "logged in");
        self.api.auth().set_user(user.clone());
        Ok(user)
    }

    /// Log out on the backend, then forget the local user
    pub fn logout(&self) -> Result<()> {
        let result = self
            .api
            .post_empty("/auth/logout")
            .inspect_err(log_failure("logging out"));
        self.api.auth().clear();
        result.map(|_| ())
    }

    /// Fetch the signed-in user and refresh the auth context with it
    pub fn me(&self) -> Result<User> {
        let body = self
            .api
            .get("/auth/me", &[])
            .inspect_err(log_failure("verifying session"))?;
        let user: User = decode(&body, "/data/user")?;
        self.api.auth().set_user(user.clone());
        Ok(user)
    }

    /// Ask the backend to email a reset link
    pub fn request_password_reset(&self, email: &str) -> Result<JsonValue> {
        self.api
            .post("/auth/request-reset", &json!({ "email": email }))
            .inspect_err(log_failure("requesting password reset"))
    }

    pub fn reset_password(&self, reset: &PasswordReset) -> Result<JsonValue> {
        self.api
            .post("/auth/reset-password", reset)
            .inspect_err(log_failure("resetting password"))
    }
}
