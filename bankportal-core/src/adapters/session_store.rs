//! Session persistence between CLI invocations
//!
//! `session.json` holds the backend's session cookie and the signed-in user.
//! It is written after login and removed on logout or when the backend
//! rejects the session.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::User;

pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    /// Backend the cookies belong to
    pub api_url: String,
    #[serde(default)]
    pub cookies: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(api_url: impl Into<String>, cookies: Option<String>, user: Option<User>) -> Self {
        Self {
            api_url: api_url.into(),
            cookies,
            user,
            saved_at: Utc::now(),
        }
    }
}

/// File-backed store for [`StoredSession`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(portal_dir: &Path) -> Self {
        Self {
            path: portal_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session for `api_url`
    ///
    /// A session saved against a different backend, or a file that no
    /// longer parses, counts as no session.
    pub fn load(&self, api_url: &str) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<StoredSession>(&content) {
            Ok(session) if session.api_url == api_url => Ok(Some(session)),
            Ok(session) => {
                tracing::debug!(saved = %session.api_url, current = api_url, "ignoring session for another backend");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, path = ?self.path, "discarding unreadable session file");
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
