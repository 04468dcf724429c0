//! Client-side state
//!
//! The [`Store`] groups four slices. Each slice keeps its data next to a
//! [`RequestState`] tracking the last call it made; the async operations take
//! the API they need as an argument, so a store can be driven against any
//! backend (including the mock one in tests).

pub mod alert;
mod accounts;
mod contact;
pub mod user_admin;
mod user_profile;

use serde::Serialize;

use crate::domain::result::Result;

pub use accounts::AccountsSlice;
pub use alert::{Alert, AlertState, Banner, CloseReason, Severity};
pub use contact::ContactSlice;
pub use user_admin::UserAdminSlice;
pub use user_profile::UserProfileSlice;

/// Lifecycle of one request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AsyncStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

/// Outcome of the last request a slice made
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestState {
    pub status: AsyncStatus,
    pub error: Option<String>,
    pub success: bool,
}

impl RequestState {
    /// Run `call`, recording pending, then fulfilled or rejected
    ///
    /// On rejection the error text is the backend's message, or `fallback`
    /// when the backend gave none.
    pub fn track<T>(&mut self, fallback: &str, call: impl FnOnce() -> Result<T>) -> Result<T> {
        self.status = AsyncStatus::Pending;
        match call() {
            Ok(value) => {
                self.status = AsyncStatus::Fulfilled;
                self.error = None;
                self.success = true;
                Ok(value)
            }
            Err(e) => {
                self.status = AsyncStatus::Rejected;
                self.error = Some(e.user_messages(fallback).join("; "));
                self.success = false;
                Err(e)
            }
        }
    }

    /// Clear one-shot feedback before the next deliberate reload
    pub fn reset_status(&mut self) {
        *self = Self::default();
    }

    pub fn is_pending(&self) -> bool {
        self.status == AsyncStatus::Pending
    }
}

/// All client state, owned by whoever drives the session
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub contact: ContactSlice,
    pub user_profile: UserProfileSlice,
    pub accounts: AccountsSlice,
    pub user_admin: UserAdminSlice,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}
