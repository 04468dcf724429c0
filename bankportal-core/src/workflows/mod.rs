//! Form submission workflows
//!
//! Each workflow is what a screen does when its form is submitted: check the
//! input, make the calls, and describe the result as an [`Alert`]. Input
//! problems are reported before any request goes out.

pub mod accounts;
pub mod auth;
pub mod cards;
pub mod contact;
pub mod funds;
pub mod transfer;
pub mod users;

use serde::Serialize;

use crate::domain::result::Error;
use crate::state::Alert;

/// What a workflow produced: the alert to show and, on success, a value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub alert: Alert,
    pub value: Option<T>,
}

impl<T> Outcome<T> {
    pub fn done(value: T, alert: Alert) -> Self {
        Self {
            alert,
            value: Some(value),
        }
    }

    pub fn rejected(alert: Alert) -> Self {
        Self { alert, value: None }
    }

    /// Failed call: the backend's messages, or `fallback`
    pub fn failed(error: &Error, fallback: &str) -> Self {
        Self::rejected(Alert::error(error.user_messages(fallback)))
    }

    pub fn is_success(&self) -> bool {
        self.value.is_some() && self.alert.is_success()
    }
}
