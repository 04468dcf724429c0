//! Notification state for a screen
//!
//! One alert per screen. Showing a new one replaces whatever is open; there
//! is no queue.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How long banners stay up without interaction
pub const AUTO_HIDE: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a close was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// A click outside the banner; never closes it
    Clickaway,
    EscapeKeyDown,
    Timeout,
}

/// Text and severity of a notification, as produced by a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub messages: Vec<String>,
}

impl Alert {
    pub fn new(messages: impl IntoMessages, severity: Severity) -> Self {
        Self {
            severity,
            messages: messages.into_messages(),
        }
    }

    pub fn info(messages: impl IntoMessages) -> Self {
        Self::new(messages, Severity::Info)
    }

    pub fn success(messages: impl IntoMessages) -> Self {
        Self::new(messages, Severity::Success)
    }

    pub fn warning(messages: impl IntoMessages) -> Self {
        Self::new(messages, Severity::Warning)
    }

    pub fn error(messages: impl IntoMessages) -> Self {
        Self::new(messages, Severity::Error)
    }

    pub fn is_success(&self) -> bool {
        self.severity == Severity::Success
    }
}

/// One message or several
pub trait IntoMessages {
    fn into_messages(self) -> Vec<String>;
}

impl IntoMessages for &str {
    fn into_messages(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoMessages for String {
    fn into_messages(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoMessages for Vec<String> {
    fn into_messages(self) -> Vec<String> {
        self
    }
}

impl IntoMessages for &[String] {
    fn into_messages(self) -> Vec<String> {
        self.to_vec()
    }
}

impl IntoMessages for Vec<&str> {
    fn into_messages(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

/// A rendered banner; `index` is its offset in the stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub index: usize,
    pub severity: Severity,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct AlertState {
    open: bool,
    messages: Vec<String>,
    severity: Severity,
    shown_at: Option<Instant>,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn show_alert(&mut self, messages: impl IntoMessages, severity: Severity) {
        self.show_alert_at(messages, severity, Instant::now());
    }

    /// Open with the given text, replacing the current alert
    pub fn show_alert_at(&mut self, messages: impl IntoMessages, severity: Severity, now: Instant) {
        self.messages = messages.into_messages();
        self.severity = severity;
        self.open = true;
        self.shown_at = Some(now);
    }

    pub fn show(&mut self, alert: Alert, now: Instant) {
        self.show_alert_at(alert.messages, alert.severity, now);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn handle_close(&mut self, reason: Option<CloseReason>) {
        if reason == Some(CloseReason::Clickaway) {
            return;
        }
        self.open = false;
    }

    /// Auto-hide once [`AUTO_HIDE`] has passed since the alert was shown.
    /// Returns true if this call closed it.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.shown_at {
            Some(shown) if self.open && now.saturating_duration_since(shown) >= AUTO_HIDE => {
                self.handle_close(Some(CloseReason::Timeout));
                true
            }
            _ => false,
        }
    }

    /// Banners to display, one per message, empty while closed
    pub fn banners(&self) -> Vec<Banner> {
        if !self.open {
            return Vec::new();
        }
        self.messages
            .iter()
            .enumerate()
            .map(|(index, text)| Banner {
                index,
                severity: self.severity,
                text: capitalize_first(text),
            })
            .collect()
    }
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
