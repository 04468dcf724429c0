//! Output formatting utilities

use std::time::{Duration, Instant};

use anyhow::Result;
use bankportal_core::state::{Alert, AlertState, Severity};
use bankportal_core::workflows::Outcome;
use bankportal_core::OperationResult;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an alert as one line per banner
pub fn alert(alert: &Alert) {
    let mut state = AlertState::new();
    state.show(alert.clone(), Instant::now());
    for banner in state.banners() {
        match banner.severity {
            Severity::Success => success(&banner.text),
            Severity::Error => error(&banner.text),
            Severity::Warning => warning(&banner.text),
            Severity::Info => info(&banner.text),
        }
    }
}

/// Report a workflow outcome and turn a failure into a non-zero exit
pub fn outcome<T: Serialize>(outcome: Outcome<T>, json: bool) -> Result<Option<T>> {
    let succeeded = outcome.is_success();
    if json {
        let result = if succeeded {
            OperationResult::ok(&outcome.value)
        } else {
            OperationResult::fail(outcome.alert.messages.join("; "))
        };
        print_json(&result.with_context("severity", serde_json::json!(outcome.alert.severity)))?;
    } else {
        alert(&outcome.alert);
    }
    if !succeeded {
        anyhow::bail!(Failed);
    }
    Ok(outcome.value)
}

/// Marker error for a failure that has already been reported to the user
#[derive(Debug)]
pub struct Failed;

impl std::fmt::Display for Failed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("operation failed")
    }
}

impl std::error::Error for Failed {}

/// Spinner for calls that take a while (identity scans); hidden in JSON mode
pub fn spinner(msg: &str, json: bool) -> ProgressBar {
    if json || atty::isnt(atty::Stream::Stderr) {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(msg.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
