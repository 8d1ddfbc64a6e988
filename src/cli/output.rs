//! Output formatting for the CLI.

use clap::ValueEnum;
use serde::Serialize;

use crate::error::ClientError;

/// How command results are printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON for scripting.
    Json,
}

impl OutputFormat {
    /// Prints `value` as JSON. Text output is handled by each command.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn print_value<T: Serialize>(self, value: &T) -> anyhow::Result<()> {
        if self == Self::Json {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }

    /// Returns `true` for [`OutputFormat::Text`].
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Turns a [`ClientError`] into the alert text a user should see.
///
/// `fallback` is the generic per-action message used for transport
/// failures and for server errors without a message.
pub fn alert(fallback: &'static str) -> impl FnOnce(ClientError) -> anyhow::Error {
    alert_with(fallback, fallback)
}

/// Like [`alert`], with `rejected` shown when the backend refuses the
/// request without saying why.
pub fn alert_with(
    transport: &'static str,
    rejected: &'static str,
) -> impl FnOnce(ClientError) -> anyhow::Error {
    move |err| {
        tracing::debug!(error = %err, kind = err.kind(), "command failed");
        anyhow::anyhow!(err.alert_text(transport, rejected))
    }
}

/// Prints a `label: value` line.
pub fn print_field(label: &str, value: &str) {
    println!("{:<14} {}", format!("{label}:"), value);
}

/// Prints a table header.
pub fn print_table_header(columns: &[(&str, usize)]) {
    let header = columns
        .iter()
        .map(|(name, width)| format!("{name:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header.trim_end());
}

/// Prints a table row, truncating cells to their column width.
pub fn print_table_row(values: &[(&str, usize)]) {
    let row = values
        .iter()
        .map(|(value, width)| format!("{:<width$}", truncate(value, *width)))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", row.trim_end());
}

/// Cuts `value` to at most `width` characters, marking the cut with `...`.
fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut cut: String = value.chars().take(keep).collect();
    cut.push_str("...");
    cut
}
