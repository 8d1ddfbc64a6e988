//! Presentation-only derivations shared by the views.
//!
//! Capacity is exchanged between views as a `"filled/total"` string
//! (`"8/20"`); the helpers here turn it into the slot label and the
//! progress-bar width. Nothing in this module touches shared state.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Builds the `"filled/total"` string for an event.
#[must_use]
pub fn people_string(filled: usize, capacity: i64) -> String {
    format!("{filled}/{capacity}")
}

/// Splits `"filled/total"` into its two integers.
///
/// Only the first two `/`-separated parts are considered, each trimmed.
fn parse_people(people: &str) -> Option<(i64, i64)> {
    if !people.contains('/') {
        return None;
    }
    let mut parts = people.split('/');
    let filled = parts.next()?.trim().parse().ok()?;
    let total = parts.next()?.trim().parse().ok()?;
    Some((filled, total))
}

/// Renders the remaining-slots label for a `"filled/total"` string.
///
/// * `"8/20"` → `"• 12 slots left"`
/// * `"19/20"` → `"• 1 slot left"`
/// * `"20/20"` → `"• Full"`
/// * over capacity (`"21/20"`), unparsable, or no `/` → `""`
#[must_use]
pub fn calculate_slots(people: &str) -> String {
    let Some((filled, total)) = parse_people(people) else {
        return String::new();
    };
    let Some(remaining) = total.checked_sub(filled) else {
        return String::new();
    };

    match remaining {
        1 => "• 1 slot left".to_string(),
        n if n > 1 => format!("• {n} slots left"),
        0 => "• Full".to_string(),
        // Over capacity: no label.
        _ => String::new(),
    }
}

/// Progress-bar fill for a `"filled/total"` string, in percent.
///
/// Returns `0.0` when the string is unparsable or the total is zero.
/// Over-capacity strings yield values above 100.
#[must_use]
pub fn fill_percentage(people: &str) -> f64 {
    let Some((filled, total)) = parse_people(people) else {
        return 0.0;
    };
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = filled as f64 / total as f64 * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

/// Renders `"HH:MM - HH:MM"` in the local time zone.
#[must_use]
pub fn format_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format_time_range_in(start, end, &Local)
}

/// Renders `"HH:MM - HH:MM"` in `tz`.
#[must_use]
pub fn format_time_range_in<Tz: TimeZone>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    tz: &Tz,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} - {}",
        start.with_timezone(tz).format("%H:%M"),
        end.with_timezone(tz).format("%H:%M")
    )
}

/// Renders a fixed-width text progress bar, e.g. `[#####.....]`.
#[must_use]
pub fn progress_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}
