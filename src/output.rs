use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use serde::Serialize;
use serde_json::json;
use tabled::{settings::Style, Table, Tabled};

use crate::banner::{Banner, BannerKind};
use crate::cli::OutputFormat;
use crate::types::parse_date;

/// Global output settings, set once from the command line.
static FORMAT: AtomicU8 = AtomicU8::new(0);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    let raw = match format {
        OutputFormat::Table => 0,
        OutputFormat::Json => 1,
        OutputFormat::Compact => 2,
    };
    FORMAT.store(raw, Ordering::Relaxed);
}

pub fn format() -> OutputFormat {
    match FORMAT.load(Ordering::Relaxed) {
        1 => OutputFormat::Json,
        2 => OutputFormat::Compact,
        _ => OutputFormat::Table,
    }
}

pub fn is_json_output() -> bool {
    matches!(format(), OutputFormat::Json)
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a table or JSON depending on output mode
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if is_json_output() {
        print_json(items);
        return;
    }

    let rows: Vec<R> = items.iter().map(to_row).collect();
    let mut table = Table::new(rows);
    match format() {
        OutputFormat::Compact => table.with(Style::blank()),
        _ => table.with(Style::rounded()),
    };
    println!("{table}");
}

/// Print a single item or JSON depending on output mode
pub fn print_item<T: Serialize>(item: &T, display: impl FnOnce(&T)) {
    if is_json_output() {
        print_json(item);
    } else {
        display(item);
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Print a success message (skipped with --quiet, or printed as a JSON object)
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if is_json_output() {
        print_json(&json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

/// Print a banner if it is still visible. Errors are printed even with --quiet.
pub fn print_banner(banner: &Banner) {
    if !banner.is_visible() || (is_quiet() && banner.kind != BannerKind::Error) {
        return;
    }
    if is_json_output() {
        print_json(&json!({ "level": banner.kind, "message": banner.text }));
    } else if banner.kind == BannerKind::Error {
        eprintln!("{}", banner.render());
    } else {
        println!("{}", banner.render());
    }
}

/// Format a backend date or timestamp as date only
pub fn format_date_only(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.split('T').next().unwrap_or(raw).to_string())
}

/// Long form used on detail views, e.g. "October 21, 2026"
pub fn format_date_long(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Fix the login redirect loop", 10), "Fix the...");
        assert_eq!(truncate("Überprüfung der Logs", 8), "Überp...");
    }

    #[test]
    fn dates_format_from_backend_values() {
        assert_eq!(format_date_only("2026-10-21T08:00:00"), "2026-10-21");
        assert_eq!(format_date_long("2026-10-21"), "October 21, 2026");
        assert_eq!(format_date_only("soon"), "soon");
    }
}
