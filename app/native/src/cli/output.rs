//! CLI output formatting.

use std::time::SystemTime;

use chrono::{DateTime, Local};
use colored::Colorize;
use serde_json::Value;

const INDENT: &str = "  ";

/// Prints JSON with syntax highlighting.
///
/// Keys are cyan, strings green, numbers yellow, booleans and null magenta.
pub fn print_highlighted_json(value: &Value) {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    println!("{out}");
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str(&"null".magenta().to_string()),
        Value::Bool(b) => out.push_str(&b.to_string().magenta().to_string()),
        Value::Number(n) => out.push_str(&n.to_string().yellow().to_string()),
        Value::String(s) => out.push_str(&quoted(s).green().to_string()),
        Value::Array(items) => {
            write_container(out, depth, ('[', ']'), items.len(), |out, i| {
                write_value(out, &items[i], depth + 1);
            });
        }
        Value::Object(map) => {
            let entries: Vec<(&String, &Value)> = map.iter().collect();
            write_container(out, depth, ('{', '}'), entries.len(), |out, i| {
                let (key, value) = entries[i];
                out.push_str(&quoted(key).cyan().to_string());
                out.push_str(": ");
                write_value(out, value, depth + 1);
            });
        }
    }
}

fn write_container(
    out: &mut String,
    depth: usize,
    (open, close): (char, char),
    len: usize,
    mut write_item: impl FnMut(&mut String, usize),
) {
    out.push_str(&open.to_string().bold().to_string());
    if len == 0 {
        out.push_str(&close.to_string().bold().to_string());
        return;
    }

    for i in 0..len {
        out.push('\n');
        out.push_str(&INDENT.repeat(depth + 1));
        write_item(out, i);
        if i + 1 < len {
            out.push(',');
        }
    }

    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
    out.push_str(&close.to_string().bold().to_string());
}

fn quoted(s: &str) -> String { serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\"")) }

/// Truncates to `max_chars` characters, ending with an ellipsis when cut.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 1 {
        return "…".to_string();
    }

    let cut = s.char_indices().nth(max_chars - 1).map_or(s.len(), |(idx, _)| idx);
    format!("{}…", &s[..cut])
}

/// Formats a boolean as a colored check mark.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

/// Human-readable file size.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 { format!("{bytes} B") } else { format!("{size:.1} {}", UNITS[unit]) }
}

/// Local timestamp like `2026-01-31 09:41`.
#[must_use]
pub fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M").to_string()
}
