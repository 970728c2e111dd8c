//! CLI output formatting utilities.
//!
//! - JSON syntax highlighting for `--json` output
//! - Cell helpers for the tabled tables

use std::fmt::Write;

use colored::Colorize;
use serde_json::Value;

const INDENT: &str = "  ";

/// Prints JSON with syntax highlighting.
///
/// Colors:
/// - Keys: Cyan
/// - Strings: Green
/// - Numbers: Yellow
/// - Booleans/Null: Magenta
/// - Brackets/Braces: White (bold)
pub fn print_highlighted_json(value: &Value) {
    println!("{}", highlight_json(value));
}

/// Renders `value` as pretty-printed, colorized JSON.
#[must_use]
pub fn highlight_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn quoted(text: &str) -> String { Value::String(text.to_string()).to_string() }

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => {
            let _ = write!(out, "{}", "null".magenta());
        }
        Value::Bool(b) => {
            let _ = write!(out, "{}", b.to_string().magenta());
        }
        Value::Number(n) => {
            let _ = write!(out, "{}", n.to_string().yellow());
        }
        Value::String(s) => {
            let _ = write!(out, "{}", quoted(s).green());
        }
        Value::Array(items) => {
            write_container(out, ('[', ']'), items.len(), depth, |out, index| {
                write_value(out, &items[index], depth + 1);
            });
        }
        Value::Object(map) => {
            let entries: Vec<_> = map.iter().collect();
            write_container(out, ('{', '}'), entries.len(), depth, |out, index| {
                let (key, item) = entries[index];
                let _ = write!(out, "{}{} ", quoted(key).cyan(), ":".white());
                write_value(out, item, depth + 1);
            });
        }
    }
}

fn write_container(
    out: &mut String,
    (open, close): (char, char),
    len: usize,
    depth: usize,
    mut write_item: impl FnMut(&mut String, usize),
) {
    let _ = write!(out, "{}", open.to_string().white().bold());
    if len == 0 {
        let _ = write!(out, "{}", close.to_string().white().bold());
        return;
    }

    for index in 0..len {
        out.push('\n');
        out.push_str(&INDENT.repeat(depth + 1));
        write_item(out, index);
        if index + 1 < len {
            let _ = write!(out, "{}", ",".white());
        }
    }

    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
    let _ = write!(out, "{}", close.to_string().white().bold());
}

/// Truncates a string to a maximum number of characters, adding ellipsis if needed.
///
/// Counts characters rather than bytes, so multi-byte titles are cut on a
/// character boundary.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        "…".to_string()
    } else {
        let truncate_at = s.char_indices().nth(max_chars - 1).map_or(s.len(), |(idx, _)| idx);
        format!("{}…", &s[..truncate_at])
    }
}

/// Formats a boolean as a colored string.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(value: &Value) -> String {
        colored::control::set_override(false);
        highlight_json(value)
    }

    #[test]
    fn test_highlight_matches_pretty_layout() {
        let value = serde_json::json!({
            "enabled": true,
            "controller": { "state": "shown-by-us", "pendingCloseMs": null, "connections": 5 },
            "commands": [],
            "views": ["applications", "windows"]
        });

        assert_eq!(plain(&value), serde_json::to_string_pretty(&value).unwrap());
    }

    #[test]
    fn test_highlight_escapes_strings() {
        let value = serde_json::json!({ "title": "Say \"hi\"" });
        assert_eq!(plain(&value), serde_json::to_string_pretty(&value).unwrap());
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello w…");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_min_length() {
        assert_eq!(truncate("hello", 1), "…");
    }

    #[test]
    fn test_truncate_multibyte_utf8() {
        // "à" is 2 bytes in UTF-8
        let s = "Mise à jour de Steam";
        assert_eq!(truncate(s, 7), "Mise à…");
        assert_eq!(truncate(s, 30), s);
    }

    #[test]
    fn test_format_bool() {
        assert!(format_bool(true).contains('✓'));
        assert!(format_bool(false).contains('✗'));
    }
}
