//! Literal formatting for condition values.
//!
//! Turns the raw text a user typed into a literal the query grammar accepts,
//! using the field's type when it is known and a value-shape heuristic when it
//! is not.

use crate::builder::ComparisonOp;
use crate::schema::{FieldMetadata, FieldType};
use serde::{Deserialize, Serialize};

/// Whether field metadata participates in formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatMode {
    #[default]
    MetadataAware,
    /// Ignore metadata and format every value from its shape alone
    Fallback,
}

/// Value formatter configured with a format mode and quoting policy
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueFormatter {
    mode: FormatMode,
    escape_quotes: bool,
}

impl ValueFormatter {
    pub fn new(mode: FormatMode) -> Self {
        Self {
            mode,
            escape_quotes: false,
        }
    }

    /// Escape `\` and `'` inside text literals
    pub fn with_escaping(mut self, escape_quotes: bool) -> Self {
        self.escape_quotes = escape_quotes;
        self
    }

    pub fn mode(&self) -> FormatMode {
        self.mode
    }

    /// Format `raw` as a literal for `op` applied to a field described by `metadata`
    pub fn format(&self, raw: &str, metadata: Option<&FieldMetadata>, op: &ComparisonOp) -> String {
        let metadata = match self.mode {
            FormatMode::MetadataAware => metadata,
            FormatMode::Fallback => None,
        };

        if let Some(meta) = metadata {
            match meta.field_type {
                FieldType::DateTime => return normalize_datetime(raw),
                FieldType::Date => return raw.to_string(),
                _ => {}
            }
        }

        if op.is_pattern() {
            return format!("'%{}%'", self.escape(raw));
        }

        if op.is_set() {
            let values = raw
                .split(',')
                .map(|part| self.quote(part.trim()))
                .collect::<Vec<_>>()
                .join(",");
            return format!("({})", values);
        }

        match metadata.map(|m| m.field_type) {
            Some(FieldType::Number) => raw.to_string(),
            Some(FieldType::Boolean) => {
                if raw.eq_ignore_ascii_case("true") {
                    "true".to_string()
                } else {
                    "false".to_string()
                }
            }
            Some(_) => self.quote(raw),
            None => {
                if is_bare_literal(raw) {
                    raw.to_string()
                } else {
                    self.quote(raw)
                }
            }
        }
    }

    fn quote(&self, value: &str) -> String {
        format!("'{}'", self.escape(value))
    }

    fn escape(&self, value: &str) -> String {
        if self.escape_quotes {
            value.replace('\\', "\\\\").replace('\'', "\\'")
        } else {
            value.to_string()
        }
    }
}

/// Format with the default metadata-aware formatter
pub fn format_value(raw: &str, metadata: Option<&FieldMetadata>, op: &ComparisonOp) -> String {
    ValueFormatter::default().format(raw, metadata, op)
}

/// Convert a local date-time input (`2024-03-01T09:30`) to the literal form
/// `2024-03-01 09:30:00`. Seconds are only added to a bare `HH:MM` time; values
/// without a time part pass through.
pub fn normalize_datetime(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(split) = trimmed.find(['T', ' ']) else {
        return trimmed.to_string();
    };

    let date = &trimmed[..split];
    let time = trimmed[split + 1..].trim();
    if time.is_empty() {
        return date.to_string();
    }

    if is_hour_minute(time) {
        format!("{} {}:00", date, time)
    } else {
        format!("{} {}", date, time)
    }
}

fn is_hour_minute(time: &str) -> bool {
    let bytes = time.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit())
}

/// Numbers and the `true`/`false`/`null` keywords are emitted without quotes
fn is_bare_literal(raw: &str) -> bool {
    if matches!(raw, "true" | "false" | "null") {
        return true;
    }
    let trimmed = raw.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().map(|n| n.is_finite()).unwrap_or(false)
}
