use crate::error::Result;
use crate::format::{FormatMode, ValueFormatter};
use serde::{Deserialize, Serialize};

/// Configuration for a query session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// LIMIT applied to a fresh session
    pub default_limit: Option<u32>,
    /// LIMIT above which the advisor recommends lowering it
    pub limit_warning_threshold: u32,
    /// Selected-field count above which the advisor recommends narrowing
    pub wide_selection_threshold: usize,
    /// Fields treated as indexed when metadata does not say
    pub indexed_fields: Vec<String>,
    pub format_mode: FormatMode,
    /// Escape quotes inside text literals
    pub escape_quotes: bool,
    /// Tips shown in rotation
    pub best_practices: Vec<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            default_limit: Some(10),
            limit_warning_threshold: 10_000,
            wide_selection_threshold: 10,
            indexed_fields: ["Id", "Name", "OwnerId", "CreatedDate", "LastModifiedDate", "SystemModStamp"]
                .into_iter()
                .map(String::from)
                .collect(),
            format_mode: FormatMode::MetadataAware,
            escape_quotes: false,
            best_practices: [
                "Use indexed fields in WHERE clauses for better performance",
                "Limit the number of fields returned to only what you need",
                "Use LIMIT clause to prevent hitting governor limits",
                "Avoid SOQL queries inside loops",
                "Use selective filters to reduce result set size",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl BuilderConfig {
    /// Parse a JSON document; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::new(self.format_mode).with_escaping(self.escape_quotes)
    }

    pub fn is_standard_indexed(&self, field: &str) -> bool {
        self.indexed_fields.iter().any(|f| f == field)
    }
}
