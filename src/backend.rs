use crate::advisor::RemoteAnalysis;
use crate::error::Result;
use crate::schema::{EntityMetadata, FieldMetadata, FieldMetadataIndex};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Row from a query result. Column order follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRow {
    keys: Vec<String>,
    pub columns: HashMap<String, Value>,
}

impl QueryRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if self.columns.insert(key.clone(), value).is_none() {
            self.keys.push(key);
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.columns
            .get(key)
            .and_then(|v| v.as_str().map(String::from))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for QueryRow {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut row = QueryRow::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

/// Result of executing a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<QueryRow>,
    /// Total matching records, which may exceed `rows.len()` when LIMIT applies
    pub total_count: u64,
}

/// Source of field metadata for an entity
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch the fields and description of `entity`. Transport or auth failures map to `MetadataUnavailable`.
    async fn fetch_field_metadata(&self, entity: &str) -> Result<EntityMetadata>;
}

/// Executes query strings against the backing store
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Run `query`. Rejected queries and backend faults map to `QueryExecution`.
    async fn execute_query(&self, query: &str) -> Result<QueryResult>;
}

/// Remote query analysis
#[async_trait]
pub trait QueryScorer: Send + Sync {
    async fn score_query(&self, query: &str) -> Result<RemoteAnalysis>;

    /// Best practice tips to rotate through; empty keeps the configured list
    async fn best_practices(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl<T: MetadataSource + ?Sized> MetadataSource for Arc<T> {
    async fn fetch_field_metadata(&self, entity: &str) -> Result<EntityMetadata> {
        (**self).fetch_field_metadata(entity).await
    }
}

#[async_trait]
impl<T: QueryBackend + ?Sized> QueryBackend for Arc<T> {
    async fn execute_query(&self, query: &str) -> Result<QueryResult> {
        (**self).execute_query(query).await
    }
}

/// Display type of a result column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Number,
    Boolean,
    Date,
    DateLocal,
    Email,
    Phone,
    Url,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::DateLocal => "date-local",
            ColumnType::Email => "email",
            ColumnType::Phone => "phone",
            ColumnType::Url => "url",
        };
        f.write_str(name)
    }
}

/// Column description for tabular display of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultColumn {
    pub label: String,
    pub field_name: String,
    pub column_type: ColumnType,
}

/// Describe the columns of `row`, typed from metadata when available
pub fn result_columns(row: &QueryRow, index: &FieldMetadataIndex) -> Vec<ResultColumn> {
    row.keys()
        .iter()
        .map(|key| ResultColumn {
            label: key.clone(),
            field_name: key.clone(),
            column_type: column_type(key, row.columns.get(key), index.lookup(key)),
        })
        .collect()
}

fn column_type(name: &str, value: Option<&Value>, metadata: Option<&FieldMetadata>) -> ColumnType {
    use crate::schema::FieldType;

    match metadata.map(|m| m.field_type) {
        Some(FieldType::DateTime) => return ColumnType::Date,
        Some(FieldType::Date) => return ColumnType::DateLocal,
        Some(FieldType::Number) => return ColumnType::Number,
        Some(FieldType::Boolean) => return ColumnType::Boolean,
        _ => {}
    }

    if matches!(value, Some(Value::Number(_))) {
        return ColumnType::Number;
    }

    let name = name.to_lowercase();
    if name.contains("date") {
        ColumnType::Date
    } else if name.contains("email") {
        ColumnType::Email
    } else if name.contains("phone") {
        ColumnType::Phone
    } else if name.contains("url") || name.contains("website") {
        ColumnType::Url
    } else {
        ColumnType::Text
    }
}
