use crate::conditions::Condition;
use crate::error::QueryError;
use crate::format::ValueFormatter;
use crate::schema::FieldMetadataIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Query emitted while no entity is selected
pub const DEFAULT_QUERY: &str = "SELECT Id FROM Account LIMIT 10";

/// Upper bound for LIMIT
pub const MAX_LIMIT: u32 = 50_000;

/// Comparison operators for WHERE clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "NOT LIKE")]
    NotLike,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
}

impl ComparisonOp {
    pub const ALL: [ComparisonOp; 10] = [
        ComparisonOp::Eq,
        ComparisonOp::Ne,
        ComparisonOp::Lt,
        ComparisonOp::Le,
        ComparisonOp::Gt,
        ComparisonOp::Ge,
        ComparisonOp::Like,
        ComparisonOp::NotLike,
        ComparisonOp::In,
        ComparisonOp::NotIn,
    ];

    /// The operator as written in a query
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Ne => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Like => "LIKE",
            ComparisonOp::NotLike => "NOT LIKE",
            ComparisonOp::In => "IN",
            ComparisonOp::NotIn => "NOT IN",
        }
    }

    /// Human readable label for operator pickers
    pub fn label(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "Equals (=)",
            ComparisonOp::Ne => "Not Equals (!=)",
            ComparisonOp::Lt => "Less Than (<)",
            ComparisonOp::Le => "Less Than or Equal (<=)",
            ComparisonOp::Gt => "Greater Than (>)",
            ComparisonOp::Ge => "Greater Than or Equal (>=)",
            ComparisonOp::Like => "Like",
            ComparisonOp::NotLike => "Not Like",
            ComparisonOp::In => "In",
            ComparisonOp::NotIn => "Not In",
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, ComparisonOp::Like | ComparisonOp::NotLike)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, ComparisonOp::In | ComparisonOp::NotIn)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, ComparisonOp::Ne | ComparisonOp::NotIn | ComparisonOp::NotLike)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_ascii_uppercase();
        ComparisonOp::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| QueryError::UnknownOperator(s.to_string()))
    }
}

/// Logical operators for combining conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

impl FromStr for LogicalOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(LogicalOp::And),
            "OR" => Ok(LogicalOp::Or),
            _ => Err(QueryError::UnknownOperator(s.to_string())),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Snapshot of everything that determines the generated query
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    pub entity: Option<String>,
    pub fields: Vec<String>,
    pub conditions: Vec<Condition>,
    pub order_by: Option<String>,
    pub direction: SortDirection,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl QuerySpec {
    /// Create a spec selecting from `entity`
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            ..Default::default()
        }
    }

    /// Select specific fields
    pub fn select(mut self, fields: Vec<impl Into<String>>) -> Self {
        self.fields = fields.into_iter().map(|f| f.into()).collect();
        self
    }

    /// Add a filter condition
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add ORDER BY
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some(field.into());
        self.direction = direction;
        self
    }

    /// Set LIMIT, clamped to [`MAX_LIMIT`]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.min(MAX_LIMIT));
        self
    }

    /// Set OFFSET
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// LIMIT as emitted: clamped to [`MAX_LIMIT`], with zero meaning none
    pub fn effective_limit(&self) -> Option<u32> {
        self.limit.map(|l| l.min(MAX_LIMIT)).filter(|l| *l > 0)
    }

    /// Conditions that have both a field and a value
    pub fn complete_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter().filter(|c| c.is_complete())
    }

    /// Build the query string with the default formatter
    pub fn build(&self, index: &FieldMetadataIndex) -> String {
        assemble(self, index, &ValueFormatter::default())
    }
}

/// Compose the query string for `spec`.
///
/// Incomplete conditions are skipped; the first surviving condition carries no connector.
pub fn assemble(spec: &QuerySpec, index: &FieldMetadataIndex, formatter: &ValueFormatter) -> String {
    let Some(entity) = spec.entity.as_deref().filter(|e| !e.is_empty()) else {
        return DEFAULT_QUERY.to_string();
    };

    let mut sql = String::from("SELECT ");

    if spec.fields.is_empty() {
        sql.push_str("Id");
    } else {
        sql.push_str(&spec.fields.join(", "));
    }

    sql.push_str(&format!(" FROM {}", entity));

    let where_clause = spec
        .complete_conditions()
        .enumerate()
        .map(|(i, condition)| {
            let value = formatter.format(&condition.value, index.lookup(&condition.field), &condition.operator);
            let clause = format!("{} {} {}", condition.field, condition.operator, value);
            if i > 0 {
                format!(" {} {}", condition.connector, clause)
            } else {
                clause
            }
        })
        .collect::<String>();

    if !where_clause.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_clause);
    }

    if let Some(order_by) = spec.order_by.as_deref().filter(|f| !f.is_empty()) {
        sql.push_str(&format!(" ORDER BY {} {}", order_by, spec.direction));
    }

    if let Some(limit) = spec.effective_limit() {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    if spec.offset > 0 {
        sql.push_str(&format!(" OFFSET {}", spec.offset));
    }

    sql
}
