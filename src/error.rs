use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Metadata unavailable: {0}")]
    MetadataUnavailable(String),

    #[error("Query execution failed: {0}")]
    QueryExecution(String),

    #[error("Query analysis unavailable: {0}")]
    AdvisoryUnavailable(String),

    #[error("A query is already executing")]
    Busy,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("No condition at position {0}")]
    InvalidCondition(usize),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
