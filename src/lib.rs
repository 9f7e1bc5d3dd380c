//! dynamic-soql - Type-aware SOQL Query Construction
//!
//! dynamic-soql turns an interactive selection (an entity, the fields to return,
//! a list of filter conditions, ordering and paging) into a query string, and
//! grades the result with a rule-based advisor.
//!
//! # Architecture
//!
//! - **Field Metadata Index**: Per-entity field types, loaded once per entity selection
//! - **Condition List**: Ordered, editable filter conditions with stable ids
//! - **Value Formatter**: Typed literal encoding (dates, numbers, booleans, sets, patterns)
//! - **Query Assembler**: SELECT / FROM / WHERE / ORDER BY / LIMIT / OFFSET composition
//! - **Advisor**: Grade, tips and a plain-language explanation of the query
//!
//! # Example
//!
//! ```rust
//! use dynamic_soql::prelude::*;
//!
//! let mut index = FieldMetadataIndex::new();
//! index.load("Account", vec![FieldMetadata::new("Industry", FieldType::Text)]);
//!
//! let query = QuerySpec::new("Account")
//!     .select(vec!["Name", "Industry"])
//!     .condition(Condition::new("Industry", ComparisonOp::Eq, "Technology"))
//!     .order_by("Name", SortDirection::Asc)
//!     .limit(25)
//!     .build(&index);
//!
//! assert_eq!(
//!     query,
//!     "SELECT Name, Industry FROM Account WHERE Industry = 'Technology' ORDER BY Name ASC LIMIT 25"
//! );
//! ```
//!
//! # Sessions
//!
//! [`QuerySession`] drives the interactive flow against a backend implementing
//! [`MetadataSource`] and [`QueryBackend`]: every edit regenerates the query and
//! its insights, execution is guarded against overlapping runs, and remote
//! analysis results that arrive after a newer edit are dropped.

pub mod advisor;
pub mod backend;
pub mod builder;
pub mod conditions;
pub mod config;
pub mod error;
pub mod format;
pub mod schema;
pub mod session;

pub use advisor::{assess, explain, BestPracticeRotation, Grade, Insights, RemoteAnalysis, ScoreBand, Severity};
pub use backend::{ColumnType, MetadataSource, QueryBackend, QueryResult, QueryRow, QueryScorer, ResultColumn};
pub use builder::{assemble, ComparisonOp, LogicalOp, QuerySpec, SortDirection, DEFAULT_QUERY, MAX_LIMIT};
pub use conditions::{Condition, ConditionList, ConditionUpdate};
pub use config::BuilderConfig;
pub use error::{QueryError, Result};
pub use format::{format_value, FormatMode, ValueFormatter};
pub use schema::{EntityMetadata, FieldMetadata, FieldMetadataIndex, FieldType, InputShape};
pub use session::{QuerySession, Warning};

/// Prelude for common imports
pub mod prelude {
    pub use crate::advisor::{Grade, Insights};
    pub use crate::backend::{MetadataSource, QueryBackend, QueryResult, QueryRow, QueryScorer};
    pub use crate::builder::{ComparisonOp, LogicalOp, QuerySpec, SortDirection};
    pub use crate::conditions::{Condition, ConditionUpdate};
    pub use crate::config::BuilderConfig;
    pub use crate::error::{QueryError, Result};
    pub use crate::schema::{EntityMetadata, FieldMetadata, FieldMetadataIndex, FieldType};
    pub use crate::session::QuerySession;
}
