//! Rule-based query advisor.
//!
//! Grades a query from its shape alone: which fields it filters on, how many
//! fields it selects, whether it is bounded, and whether it uses negative
//! operators. A remote scorer can replace the local verdict; see
//! [`RemoteAnalysis`].

use crate::builder::QuerySpec;
use crate::config::BuilderConfig;
use crate::error::QueryError;
use crate::schema::FieldMetadataIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TIP_INDEXED_FIELDS: &str = "Use indexed fields in WHERE clause for better performance";
pub const TIP_NARROW_FIELDS: &str = "Consider selecting only the fields you need";
pub const TIP_ADD_LIMIT: &str = "Use LIMIT to prevent hitting governor limits";
pub const TIP_NEGATIVE_OPERATORS: &str = "Negative operators can impact performance";
pub const TIP_ANALYSIS_UNAVAILABLE: &str = "Query analysis temporarily unavailable";

/// Score reported when the remote scorer fails
pub const NEUTRAL_SCORE: u8 = 75;

/// Performance grade, best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

impl Grade {
    /// One step worse; Poor stays Poor
    pub fn downgrade(self) -> Self {
        match self {
            Grade::Good => Grade::Fair,
            Grade::Fair | Grade::Poor => Grade::Poor,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Grade::Good => Severity::Success,
            Grade::Fair => Severity::Warning,
            Grade::Poor => Severity::Error,
        }
    }

    /// Numeric score reported for a locally computed grade
    pub fn score(&self) -> u8 {
        match self {
            Grade::Good => 85,
            Grade::Fair => 70,
            Grade::Poor => 45,
        }
    }

    pub fn from_score(score: u8) -> Self {
        match score {
            75.. => Grade::Good,
            60..=74 => Grade::Fair,
            _ => Grade::Poor,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Good => write!(f, "Good"),
            Grade::Fair => write!(f, "Fair"),
            Grade::Poor => write!(f, "Poor"),
        }
    }
}

impl FromStr for Grade {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" | "excellent" => Ok(Grade::Good),
            "fair" => Ok(Grade::Fair),
            "poor" => Ok(Grade::Poor),
            _ => Err(QueryError::AdvisoryUnavailable(format!("unknown grade {}", s))),
        }
    }
}

/// Presentation variant attached to a grade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Band of a numeric score, used to style score gauges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => ScoreBand::Excellent,
            75..=89 => ScoreBand::Good,
            60..=74 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}

/// Advisor verdict for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insights {
    pub score: u8,
    pub grade: Grade,
    pub tips: Vec<String>,
    pub explanation: String,
    pub estimated_rows: Option<String>,
}

impl Insights {
    pub fn severity(&self) -> Severity {
        self.grade.severity()
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }

    /// Neutral verdict used when remote analysis fails
    pub fn unavailable(explanation: String) -> Self {
        Self {
            score: NEUTRAL_SCORE,
            grade: Grade::Good,
            tips: vec![TIP_ANALYSIS_UNAVAILABLE.to_string()],
            explanation,
            estimated_rows: None,
        }
    }
}

/// Response of a remote scoring service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAnalysis {
    pub score: i64,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub estimated_rows: String,
}

impl From<RemoteAnalysis> for Insights {
    fn from(remote: RemoteAnalysis) -> Self {
        let score = remote.score.clamp(0, 100) as u8;
        let grade = remote.grade.parse().unwrap_or_else(|_| Grade::from_score(score));
        let estimated_rows = Some(remote.estimated_rows).filter(|r| !r.is_empty());

        Self {
            score,
            grade,
            tips: remote.tips,
            explanation: remote.explanation,
            estimated_rows,
        }
    }
}

/// Grade `spec` with the local rule set. Rules are independent and their tips accumulate.
pub fn assess(spec: &QuerySpec, index: &FieldMetadataIndex, config: &BuilderConfig) -> Insights {
    let mut grade = Grade::Good;
    let mut tips = Vec::new();

    let filters_on_indexed = spec.conditions.iter().any(|c| {
        !c.value.is_empty()
            && match index.lookup(&c.field) {
                Some(meta) => meta.is_indexed,
                None => config.is_standard_indexed(&c.field),
            }
    });

    if !spec.conditions.is_empty() && !filters_on_indexed {
        tips.push(TIP_INDEXED_FIELDS.to_string());
        grade = grade.downgrade();
    }

    if spec.fields.len() > config.wide_selection_threshold {
        tips.push(TIP_NARROW_FIELDS.to_string());
    }

    let unbounded = match spec.effective_limit() {
        None => true,
        Some(limit) => limit > config.limit_warning_threshold,
    };
    if unbounded {
        tips.push(TIP_ADD_LIMIT.to_string());
        if grade == Grade::Good {
            grade = Grade::Fair;
        }
    }

    if spec.conditions.iter().any(|c| c.operator.is_negative()) {
        tips.push(TIP_NEGATIVE_OPERATORS.to_string());
        grade = Grade::Poor;
    }

    Insights {
        score: grade.score(),
        grade,
        tips,
        explanation: explain(spec),
        estimated_rows: None,
    }
}

/// Plain-language description of what `spec` retrieves. Empty when no entity is selected.
pub fn explain(spec: &QuerySpec) -> String {
    let Some(entity) = spec.entity.as_deref().filter(|e| !e.is_empty()) else {
        return String::new();
    };

    let fields = match spec.fields.as_slice() {
        [] => "the Id field".to_string(),
        [field] => format!("the {} field", field),
        many => format!("{} fields", many.len()),
    };

    let mut explanation = format!("This query retrieves {} from {} records", fields, entity);

    if !spec.conditions.is_empty() {
        explanation.push_str(", with filtering conditions");
    }

    if let Some(order_by) = spec.order_by.as_deref().filter(|f| !f.is_empty()) {
        explanation.push_str(&format!(" sorted by {}", order_by));
    }

    if let Some(limit) = spec.effective_limit() {
        explanation.push_str(&format!(" limited to {} records", limit));
    }

    explanation.push('.');
    explanation
}

/// Round-robin over a list of best practice tips
#[derive(Debug, Clone, Default)]
pub struct BestPracticeRotation {
    tips: Vec<String>,
    index: usize,
}

impl BestPracticeRotation {
    pub fn new(tips: Vec<String>) -> Self {
        Self { tips, index: 0 }
    }

    pub fn current(&self) -> Option<&str> {
        self.tips.get(self.index).map(String::as_str)
    }

    /// Move to the next tip, wrapping at the end
    pub fn advance(&mut self) -> Option<&str> {
        if self.tips.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.tips.len();
        self.current()
    }

    /// Replace the tip list and restart from the first tip
    pub fn replace(&mut self, tips: Vec<String>) {
        self.tips = tips;
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }
}
