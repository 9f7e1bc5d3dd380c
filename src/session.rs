use crate::advisor::{assess, explain, BestPracticeRotation, Insights};
use crate::backend::{result_columns, MetadataSource, QueryBackend, QueryResult, QueryScorer, ResultColumn};
use crate::builder::{assemble, QuerySpec, SortDirection, DEFAULT_QUERY, MAX_LIMIT};
use crate::conditions::{Condition, ConditionList, ConditionUpdate};
use crate::config::BuilderConfig;
use crate::error::{QueryError, Result};
use crate::schema::FieldMetadataIndex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Non-fatal notice raised by an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The requested LIMIT exceeded the maximum and was lowered
    LimitClamped { requested: u64, applied: u32 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::LimitClamped { applied, .. } => {
                write!(f, "LIMIT cannot exceed {} records", applied)
            }
        }
    }
}

/// Mutable builder state. Every mutation is followed by `recompute` under the same lock.
#[derive(Debug)]
struct SessionState {
    entity: Option<String>,
    fields: Vec<String>,
    conditions: ConditionList,
    order_by: Option<String>,
    direction: SortDirection,
    limit: Option<u32>,
    offset: u32,
    index: FieldMetadataIndex,
    description: Option<String>,
    metadata_pending: bool,
    entity_generation: u64,
    edit_counter: u64,
    analysis_seq: u64,
    query: String,
    insights: Insights,
    results: QueryResult,
    columns: Vec<ResultColumn>,
    best_practices: BestPracticeRotation,
}

impl SessionState {
    fn new(config: &BuilderConfig) -> Self {
        let mut state = Self {
            entity: None,
            fields: Vec::new(),
            conditions: ConditionList::new(),
            order_by: None,
            direction: SortDirection::Asc,
            limit: config.default_limit.map(|l| l.min(MAX_LIMIT)),
            offset: 0,
            index: FieldMetadataIndex::new(),
            description: None,
            metadata_pending: false,
            entity_generation: 0,
            edit_counter: 0,
            analysis_seq: 0,
            query: DEFAULT_QUERY.to_string(),
            insights: Insights::unavailable(String::new()),
            results: QueryResult::default(),
            columns: Vec::new(),
            best_practices: BestPracticeRotation::new(config.best_practices.clone()),
        };
        state.recompute(config);
        state
    }

    fn spec(&self) -> QuerySpec {
        QuerySpec {
            entity: self.entity.clone(),
            fields: self.fields.clone(),
            conditions: self.conditions.as_slice().to_vec(),
            order_by: self.order_by.clone(),
            direction: self.direction,
            limit: self.limit,
            offset: self.offset,
        }
    }

    fn recompute(&mut self, config: &BuilderConfig) {
        let spec = self.spec();
        self.query = assemble(&spec, &self.index, &config.formatter());
        self.insights = assess(&spec, &self.index, config);
        self.edit_counter += 1;

        debug!(query = %self.query, edit = self.edit_counter, "query regenerated");
    }

    fn clear_selection(&mut self) {
        self.fields.clear();
        self.conditions.clear();
        self.order_by = None;
        self.results = QueryResult::default();
        self.columns.clear();
        self.index.clear();
        self.description = None;
    }
}

/// Clears the in-flight flag when execution finishes
struct ExecutionGuard<'a>(&'a AtomicBool);

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Interactive query-building session.
///
/// Owns the selected entity, its field metadata, the condition list and the
/// paging options, and regenerates the query and its insights after every edit.
pub struct QuerySession<B: MetadataSource + QueryBackend> {
    backend: Arc<B>,
    scorer: Option<Arc<dyn QueryScorer>>,
    config: BuilderConfig,
    state: Arc<RwLock<SessionState>>,
    executing: AtomicBool,
}

impl<B: MetadataSource + QueryBackend> QuerySession<B> {
    /// Create a new session with the default configuration
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, BuilderConfig::default())
    }

    /// Create a new session with custom config
    pub fn with_config(backend: B, config: BuilderConfig) -> Self {
        let state = SessionState::new(&config);
        Self {
            backend: Arc::new(backend),
            scorer: None,
            config,
            state: Arc::new(RwLock::new(state)),
            executing: AtomicBool::new(false),
        }
    }

    /// Use a remote scorer for [`QuerySession::refresh_insights`]
    pub fn with_scorer(mut self, scorer: Arc<dyn QueryScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Select the target entity and load its field metadata.
    ///
    /// Fields, conditions, ordering and results are cleared first. On fetch failure the
    /// session stays usable with untyped formatting and `MetadataUnavailable` is returned.
    /// `None` resets the session to the default query.
    pub async fn select_entity(&self, entity: Option<&str>) -> Result<()> {
        let entity = entity.map(str::trim).filter(|e| !e.is_empty()).map(String::from);

        let generation = {
            let mut state = self.state.write().await;
            state.clear_selection();
            state.entity = entity.clone();
            state.metadata_pending = entity.is_some();
            state.entity_generation += 1;
            state.recompute(&self.config);
            state.entity_generation
        };

        let Some(entity) = entity else {
            info!("entity cleared, session reset");
            return Ok(());
        };

        info!(entity = %entity, "loading field metadata");
        let fetched = self.backend.fetch_field_metadata(&entity).await;

        let mut state = self.state.write().await;
        if state.entity_generation != generation {
            debug!(entity = %entity, "discarding metadata for superseded entity selection");
            return Ok(());
        }
        state.metadata_pending = false;

        match fetched {
            Ok(metadata) => {
                info!(entity = %entity, fields = metadata.fields.len(), "field metadata loaded");
                let state = &mut *state;
                state.index.load(entity, metadata.fields);
                state.description = metadata.description;
                state.conditions.refresh_inputs(&state.index);
                state.recompute(&self.config);
                Ok(())
            }
            Err(e) => {
                warn!(entity = %entity, error = %e, "field metadata unavailable, using untyped formatting");
                state.recompute(&self.config);
                Err(match e {
                    QueryError::MetadataUnavailable(message) => QueryError::MetadataUnavailable(message),
                    other => QueryError::MetadataUnavailable(other.to_string()),
                })
            }
        }
    }

    /// Check or uncheck a field in the SELECT list
    pub async fn toggle_field(&self, field: &str, checked: bool) {
        let mut state = self.state.write().await;
        if checked {
            if !state.fields.iter().any(|f| f == field) {
                state.fields.push(field.to_string());
            }
        } else {
            state.fields.retain(|f| f != field);
        }
        state.recompute(&self.config);
    }

    /// Select every field of the entity in metadata order
    pub async fn select_all_fields(&self) {
        let mut state = self.state.write().await;
        state.fields = state.index.field_names().to_vec();
        state.recompute(&self.config);
    }

    pub async fn clear_fields(&self) {
        let mut state = self.state.write().await;
        state.fields.clear();
        state.recompute(&self.config);
    }

    /// Append a blank condition and return its id
    pub async fn add_condition(&self) -> u64 {
        let mut state = self.state.write().await;
        let id = state.conditions.append();
        state.recompute(&self.config);
        id
    }

    pub async fn remove_condition(&self, position: usize) -> Result<Condition> {
        let mut state = self.state.write().await;
        let removed = state.conditions.remove_at(position)?;
        state.recompute(&self.config);
        Ok(removed)
    }

    pub async fn update_condition(&self, position: usize, change: ConditionUpdate) -> Result<()> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        state.conditions.update(position, change, &state.index)?;
        state.recompute(&self.config);
        Ok(())
    }

    pub async fn set_order_by(&self, field: Option<&str>) {
        let mut state = self.state.write().await;
        state.order_by = field.filter(|f| !f.is_empty()).map(String::from);
        state.recompute(&self.config);
    }

    pub async fn set_sort_direction(&self, direction: SortDirection) {
        let mut state = self.state.write().await;
        state.direction = direction;
        state.recompute(&self.config);
    }

    /// Set LIMIT; `None` or zero removes it. Values above the maximum are clamped.
    pub async fn set_limit(&self, limit: Option<u64>) -> Option<Warning> {
        let mut warning = None;
        let applied = limit.map(|requested| match u32::try_from(requested) {
            Ok(l) if l <= MAX_LIMIT => l,
            _ => {
                warn!(requested, max = MAX_LIMIT, "LIMIT clamped");
                warning = Some(Warning::LimitClamped {
                    requested,
                    applied: MAX_LIMIT,
                });
                MAX_LIMIT
            }
        });

        let mut state = self.state.write().await;
        state.limit = applied.filter(|l| *l > 0);
        state.recompute(&self.config);
        warning
    }

    pub async fn set_offset(&self, offset: u32) {
        let mut state = self.state.write().await;
        state.offset = offset;
        state.recompute(&self.config);
    }

    /// Execute the current query.
    ///
    /// Rejected with `Busy` while another execution is outstanding.
    pub async fn execute(&self) -> Result<QueryResult> {
        let query = {
            let state = self.state.read().await;
            if state.entity.is_none() {
                return Err(QueryError::InvalidQuery("Please build a valid query first".to_string()));
            }
            state.query.clone()
        };

        if self
            .executing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(QueryError::Busy);
        }
        let _guard = ExecutionGuard(&self.executing);

        match self.backend.execute_query(&query).await {
            Ok(result) => {
                let mut state = self.state.write().await;
                let columns = result
                    .rows
                    .first()
                    .map(|row| result_columns(row, &state.index))
                    .unwrap_or_default();
                state.columns = columns;
                state.results = result.clone();

                info!(rows = result.rows.len(), total_count = result.total_count, "query executed");
                Ok(result)
            }
            Err(e) => {
                warn!(query = %query, error = %e, "query execution failed");
                Err(match e {
                    QueryError::QueryExecution(message) => QueryError::QueryExecution(message),
                    other => QueryError::QueryExecution(other.to_string()),
                })
            }
        }
    }

    pub fn is_executing(&self) -> bool {
        self.executing.load(Ordering::SeqCst)
    }

    /// Re-score the current query with the remote scorer.
    ///
    /// Returns the applied insights, or `None` when the result was discarded
    /// because an edit or a later refresh happened while the scorer was running.
    /// Scorer failures yield a neutral verdict. Without a scorer the local
    /// insights are returned.
    pub async fn refresh_insights(&self) -> Option<Insights> {
        let Some(scorer) = &self.scorer else {
            return Some(self.insights().await);
        };

        let (ticket, seq, query, explanation) = {
            let mut state = self.state.write().await;
            state.analysis_seq += 1;
            (state.edit_counter, state.analysis_seq, state.query.clone(), explain(&state.spec()))
        };

        let insights = match scorer.score_query(&query).await {
            Ok(remote) => Insights::from(remote),
            Err(e) => {
                warn!(error = %e, "query analysis unavailable, using neutral score");
                Insights::unavailable(explanation)
            }
        };

        let mut state = self.state.write().await;
        if state.edit_counter != ticket || state.analysis_seq != seq {
            debug!(
                ticket,
                current = state.edit_counter,
                seq,
                latest = state.analysis_seq,
                "discarding stale query analysis"
            );
            return None;
        }
        state.insights = insights.clone();
        Some(insights)
    }

    /// Replace the best practice tips with the scorer's list, if it has one
    pub async fn load_best_practices(&self) {
        let Some(scorer) = &self.scorer else {
            return;
        };

        match scorer.best_practices().await {
            Ok(tips) if !tips.is_empty() => {
                let mut state = self.state.write().await;
                state.best_practices.replace(tips);
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "failed to load best practices"),
        }
    }

    pub async fn best_practice_tip(&self) -> Option<String> {
        let state = self.state.read().await;
        state.best_practices.current().map(String::from)
    }

    /// Advance the tip rotation and return the new tip
    pub async fn next_best_practice(&self) -> Option<String> {
        let mut state = self.state.write().await;
        state.best_practices.advance().map(String::from)
    }

    pub async fn query(&self) -> String {
        self.state.read().await.query.clone()
    }

    pub async fn insights(&self) -> Insights {
        self.state.read().await.insights.clone()
    }

    pub async fn spec(&self) -> QuerySpec {
        self.state.read().await.spec()
    }

    pub async fn entity(&self) -> Option<String> {
        self.state.read().await.entity.clone()
    }

    pub async fn selected_fields(&self) -> Vec<String> {
        self.state.read().await.fields.clone()
    }

    pub async fn conditions(&self) -> Vec<Condition> {
        self.state.read().await.conditions.as_slice().to_vec()
    }

    /// Field names available for the selected entity
    pub async fn available_fields(&self) -> Vec<String> {
        self.state.read().await.index.field_names().to_vec()
    }

    /// Description of the selected entity, when the metadata source supplied one
    pub async fn entity_description(&self) -> Option<String> {
        self.state.read().await.description.clone()
    }

    pub async fn is_metadata_pending(&self) -> bool {
        self.state.read().await.metadata_pending
    }

    pub async fn results(&self) -> QueryResult {
        self.state.read().await.results.clone()
    }

    pub async fn result_columns(&self) -> Vec<ResultColumn> {
        self.state.read().await.columns.clone()
    }

    /// Logical edit counter, bumped on every recompute
    pub async fn edit_counter(&self) -> u64 {
        self.state.read().await.edit_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{Grade, RemoteAnalysis, TIP_ANALYSIS_UNAVAILABLE};
    use crate::backend::QueryRow;
    use crate::builder::{ComparisonOp, LogicalOp};
    use crate::schema::{EntityMetadata, FieldMetadata, FieldType};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct MockBackend {
        fail_metadata: bool,
        fail_query: bool,
        executed: Mutex<Vec<String>>,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                fail_metadata: false,
                fail_query: false,
                executed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MetadataSource for MockBackend {
        async fn fetch_field_metadata(&self, entity: &str) -> Result<EntityMetadata> {
            if self.fail_metadata {
                return Err(QueryError::MetadataUnavailable(format!("no access to {}", entity)));
            }
            let fields = vec![
                FieldMetadata::new("Id", FieldType::Text).indexed(),
                FieldMetadata::new("Name", FieldType::Text).indexed(),
                FieldMetadata::new("Industry", FieldType::Picklist)
                    .with_picklist_values(vec!["Technology", "Banking"]),
                FieldMetadata::new("NumberOfEmployees", FieldType::Number),
                FieldMetadata::new("CreatedDate", FieldType::DateTime).indexed(),
            ];
            Ok(EntityMetadata::from(fields).with_description(format!("{} records", entity)))
        }
    }

    #[async_trait]
    impl QueryBackend for MockBackend {
        async fn execute_query(&self, query: &str) -> Result<QueryResult> {
            self.executed.lock().unwrap().push(query.to_string());
            if self.fail_query {
                return Err(QueryError::QueryExecution("unexpected token: FROM".to_string()));
            }
            let row: QueryRow = vec![("Name", json!("Acme")), ("NumberOfEmployees", json!(10))]
                .into_iter()
                .collect();
            Ok(QueryResult {
                rows: vec![row],
                total_count: 42,
            })
        }
    }

    struct FailingScorer;

    #[async_trait]
    impl QueryScorer for FailingScorer {
        async fn score_query(&self, _query: &str) -> Result<RemoteAnalysis> {
            Err(QueryError::AdvisoryUnavailable("timeout".to_string()))
        }
    }

    struct FixedScorer;

    #[async_trait]
    impl QueryScorer for FixedScorer {
        async fn score_query(&self, _query: &str) -> Result<RemoteAnalysis> {
            Ok(RemoteAnalysis {
                score: 92,
                grade: "Good".to_string(),
                tips: vec!["Looks selective".to_string()],
                explanation: "remote".to_string(),
                estimated_rows: "< 100".to_string(),
            })
        }

        async fn best_practices(&self) -> Result<Vec<String>> {
            Ok(vec!["one".to_string(), "two".to_string()])
        }
    }

    #[tokio::test]
    async fn test_fresh_session_uses_default_query() {
        let session = QuerySession::new(MockBackend::new());
        assert_eq!(session.query().await, DEFAULT_QUERY);
        assert_eq!(session.insights().await.explanation, "");
    }

    #[tokio::test]
    async fn test_select_entity_loads_metadata() {
        let session = QuerySession::new(MockBackend::new());
        session.select_entity(Some("Account")).await.unwrap();

        assert!(!session.is_metadata_pending().await);
        assert_eq!(session.available_fields().await.len(), 5);
        assert_eq!(session.entity_description().await.as_deref(), Some("Account records"));
        assert_eq!(session.query().await, "SELECT Id FROM Account LIMIT 10");
    }

    #[tokio::test]
    async fn test_metadata_failure_degrades_to_untyped() {
        let mut backend = MockBackend::new();
        backend.fail_metadata = true;
        let session = QuerySession::new(backend);

        let err = session.select_entity(Some("Account")).await.unwrap_err();
        assert!(matches!(err, QueryError::MetadataUnavailable(_)));
        assert!(!session.is_metadata_pending().await);

        session.add_condition().await;
        session.update_condition(0, ConditionUpdate::Field("Name".into())).await.unwrap();
        session.update_condition(0, ConditionUpdate::Value("123".into())).await.unwrap();
        assert_eq!(session.query().await, "SELECT Id FROM Account WHERE Name = 123 LIMIT 10");
    }

    #[tokio::test]
    async fn test_entity_change_clears_state() {
        let session = QuerySession::new(MockBackend::new());
        session.select_entity(Some("Account")).await.unwrap();
        session.toggle_field("Name", true).await;
        session.add_condition().await;
        session.set_order_by(Some("Name")).await;

        session.select_entity(Some("Contact")).await.unwrap();
        assert!(session.selected_fields().await.is_empty());
        assert!(session.conditions().await.is_empty());
        assert_eq!(session.spec().await.order_by, None);
        assert_eq!(session.entity_description().await.as_deref(), Some("Contact records"));

        session.select_entity(None).await.unwrap();
        assert_eq!(session.query().await, DEFAULT_QUERY);
        assert_eq!(session.entity_description().await, None);
        assert!(session.available_fields().await.is_empty());
    }

    #[tokio::test]
    async fn test_field_selection_order_and_dedup() {
        let session = QuerySession::new(MockBackend::new());
        session.select_entity(Some("Account")).await.unwrap();

        session.toggle_field("Industry", true).await;
        session.toggle_field("Name", true).await;
        session.toggle_field("Industry", true).await;
        assert_eq!(session.query().await, "SELECT Industry, Name FROM Account LIMIT 10");

        session.toggle_field("Industry", false).await;
        assert_eq!(session.selected_fields().await, vec!["Name"]);

        session.select_all_fields().await;
        assert_eq!(
            session.query().await,
            "SELECT Id, Name, Industry, NumberOfEmployees, CreatedDate FROM Account LIMIT 10"
        );

        session.clear_fields().await;
        assert_eq!(session.query().await, "SELECT Id FROM Account LIMIT 10");
    }

    #[tokio::test]
    async fn test_condition_editing_regenerates_query() {
        let session = QuerySession::new(MockBackend::new());
        session.select_entity(Some("Account")).await.unwrap();

        session.add_condition().await;
        session.update_condition(0, ConditionUpdate::Field("NumberOfEmployees".into())).await.unwrap();
        session.update_condition(0, ConditionUpdate::Operator(ComparisonOp::Gt)).await.unwrap();
        session.update_condition(0, ConditionUpdate::Value("50".into())).await.unwrap();

        session.add_condition().await;
        session.update_condition(1, ConditionUpdate::Field("CreatedDate".into())).await.unwrap();
        session.update_condition(1, ConditionUpdate::Operator(ComparisonOp::Ge)).await.unwrap();
        session.update_condition(1, ConditionUpdate::Value("2024-01-01T08:15".into())).await.unwrap();
        session.update_condition(1, ConditionUpdate::Connector(LogicalOp::Or)).await.unwrap();

        assert_eq!(
            session.query().await,
            "SELECT Id FROM Account WHERE NumberOfEmployees > 50 OR CreatedDate >= 2024-01-01 08:15:00 LIMIT 10"
        );

        session.remove_condition(0).await.unwrap();
        let conditions = session.conditions().await;
        assert!(conditions[0].is_first);
        assert_eq!(
            session.query().await,
            "SELECT Id FROM Account WHERE CreatedDate >= 2024-01-01 08:15:00 LIMIT 10"
        );
    }

    #[tokio::test]
    async fn test_limit_clamp_warns() {
        let session = QuerySession::new(MockBackend::new());
        session.select_entity(Some("Account")).await.unwrap();

        let warning = session.set_limit(Some(60_000)).await;
        assert_eq!(
            warning,
            Some(Warning::LimitClamped {
                requested: 60_000,
                applied: 50_000
            })
        );
        assert_eq!(warning.unwrap().to_string(), "LIMIT cannot exceed 50000 records");
        assert_eq!(session.query().await, "SELECT Id FROM Account LIMIT 50000");

        assert_eq!(session.set_limit(None).await, None);
        session.set_offset(30).await;
        assert_eq!(session.query().await, "SELECT Id FROM Account OFFSET 30");
    }

    #[tokio::test]
    async fn test_execute_requires_entity() {
        let session = QuerySession::new(MockBackend::new());
        assert!(matches!(session.execute().await, Err(QueryError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_execute_stores_results_and_columns() {
        let session = QuerySession::new(MockBackend::new());
        session.select_entity(Some("Account")).await.unwrap();

        let result = session.execute().await.unwrap();
        assert_eq!(result.total_count, 42);
        assert!(!session.is_executing());

        let columns = session.result_columns().await;
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[1].field_name, "NumberOfEmployees");
        assert_eq!(session.results().await.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_failure_surfaces_message() {
        let mut backend = MockBackend::new();
        backend.fail_query = true;
        let session = QuerySession::new(backend);
        session.select_entity(Some("Account")).await.unwrap();

        match session.execute().await {
            Err(QueryError::QueryExecution(message)) => assert_eq!(message, "unexpected token: FROM"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!session.is_executing());
    }

    #[tokio::test]
    async fn test_scorer_failure_falls_back_to_neutral() {
        let session = QuerySession::new(MockBackend::new()).with_scorer(Arc::new(FailingScorer));
        session.select_entity(Some("Account")).await.unwrap();

        let insights = session.refresh_insights().await.unwrap();
        assert_eq!(insights.score, 75);
        assert_eq!(insights.grade, Grade::Good);
        assert_eq!(insights.tips, vec![TIP_ANALYSIS_UNAVAILABLE]);
        assert_eq!(session.insights().await, insights);
    }

    #[tokio::test]
    async fn test_remote_scorer_replaces_local() {
        let session = QuerySession::new(MockBackend::new()).with_scorer(Arc::new(FixedScorer));
        session.select_entity(Some("Account")).await.unwrap();

        let insights = session.refresh_insights().await.unwrap();
        assert_eq!(insights.score, 92);
        assert_eq!(insights.explanation, "remote");
        assert_eq!(insights.estimated_rows.as_deref(), Some("< 100"));
    }

    #[tokio::test]
    async fn test_best_practice_rotation() {
        let session = QuerySession::new(MockBackend::new());
        let first = session.best_practice_tip().await.unwrap();
        assert!(first.starts_with("Use indexed fields"));
        for _ in 0..5 {
            session.next_best_practice().await;
        }
        assert_eq!(session.best_practice_tip().await.unwrap(), first);

        let remote = QuerySession::new(MockBackend::new()).with_scorer(Arc::new(FixedScorer));
        remote.load_best_practices().await;
        assert_eq!(remote.best_practice_tip().await.as_deref(), Some("one"));
        assert_eq!(remote.next_best_practice().await.as_deref(), Some("two"));
    }
}
