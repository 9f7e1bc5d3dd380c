use crate::builder::{ComparisonOp, LogicalOp};
use crate::error::{QueryError, Result};
use crate::schema::{FieldMetadataIndex, InputShape};

/// One filter clause of the WHERE predicate
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Condition {
    pub id: u64,
    pub field: String,
    pub operator: ComparisonOp,
    pub value: String,
    /// Connector to the previous condition; ignored for the first one
    pub connector: LogicalOp,
    pub is_first: bool,
    pub input: InputShape,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: ComparisonOp, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_connector(mut self, connector: LogicalOp) -> Self {
        self.connector = connector;
        self
    }

    /// Whether the condition has both a field and a value and so takes part in the query
    pub fn is_complete(&self) -> bool {
        !self.field.is_empty() && !self.value.is_empty()
    }
}

/// A single attribute change applied through [`ConditionList::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionUpdate {
    Field(String),
    Operator(ComparisonOp),
    Value(String),
    Connector(LogicalOp),
}

/// Ordered, editable list of conditions
#[derive(Debug, Clone, Default)]
pub struct ConditionList {
    conditions: Vec<Condition>,
    next_id: u64,
    revision: u64,
}

impl ConditionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank condition and return its id. Ids are never reused.
    pub fn append(&mut self) -> u64 {
        self.next_id += 1;
        let condition = Condition {
            id: self.next_id,
            is_first: self.conditions.is_empty(),
            ..Default::default()
        };
        self.conditions.push(condition);
        self.touch();
        self.next_id
    }

    /// Remove the condition at `position`
    pub fn remove_at(&mut self, position: usize) -> Result<Condition> {
        if position >= self.conditions.len() {
            return Err(QueryError::InvalidCondition(position));
        }

        let removed = self.conditions.remove(position);
        self.touch();
        Ok(removed)
    }

    /// Apply `change` to a copy of the condition at `position` and write it back.
    ///
    /// Changing the field clears the value and re-derives the input shape from `index`.
    pub fn update(&mut self, position: usize, change: ConditionUpdate, index: &FieldMetadataIndex) -> Result<()> {
        let mut updated = self
            .conditions
            .get(position)
            .cloned()
            .ok_or(QueryError::InvalidCondition(position))?;

        match change {
            ConditionUpdate::Field(field) => {
                updated.input = InputShape::for_field(index.lookup(&field));
                updated.field = field;
                updated.value.clear();
            }
            ConditionUpdate::Operator(operator) => updated.operator = operator,
            ConditionUpdate::Value(value) => updated.value = value,
            ConditionUpdate::Connector(connector) => updated.connector = connector,
        }

        self.conditions[position] = updated;
        self.touch();
        Ok(())
    }

    /// Re-derive every condition's input shape from `index`, keeping values
    pub fn refresh_inputs(&mut self, index: &FieldMetadataIndex) {
        let mut changed = false;
        for condition in self.conditions.iter_mut().filter(|c| !c.field.is_empty()) {
            let input = InputShape::for_field(index.lookup(&condition.field));
            if condition.input != input {
                condition.input = input;
                changed = true;
            }
        }
        if changed {
            self.touch();
        }
    }

    pub fn clear(&mut self) {
        if !self.conditions.is_empty() {
            self.conditions.clear();
            self.touch();
        }
    }

    pub fn get(&self, position: usize) -> Option<&Condition> {
        self.conditions.get(position)
    }

    pub fn position_of(&self, id: u64) -> Option<usize> {
        self.conditions.iter().position(|c| c.id == id)
    }

    pub fn as_slice(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Bumped on every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        for (i, condition) in self.conditions.iter_mut().enumerate() {
            condition.is_first = i == 0;
        }
        self.revision += 1;
    }
}
