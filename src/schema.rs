use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type classification of an entity field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Date,
    DateTime,
    Picklist,
}

impl FieldType {
    pub fn is_date(&self) -> bool {
        matches!(self, FieldType::Date | FieldType::DateTime)
    }

    /// Map a describe-style type token (`STRING`, `DOUBLE`, `DATETIME`, ...) to a class.
    /// Unrecognized tokens are treated as text.
    pub fn from_describe(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "DATE" => FieldType::Date,
            "DATETIME" => FieldType::DateTime,
            "DOUBLE" | "INTEGER" | "LONG" | "CURRENCY" | "PERCENT" | "NUMBER" => FieldType::Number,
            "BOOLEAN" => FieldType::Boolean,
            "PICKLIST" | "MULTIPICKLIST" => FieldType::Picklist,
            _ => FieldType::Text,
        }
    }
}

/// Metadata for a single field of the selected entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub picklist_values: Vec<String>,
    #[serde(default)]
    pub is_indexed: bool,
}

impl FieldMetadata {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            field_type,
            picklist_values: Vec::new(),
            is_indexed: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn indexed(mut self) -> Self {
        self.is_indexed = true;
        self
    }

    pub fn with_picklist_values(mut self, values: Vec<impl Into<String>>) -> Self {
        self.picklist_values = values.into_iter().map(|v| v.into()).collect();
        self
    }
}

/// Describe result for an entity: its fields plus an optional description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    #[serde(default)]
    pub description: Option<String>,
    pub fields: Vec<FieldMetadata>,
}

impl EntityMetadata {
    pub fn new(fields: Vec<FieldMetadata>) -> Self {
        Self {
            description: None,
            fields,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<Vec<FieldMetadata>> for EntityMetadata {
    fn from(fields: Vec<FieldMetadata>) -> Self {
        Self::new(fields)
    }
}

/// Shape of the value input a condition should offer for its field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputShape {
    #[default]
    Text,
    Number,
    Boolean,
    Date { with_time: bool },
    Picklist { options: Vec<String> },
}

impl InputShape {
    /// Derive the input shape for a field; unknown fields get free text.
    pub fn for_field(metadata: Option<&FieldMetadata>) -> Self {
        let Some(meta) = metadata else {
            return InputShape::Text;
        };

        match meta.field_type {
            FieldType::Date => InputShape::Date { with_time: false },
            FieldType::DateTime => InputShape::Date { with_time: true },
            FieldType::Picklist => InputShape::Picklist {
                options: meta.picklist_values.clone(),
            },
            FieldType::Number => InputShape::Number,
            FieldType::Boolean => InputShape::Boolean,
            FieldType::Text => InputShape::Text,
        }
    }

    /// HTML-style input type name
    pub fn input_type(&self) -> &'static str {
        match self {
            InputShape::Text => "text",
            InputShape::Number => "number",
            InputShape::Boolean => "boolean",
            InputShape::Date { with_time: false } => "date",
            InputShape::Date { with_time: true } => "datetime-local",
            InputShape::Picklist { .. } => "picklist",
        }
    }

    /// Fixed choices offered by the input, if any
    pub fn options(&self) -> Vec<String> {
        match self {
            InputShape::Boolean => vec!["true".to_string(), "false".to_string()],
            InputShape::Picklist { options } => options.clone(),
            _ => Vec::new(),
        }
    }
}

/// Field metadata lookup table for the currently selected entity.
///
/// Owned by a session and replaced wholesale whenever the entity changes.
#[derive(Debug, Clone, Default)]
pub struct FieldMetadataIndex {
    entity: Option<String>,
    fields: HashMap<String, FieldMetadata>,
    order: Vec<String>,
}

impl FieldMetadataIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index contents with the fields of `entity`. No merge with prior contents.
    pub fn load(&mut self, entity: impl Into<String>, fields: Vec<FieldMetadata>) {
        self.clear();
        self.entity = Some(entity.into());

        for field in fields {
            if !self.fields.contains_key(&field.name) {
                self.order.push(field.name.clone());
            }
            self.fields.insert(field.name.clone(), field);
        }
    }

    pub fn clear(&mut self) {
        self.entity = None;
        self.fields.clear();
        self.order.clear();
    }

    pub fn lookup(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.get(name)
    }

    pub fn is_indexed(&self, name: &str) -> bool {
        self.lookup(name).map(|f| f.is_indexed).unwrap_or(false)
    }

    /// Field names in the order the metadata source returned them
    pub fn field_names(&self) -> &[String] {
        &self.order
    }

    /// Fields in source order
    pub fn fields(&self) -> impl Iterator<Item = &FieldMetadata> {
        self.order.iter().filter_map(|name| self.fields.get(name))
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
