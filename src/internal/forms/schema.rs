//! Explicit mapping from record fields to form inputs.
//!
//! A schema is checked once when it is built. Every later lookup goes through
//! the single input identifier registered for a field.

use std::collections::{BTreeSet, HashMap, HashSet};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Non-negative whole number.
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub input_id: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str, input_id: &'static str) -> Self {
        Self {
            name,
            input_id,
            required: true,
            kind: FieldKind::Text,
        }
    }

    pub const fn integer(name: &'static str, input_id: &'static str) -> Self {
        Self {
            name,
            input_id,
            required: true,
            kind: FieldKind::Integer,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("form {0} declares no fields")]
    NoFields(&'static str),

    #[error("form {form} has a field with an empty name or input identifier")]
    EmptyIdentifier { form: &'static str },

    #[error("form {form} declares field {field} more than once")]
    DuplicateField {
        form: &'static str,
        field: &'static str,
    },

    #[error("form {form} maps more than one field to input {input_id}")]
    DuplicateInput {
        form: &'static str,
        input_id: &'static str,
    },
}

/// Input identifiers that failed validation, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid fields: {}", .invalid.join(", "))]
pub struct ValidationReport {
    pub invalid: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn single(input_id: &str) -> Self {
        Self {
            invalid: vec![input_id.to_string()],
        }
    }

    pub fn contains(&self, input_id: &str) -> bool {
        self.invalid.iter().any(|id| id == input_id)
    }
}

/// Values typed into a form, keyed by input identifier, plus the inputs
/// currently flagged invalid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    values: HashMap<String, String>,
    invalid: BTreeSet<String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, input_id: &str, value: impl Into<String>) -> Self {
        self.set(input_id, value);
        self
    }

    pub fn set(&mut self, input_id: &str, value: impl Into<String>) {
        self.values.insert(input_id.to_string(), value.into());
    }

    pub fn get(&self, input_id: &str) -> Option<&str> {
        self.values.get(input_id).map(String::as_str)
    }

    pub fn is_marked_invalid(&self, input_id: &str) -> bool {
        self.invalid.contains(input_id)
    }

    /// Replace the invalid markers with the report's.
    pub fn mark(&mut self, report: &ValidationReport) {
        self.invalid = report.invalid.iter().cloned().collect();
    }

    /// Empty every input and drop every marker.
    pub fn clear(&mut self) {
        self.values.values_mut().for_each(String::clear);
        self.invalid.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    form_id: &'static str,
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(form_id: &'static str, fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::NoFields(form_id));
        }

        let mut names = HashSet::new();
        let mut inputs = HashSet::new();
        for field in &fields {
            if field.name.trim().is_empty() || field.input_id.trim().is_empty() {
                return Err(SchemaError::EmptyIdentifier { form: form_id });
            }
            if !names.insert(field.name) {
                return Err(SchemaError::DuplicateField {
                    form: form_id,
                    field: field.name,
                });
            }
            if !inputs.insert(field.input_id) {
                return Err(SchemaError::DuplicateInput {
                    form: form_id,
                    input_id: field.input_id,
                });
            }
        }

        Ok(Self { form_id, fields })
    }

    pub fn form_id(&self) -> &'static str {
        self.form_id
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn input_id(&self, name: &str) -> Option<&'static str> {
        self.field(name).map(|f| f.input_id)
    }

    /// Check every field. Blank required inputs and malformed numbers are
    /// reported; nothing is mutated.
    pub fn validate(&self, data: &FormData) -> ValidationReport {
        let invalid = self
            .fields
            .iter()
            .filter(|field| {
                let value = data.get(field.input_id).unwrap_or("").trim();
                if value.is_empty() {
                    return field.required;
                }
                field.kind == FieldKind::Integer && value.parse::<u64>().is_err()
            })
            .map(|field| field.input_id.to_string())
            .collect();

        ValidationReport { invalid }
    }

    /// Trimmed value of a field, empty when absent.
    pub fn text(&self, data: &FormData, name: &str) -> String {
        self.input_id(name)
            .and_then(|id| data.get(id))
            .unwrap_or("")
            .trim()
            .to_string()
    }

    /// Parsed value of an integer field. Out-of-range values are reported
    /// against the field's input.
    pub fn number<T: std::str::FromStr>(
        &self,
        data: &FormData,
        name: &str,
    ) -> Result<T, ValidationReport> {
        let input_id = self.input_id(name).unwrap_or(name);
        self.text(data, name)
            .parse::<T>()
            .map_err(|_| ValidationReport::single(input_id))
    }
}
