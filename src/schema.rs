//! Explicit schema descriptors.
//!
//! A [`ModelSchema`] is built once per record type and shared behind an
//! `Arc`. It is the ordered list of declared fields that records, validators,
//! change trackers and stores all consult.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Criteria, DataType, Lookup, ModelError, Result, Value};
use crate::fields::{ChoiceSet, FieldCodec, FieldKind, MultipleChoiceField, ScalarField};
use crate::forms::FormField;

/// Per-field configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// `Null` is an acceptable stored value
    pub nullable: bool,

    /// Empty text / empty selection passes a full clean
    pub blank: bool,

    /// Maximum length in characters of the stored text
    pub max_length: Option<usize>,

    /// Raw default, parsed through the field codec when the schema is built
    pub default: Option<Value>,

    /// Human-readable name used for form labels
    pub verbose_name: Option<String>,

    pub help_text: String,
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    kind: FieldKind,
    options: FieldOptions,
    initial: Value,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let initial = kind.codec().empty_value();
        Self {
            name: name.into(),
            kind,
            options: FieldOptions::default(),
            initial,
        }
    }

    pub fn scalar(name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(name, FieldKind::Scalar(ScalarField::new(data_type)))
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::scalar(name, DataType::Text)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::scalar(name, DataType::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::scalar(name, DataType::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::scalar(name, DataType::Boolean)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::scalar(name, DataType::Date)
    }

    pub fn timestamp(name: impl Into<String>) -> Self {
        Self::scalar(name, DataType::Timestamp)
    }

    pub fn multiple_choice(name: impl Into<String>, choices: ChoiceSet) -> Self {
        Self::new(name, FieldKind::MultipleChoice(MultipleChoiceField::unchecked(choices)))
    }

    pub fn nullable(mut self) -> Self {
        self.options.nullable = true;
        self
    }

    pub fn blank(mut self) -> Self {
        self.options.blank = true;
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.options.max_length = Some(max);
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.options.default = Some(value.into());
        self
    }

    pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
        self.options.verbose_name = Some(name.into());
        self
    }

    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.options.help_text = text.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub fn codec(&self) -> &dyn FieldCodec {
        self.kind.codec()
    }

    /// Declared default in its raw form, as given to the builder.
    pub fn get_default(&self) -> Option<&Value> {
        self.options.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.options.default.is_some()
    }

    /// In-memory value a freshly constructed record starts with.
    pub fn initial_value(&self) -> &Value {
        &self.initial
    }

    pub fn parse(&self, raw: &Value) -> Result<Value> {
        self.codec().parse(raw).map_err(|e| e.in_field(&self.name))
    }

    pub fn serialize(&self, value: &Value) -> Result<Value> {
        self.codec().serialize(value).map_err(|e| e.in_field(&self.name))
    }

    pub fn validate(&self, value: &Value) -> Result<()> {
        self.codec().validate(value).map_err(|e| e.in_field(&self.name))
    }

    pub fn prepare_lookup(&self, lookup: Lookup, value: &Value) -> Result<Value> {
        self.codec()
            .prepare_lookup(lookup, value)
            .map_err(|e| e.in_field(&self.name))
    }

    /// Human-readable rendering of a value; choice tokens become their labels.
    pub fn display(&self, value: &Value) -> Result<String> {
        match &self.kind {
            FieldKind::MultipleChoice(field) => {
                field.display(value).map_err(|e| e.in_field(&self.name))
            }
            FieldKind::Scalar(_) => Ok(value.to_string()),
        }
    }

    pub fn form_field(&self) -> FormField {
        FormField::for_field(self)
    }

    fn resolve_initial(&mut self) -> Result<()> {
        self.initial = match &self.options.default {
            Some(raw) => self.parse(raw)?,
            None if self.options.nullable => self.parse(&Value::Null)?,
            None => self.codec().empty_value(),
        };
        Ok(())
    }
}

/// Ordered field declarations for one record type.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    name: String,
    fields: Vec<FieldDef>,
}

impl ModelSchema {
    pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name())
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn find_field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Result<&FieldDef> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| self.field_not_found(name))
    }

    pub(crate) fn field_not_found(&self, name: &str) -> ModelError {
        ModelError::FieldNotFound {
            model: self.name.clone(),
            field: name.to_string(),
        }
    }

    /// Resolves every condition to a field index and its prepared value.
    pub fn prepare_criteria(&self, criteria: &Criteria) -> Result<Vec<(usize, Value)>> {
        criteria
            .conditions()
            .iter()
            .map(|condition| {
                let idx = self
                    .find_field_index(&condition.field)
                    .ok_or_else(|| self.field_not_found(&condition.field))?;
                let prepared = self.fields[idx].prepare_lookup(condition.lookup, &condition.value)?;
                Ok((idx, prepared))
            })
            .collect()
    }
}

pub struct ModelSchemaBuilder {
    name: String,
    fields: Vec<FieldDef>,
}

impl ModelSchemaBuilder {
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<Arc<ModelSchema>> {
        if self.name.is_empty() {
            return Err(ModelError::InvalidSchema("Model name cannot be empty".to_string()));
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        for mut field in self.fields {
            if field.name.is_empty() {
                return Err(ModelError::InvalidSchema(format!(
                    "Model '{}' declares a field without a name",
                    self.name
                )));
            }
            if fields.iter().any(|f: &FieldDef| f.name == field.name) {
                return Err(ModelError::InvalidSchema(format!(
                    "Field '{}' declared twice on model '{}'",
                    field.name, self.name
                )));
            }
            if let FieldKind::MultipleChoice(codec) = &field.kind {
                codec.check_choices().map_err(|e| match e {
                    ModelError::InvalidSchema(msg) => {
                        ModelError::InvalidSchema(format!("Field '{}': {}", field.name, msg))
                    }
                    other => other,
                })?;
            }
            field.resolve_initial()?;
            fields.push(field);
        }

        Ok(Arc::new(ModelSchema {
            name: self.name,
            fields,
        }))
    }
}
