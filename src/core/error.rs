use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid choice '{token}'{}", field_clause(.field))]
    InvalidChoice { field: Option<String>, token: String },

    #[error("Invalid value type{}: expected {expected}, got {found}", field_clause(.field))]
    InvalidValueType {
        field: Option<String>,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Lookup type '{0}' not supported")]
    UnsupportedLookup(String),

    #[error("Field '{field}' not found on model '{model}'")]
    FieldNotFound { model: String, field: String },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{model} matching query does not exist")]
    DoesNotExist { model: String },

    #[error("get() returned more than one {model} -- it returned {count}")]
    MultipleObjectsReturned { model: String, count: usize },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ModelError {
    /// Binds a field name to codec errors raised before the field was known.
    pub fn in_field(self, name: &str) -> Self {
        match self {
            Self::InvalidChoice { field: None, token } => Self::InvalidChoice {
                field: Some(name.to_string()),
                token,
            },
            Self::InvalidValueType {
                field: None,
                expected,
                found,
            } => Self::InvalidValueType {
                field: Some(name.to_string()),
                expected,
                found,
            },
            other => other,
        }
    }

    pub fn is_does_not_exist(&self) -> bool {
        matches!(self, Self::DoesNotExist { .. })
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

fn field_clause(field: &Option<String>) -> String {
    match field {
        Some(name) => format!(" for field '{}'", name),
        None => String::new(),
    }
}

/// One failed field check collected by a full clean.
#[derive(Debug)]
pub struct FieldError {
    pub field: String,
    pub error: ModelError,
}

/// Every field failure found by a single full clean, in declaration order.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, error: ModelError) {
        self.errors.push(FieldError {
            field: field.into(),
            error,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Errors reported against one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ModelError> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| &e.error)
    }

    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for e in &self.errors {
            if !fields.contains(&e.field.as_str()) {
                fields.push(&e.field);
            }
        }
        fields
    }

    pub(crate) fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ModelError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.error)?;
        }
        Ok(())
    }
}
