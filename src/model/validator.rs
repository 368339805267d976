use crate::core::{ModelError, Result, ValidationErrors, Value};
use crate::fields::FieldKind;
use crate::schema::FieldDef;

use super::Record;

/// Full-clean of a record before it is written.
///
/// Collects every failing field instead of stopping at the first one.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    exclude: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips the named fields during a full clean.
    pub fn excluding<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn full_clean(&self, record: &Record) -> Result<()> {
        let mut errors = ValidationErrors::new();

        for (field, value) in record.schema().fields().iter().zip(record.iter().map(|(_, v)| v)) {
            if self.exclude.iter().any(|name| name == field.name()) {
                continue;
            }
            if let Err(err) = clean_field(field, value) {
                errors.push(field.name(), err);
            }
        }

        errors.into_result()
    }
}

fn clean_field(field: &FieldDef, value: &Value) -> Result<()> {
    let options = field.options();

    if value.is_null() {
        if !options.nullable {
            return Err(ModelError::ConstraintViolation(
                "This field cannot be null.".to_string(),
            ));
        }
        return Ok(());
    }

    if value.is_blank() {
        if !options.blank {
            return Err(ModelError::ConstraintViolation(
                "This field cannot be blank.".to_string(),
            ));
        }
        return Ok(());
    }

    field.validate(value)?;

    if let Some(max) = options.max_length {
        let stored = match field.kind() {
            FieldKind::MultipleChoice(_) => field.serialize(value)?,
            FieldKind::Scalar(_) => value.clone(),
        };
        if let Some(text) = stored.as_str() {
            let length = text.chars().count();
            if length > max {
                return Err(ModelError::ConstraintViolation(format!(
                    "Ensure this value has at most {} characters (it has {}).",
                    max, length
                )));
            }
        }
    }

    Ok(())
}
