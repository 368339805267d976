use std::sync::Arc;

use tracing::debug;

use crate::core::{ModelError, Result, Row, Value};
use crate::schema::ModelSchema;
use crate::store::{Store, StoredRow};

/// One instance of a record type: its schema, primary key and field values.
///
/// Values are held in their in-memory form. Every assignment goes through the
/// field codec, so a multi-choice field always holds a sorted, validated list.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<ModelSchema>,
    pk: Option<i64>,
    values: Vec<Value>,
}

impl Record {
    /// Fresh, unsaved record holding every field's initial value.
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|f| f.initial_value().clone())
            .collect();
        Self {
            schema,
            pk: None,
            values,
        }
    }

    /// Unsaved record with some fields assigned up front.
    pub fn with_values<I, K, V>(schema: Arc<ModelSchema>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut record = Self::new(schema);
        for (name, value) in values {
            record.set(name.as_ref(), value)?;
        }
        Ok(record)
    }

    /// Rebuilds a record from its stored form.
    pub fn from_stored(schema: Arc<ModelSchema>, stored: StoredRow) -> Result<Self> {
        if stored.row.len() != schema.field_count() {
            return Err(ModelError::Storage(format!(
                "Stored row for '{}' has {} values, schema declares {}",
                schema.name(),
                stored.row.len(),
                schema.field_count()
            )));
        }
        let values = schema
            .fields()
            .iter()
            .zip(stored.row.iter())
            .map(|(field, raw)| field.parse(raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            schema,
            pk: Some(stored.pk),
            values,
        })
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    pub fn pk(&self) -> Option<i64> {
        self.pk
    }

    pub fn is_saved(&self) -> bool {
        self.pk.is_some()
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        let idx = self.index_of(name)?;
        Ok(&self.values[idx])
    }

    /// Assigns a field through its codec; invalid values are rejected here.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let idx = self.index_of(name)?;
        let parsed = self.schema.fields()[idx].parse(&value.into())?;
        self.values[idx] = parsed;
        Ok(())
    }

    /// Human-readable value; multi-choice tokens are shown by label.
    pub fn display(&self, name: &str) -> Result<String> {
        let idx = self.index_of(name)?;
        self.schema.fields()[idx].display(&self.values[idx])
    }

    /// `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema.field_names().zip(self.values.iter())
    }

    /// Stored form of every field, in declaration order.
    pub fn to_row(&self) -> Result<Row> {
        self.schema
            .fields()
            .iter()
            .zip(self.values.iter())
            .map(|(field, value)| field.serialize(value))
            .collect()
    }

    /// Writes the record without running any capability. Inserts when the
    /// record has no primary key yet, otherwise updates in place.
    pub fn save(&mut self, store: &mut dyn Store) -> Result<()> {
        let row = self.to_row()?;
        match self.pk {
            Some(pk) => store.update(&self.schema, pk, row)?,
            None => self.pk = Some(store.insert(&self.schema, row)?),
        }
        debug!(model = self.schema.name(), pk = ?self.pk, "record saved");
        Ok(())
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.schema
            .find_field_index(name)
            .ok_or_else(|| self.schema.field_not_found(name))
    }
}
