pub mod memory;

pub use memory::MemoryStore;

use crate::core::{Criteria, ModelError, Result, Row};
use crate::schema::ModelSchema;

/// A persisted row together with its primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    pub pk: i64,
    pub row: Row,
}

/// Persistence collaborator - allows pluggable storage backends
///
/// Rows are exchanged in their stored form (`FieldCodec::serialize` output),
/// one value per declared field in schema order.
pub trait Store: Send + Sync {
    /// All rows matching every condition of `criteria`
    fn find(&self, schema: &ModelSchema, criteria: &Criteria) -> Result<Vec<StoredRow>>;

    /// Insert a new row and return its primary key
    fn insert(&mut self, schema: &ModelSchema, row: Row) -> Result<i64>;

    /// Replace the row stored under `pk`
    fn update(&mut self, schema: &ModelSchema, pk: i64, row: Row) -> Result<()>;

    /// Exactly one matching row
    fn get(&self, schema: &ModelSchema, criteria: &Criteria) -> Result<StoredRow> {
        let mut rows = self.find(schema, criteria)?;
        match rows.len() {
            0 => Err(ModelError::DoesNotExist {
                model: schema.name().to_string(),
            }),
            1 => Ok(rows.remove(0)),
            count => Err(ModelError::MultipleObjectsReturned {
                model: schema.name().to_string(),
                count,
            }),
        }
    }
}
