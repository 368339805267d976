use std::sync::Arc;

use tracing::debug;

use crate::core::{Criteria, Lookup, ModelError, Result};
use crate::model::Record;
use crate::schema::ModelSchema;
use crate::store::Store;

/// Fetches the record matching `criteria`, or builds an unsaved one.
///
/// Returns `(record, true)` when the store found exactly one match. When the
/// store reports `DoesNotExist`, a new record is constructed in memory with
/// every criteria value assigned and `(record, false)` is returned; nothing is
/// written. Any other store error, `MultipleObjectsReturned` included, is
/// passed through unchanged.
///
/// Lookup and construction are not atomic with respect to other writers.
///
/// # Examples
///
/// ```
/// use modelkit::{Criteria, FieldDef, MemoryStore, ModelSchema, Value, get_or_build};
///
/// # fn main() -> modelkit::Result<()> {
/// let schema = ModelSchema::builder("Post").field(FieldDef::text("url")).build()?;
/// let store = MemoryStore::new();
///
/// let criteria = Criteria::new().exact("url", "http://example.com");
/// let (post, existed) = get_or_build(&store, &schema, &criteria)?;
/// assert!(!existed);
/// assert!(post.pk().is_none());
/// assert_eq!(post.get("url")?, &Value::from("http://example.com"));
/// # Ok(())
/// # }
/// ```
pub fn get_or_build<S: Store + ?Sized>(
    store: &S,
    schema: &Arc<ModelSchema>,
    criteria: &Criteria,
) -> Result<(Record, bool)> {
    match store.get(schema, criteria) {
        Ok(stored) => {
            let record = Record::from_stored(schema.clone(), stored)?;
            debug!(model = schema.name(), pk = ?record.pk(), existed = true, "get_or_build");
            Ok((record, true))
        }
        Err(err) if err.is_does_not_exist() => {
            let record = build(schema, criteria)?;
            debug!(model = schema.name(), existed = false, "get_or_build");
            Ok((record, false))
        }
        Err(err) => Err(err),
    }
}

fn build(schema: &Arc<ModelSchema>, criteria: &Criteria) -> Result<Record> {
    let mut record = Record::new(schema.clone());
    for condition in criteria.conditions() {
        if condition.lookup != Lookup::Exact {
            return Err(ModelError::UnsupportedLookup(condition.lookup.to_string()));
        }
        record.set(&condition.field, condition.value.clone())?;
    }
    Ok(record)
}
