use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::{Store, StoredRow};
use crate::core::{Criteria, ModelError, Result, Row};
use crate::schema::ModelSchema;

#[derive(Debug, Default)]
struct MemTable {
    rows: BTreeMap<i64, Row>,
    next_pk: i64,
}

impl MemTable {
    fn allocate_pk(&mut self) -> i64 {
        self.next_pk += 1;
        self.next_pk
    }
}

/// In-process store keyed by model name.
///
/// Tables are created on first insert. Matching is plain equality between the
/// stored values and the prepared criteria values.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<String, MemTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self, model: &str) -> usize {
        self.tables.get(model).map_or(0, |t| t.rows.len())
    }

    pub fn get_by_pk(&self, model: &str, pk: i64) -> Option<&Row> {
        self.tables.get(model).and_then(|t| t.rows.get(&pk))
    }

    fn check_width(schema: &ModelSchema, row: &Row) -> Result<()> {
        if row.len() != schema.field_count() {
            return Err(ModelError::Storage(format!(
                "Model '{}' expects {} values, got {}",
                schema.name(),
                schema.field_count(),
                row.len()
            )));
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn find(&self, schema: &ModelSchema, criteria: &Criteria) -> Result<Vec<StoredRow>> {
        let prepared = schema.prepare_criteria(criteria)?;

        let Some(table) = self.tables.get(schema.name()) else {
            debug!(model = schema.name(), matched = 0, "lookup on empty table");
            return Ok(Vec::new());
        };

        let mut matched = Vec::new();
        for (pk, row) in &table.rows {
            let mut is_match = true;
            for (idx, value) in &prepared {
                let Some(stored) = row.get(*idx) else {
                    return Err(ModelError::Storage(format!(
                        "Row {} of model '{}' has {} values, field index {} is out of range",
                        pk,
                        schema.name(),
                        row.len(),
                        idx
                    )));
                };
                if stored != value {
                    is_match = false;
                    break;
                }
            }
            if is_match {
                matched.push(StoredRow {
                    pk: *pk,
                    row: row.clone(),
                });
            }
        }

        debug!(model = schema.name(), matched = matched.len(), "lookup");
        Ok(matched)
    }

    fn insert(&mut self, schema: &ModelSchema, row: Row) -> Result<i64> {
        Self::check_width(schema, &row)?;

        let table = self.tables.entry(schema.name().to_string()).or_default();
        let pk = table.allocate_pk();
        table.rows.insert(pk, row);

        debug!(model = schema.name(), pk, rows = table.rows.len(), "inserted row");
        Ok(pk)
    }

    fn update(&mut self, schema: &ModelSchema, pk: i64, row: Row) -> Result<()> {
        Self::check_width(schema, &row)?;

        let slot = self
            .tables
            .get_mut(schema.name())
            .and_then(|t| t.rows.get_mut(&pk))
            .ok_or_else(|| ModelError::DoesNotExist {
                model: schema.name().to_string(),
            })?;
        *slot = row;

        debug!(model = schema.name(), pk, "updated row");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::fields::ChoiceSet;
    use crate::schema::FieldDef;
    use std::sync::Arc;

    fn schema() -> Arc<ModelSchema> {
        ModelSchema::builder("Post")
            .field(FieldDef::text("title"))
            .field(FieldDef::multiple_choice(
                "channels",
                ChoiceSet::from_tokens(["a", "b", "c"]).unwrap(),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_insert_assigns_increasing_keys() {
        let schema = schema();
        let mut store = MemoryStore::new();
        let first = store.insert(&schema, vec!["x".into(), "a".into()]).unwrap();
        let second = store.insert(&schema, vec!["y".into(), "".into()]).unwrap();
        assert_eq!((first, second), (1, 2));
        assert_eq!(store.row_count("Post"), 2);
    }

    #[test]
    fn test_insert_rejects_wrong_width() {
        let schema = schema();
        let mut store = MemoryStore::new();
        let result = store.insert(&schema, vec!["x".into()]);
        assert!(matches!(result, Err(ModelError::Storage(_))));
        assert_eq!(store.row_count("Post"), 0);
    }

    #[test]
    fn test_find_uses_canonical_form() {
        let schema = schema();
        let mut store = MemoryStore::new();
        store.insert(&schema, vec!["x".into(), "a,b".into()]).unwrap();

        let rows = store
            .find(&schema, &Criteria::new().exact("channels", ["b", "a"]))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row[0], Value::from("x"));

        let rows = store
            .find(&schema, &Criteria::new().exact("channels", ["a"]))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_get_reports_missing_and_ambiguous() {
        let schema = schema();
        let mut store = MemoryStore::new();
        let criteria = Criteria::new().exact("title", "dup");

        assert!(matches!(
            store.get(&schema, &criteria),
            Err(ModelError::DoesNotExist { .. })
        ));

        store.insert(&schema, vec!["dup".into(), "".into()]).unwrap();
        store.insert(&schema, vec!["dup".into(), "c".into()]).unwrap();
        assert!(matches!(
            store.get(&schema, &criteria),
            Err(ModelError::MultipleObjectsReturned { count: 2, .. })
        ));
    }

    #[test]
    fn test_find_with_wider_schema_reports_storage_error() {
        let narrow = ModelSchema::builder("Post")
            .field(FieldDef::text("a"))
            .build()
            .unwrap();
        let wide = ModelSchema::builder("Post")
            .field(FieldDef::text("a"))
            .field(FieldDef::text("b"))
            .build()
            .unwrap();
        let mut store = MemoryStore::new();
        store.insert(&narrow, vec!["x".into()]).unwrap();

        let result = store.find(&wide, &Criteria::new().exact("b", "y"));
        assert!(
            matches!(result, Err(ModelError::Storage(ref msg)) if msg.contains("out of range"))
        );

        let rows = store.find(&wide, &Criteria::new().exact("a", "x")).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_find_float_match_is_exact() {
        let schema = ModelSchema::builder("Reading")
            .field(FieldDef::float("w"))
            .build()
            .unwrap();
        let mut store = MemoryStore::new();
        store.insert(&schema, vec![Value::Float(0.0)]).unwrap();

        let rows = store.find(&schema, &Criteria::new().exact("w", 1e-20)).unwrap();
        assert!(rows.is_empty());
        let rows = store.find(&schema, &Criteria::new().exact("w", 0.0)).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_update_missing_row() {
        let schema = schema();
        let mut store = MemoryStore::new();
        let result = store.update(&schema, 9, vec!["x".into(), "".into()]);
        assert!(matches!(result, Err(ModelError::DoesNotExist { .. })));
    }
}
