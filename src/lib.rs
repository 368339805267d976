// ============================================================================
// modelkit
// ============================================================================
//
// Field codecs, change tracking and find-or-build helpers layered over a
// pluggable record store.
//
// ============================================================================

pub mod core;
pub mod fields;
pub mod forms;
pub mod model;
pub mod prelude;
pub mod query;
pub mod schema;
pub mod store;

// Re-export main types for convenience
pub use crate::core::{
    Condition, Criteria, DataType, Lookup, ModelError, Result, Row, ValidationErrors, Value,
};
pub use crate::fields::{ChoiceSet, FieldCodec, FieldKind, MultipleChoiceField, ScalarField};
pub use crate::forms::{FormField, Widget};
pub use crate::model::{
    ChangeTracker, FieldDiff, Model, Record, RecordSnapshot, SaveHook, Validator,
};
pub use crate::query::get_or_build;
pub use crate::schema::{FieldDef, FieldOptions, ModelSchema, ModelSchemaBuilder};
pub use crate::store::{MemoryStore, Store, StoredRow};
