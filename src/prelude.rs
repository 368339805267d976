//! Recommended imports grouped by abstraction level.
//!
//! `models` covers declaring schemas and working with records.
//! `codecs` is for code that plugs field conversion into its own store.

pub mod models {
    //! Schema declaration, records with capabilities, and lookups.
    pub use crate::{
        ChoiceSet, Criteria, FieldDef, MemoryStore, Model, ModelError, ModelSchema, Record,
        Result, Store, Value, get_or_build,
    };
}

pub mod codecs {
    //! Field conversion and lookup preparation.
    pub use crate::{FieldCodec, Lookup, MultipleChoiceField, ScalarField, StoredRow};
}
