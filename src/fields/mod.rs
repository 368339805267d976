//! Field codecs.
//!
//! Every field kind converts between its stored form and its in-memory form
//! through [`FieldCodec`]. Records, validators and stores call the codec
//! explicitly; nothing is discovered at runtime.

pub mod choices;
pub mod multiple_choice;
pub mod scalar;

pub use choices::{Choice, ChoiceSet};
pub use multiple_choice::{DEFAULT_DELIMITER, MultipleChoiceField};
pub use scalar::ScalarField;

use crate::core::{Lookup, Result, Value};

pub trait FieldCodec: Send + Sync {
    /// Converts a raw or stored value into its validated in-memory form.
    fn parse(&self, raw: &Value) -> Result<Value>;

    /// Converts an in-memory value into the form written to storage.
    fn serialize(&self, value: &Value) -> Result<Value>;

    fn validate(&self, value: &Value) -> Result<()>;

    /// Normalizes a predicate value so it compares equal to stored values.
    fn prepare_lookup(&self, lookup: Lookup, value: &Value) -> Result<Value>;

    /// Initial in-memory value for a non-nullable field without a default.
    fn empty_value(&self) -> Value;

    /// Storage type of the column backing this field.
    fn describe(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub enum FieldKind {
    Scalar(ScalarField),
    MultipleChoice(MultipleChoiceField),
}

impl FieldKind {
    pub fn codec(&self) -> &dyn FieldCodec {
        match self {
            Self::Scalar(field) => field,
            Self::MultipleChoice(field) => field,
        }
    }

    pub fn choices(&self) -> Option<&ChoiceSet> {
        match self {
            Self::MultipleChoice(field) => Some(field.choices()),
            Self::Scalar(_) => None,
        }
    }
}
