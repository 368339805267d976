pub mod error;
pub mod types;
pub mod value;

pub use error::{FieldError, ModelError, Result, ValidationErrors};
pub use types::{Condition, Criteria, Lookup, Row};
pub use value::{DataType, Value};
