use std::fmt;
use std::str::FromStr;

use super::{ModelError, Value};

/// Stored form of a record: one value per declared field, in declaration order.
pub type Row = Vec<Value>;

/// Comparison operator of a query predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    Exact,
    IExact,
    Contains,
    In,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Lookup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::IExact => "iexact",
            Self::Contains => "contains",
            Self::In => "in",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lookup {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "iexact" => Ok(Self::IExact),
            "contains" => Ok(Self::Contains),
            "in" => Ok(Self::In),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            other => Err(ModelError::UnsupportedLookup(other.to_string())),
        }
    }
}

/// A single `field <lookup> value` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub lookup: Lookup,
    pub value: Value,
}

/// Conjunction of predicates used to look records up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    conditions: Vec<Condition>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exact-match predicate.
    pub fn exact(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.lookup(field, Lookup::Exact, value)
    }

    pub fn lookup(
        mut self,
        field: impl Into<String>,
        lookup: Lookup,
        value: impl Into<Value>,
    ) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            lookup,
            value: value.into(),
        });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
