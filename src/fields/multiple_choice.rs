use crate::core::{Lookup, ModelError, Result, Value};

use super::{ChoiceSet, FieldCodec};

pub const DEFAULT_DELIMITER: char = ',';

/// Stores a set of selected tokens as one delimited text column.
///
/// The stored form is always the tokens sorted ascending and joined with the
/// delimiter. Because of that, an exact-match lookup for `["b", "a"]` is a
/// plain string comparison against a record saved with `["a", "b"]`.
///
/// Tokens must be non-empty and must not contain the delimiter, otherwise the
/// stored text would split back into different tokens.
#[derive(Debug, Clone)]
pub struct MultipleChoiceField {
    choices: ChoiceSet,
    delimiter: char,
}

impl MultipleChoiceField {
    pub fn new(choices: ChoiceSet) -> Result<Self> {
        let field = Self::unchecked(choices);
        field.check_choices()?;
        Ok(field)
    }

    pub fn with_delimiter(choices: ChoiceSet, delimiter: char) -> Result<Self> {
        Self::unchecked(choices).delimiter(delimiter)
    }

    pub fn delimiter(mut self, delimiter: char) -> Result<Self> {
        self.delimiter = delimiter;
        self.check_choices()?;
        Ok(self)
    }

    /// Checked later by `ModelSchemaBuilder::build`.
    pub(crate) fn unchecked(choices: ChoiceSet) -> Self {
        Self {
            choices,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn separator(&self) -> char {
        self.delimiter
    }

    /// Rejects tokens that would not survive a join and split.
    pub fn check_choices(&self) -> Result<()> {
        for token in self.choices.tokens() {
            if token.is_empty() {
                return Err(ModelError::InvalidSchema(
                    "Choice tokens cannot be empty".to_string(),
                ));
            }
            if token.contains(self.delimiter) {
                return Err(ModelError::InvalidSchema(format!(
                    "Choice token '{}' contains the delimiter '{}'",
                    token, self.delimiter
                )));
            }
        }
        Ok(())
    }

    pub fn choices(&self) -> &ChoiceSet {
        &self.choices
    }

    /// Labels of the selected tokens joined with the delimiter. Unknown tokens
    /// are shown as-is.
    pub fn display(&self, value: &Value) -> Result<String> {
        let labels: Vec<&str> = self
            .tokens_of(value)?
            .into_iter()
            .map(|token| self.choices.label(token).unwrap_or(token))
            .collect();
        Ok(labels.join(&self.delimiter.to_string()))
    }

    fn tokens_of<'a>(&self, value: &'a Value) -> Result<Vec<&'a str>> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Text(s) if s.is_empty() => Ok(Vec::new()),
            Value::Text(s) => Ok(s.split(self.delimiter).collect()),
            Value::List(items) => Ok(items.iter().map(String::as_str).collect()),
            other => Err(ModelError::InvalidValueType {
                field: None,
                expected: "delimited TEXT or LIST",
                found: other.type_name(),
            }),
        }
    }

    fn canonical(&self, value: &Value) -> Result<Vec<String>> {
        let mut tokens: Vec<String> = self
            .tokens_of(value)?
            .into_iter()
            .map(str::to_string)
            .collect();
        tokens.sort();
        tokens.dedup();
        Ok(tokens)
    }

    fn check_tokens<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for token in tokens {
            if !self.choices.contains(token) {
                return Err(ModelError::InvalidChoice {
                    field: None,
                    token: token.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl FieldCodec for MultipleChoiceField {
    fn parse(&self, raw: &Value) -> Result<Value> {
        let tokens = self.canonical(raw)?;
        self.check_tokens(tokens.iter().map(String::as_str))?;
        Ok(Value::List(tokens))
    }

    fn serialize(&self, value: &Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let tokens = self.canonical(value)?;
        Ok(Value::Text(tokens.join(&self.delimiter.to_string())))
    }

    fn validate(&self, value: &Value) -> Result<()> {
        let tokens = self.tokens_of(value)?;
        self.check_tokens(tokens)
    }

    fn prepare_lookup(&self, lookup: Lookup, value: &Value) -> Result<Value> {
        match lookup {
            Lookup::Exact => self.serialize(value),
            other => Err(ModelError::UnsupportedLookup(other.to_string())),
        }
    }

    fn empty_value(&self) -> Value {
        Value::List(Vec::new())
    }

    fn describe(&self) -> &'static str {
        "TEXT"
    }
}
