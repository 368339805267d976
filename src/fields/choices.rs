use serde::{Deserialize, Serialize};

use crate::core::{ModelError, Result};

/// A single selectable token and its human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub token: String,
    pub label: String,
}

/// Fixed, ordered universe of legal tokens for a multi-choice field.
///
/// Tokens are unique. Membership is an exact, case-sensitive match on the
/// token, never on the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Choice>", into = "Vec<Choice>")]
pub struct ChoiceSet {
    choices: Vec<Choice>,
}

impl TryFrom<Vec<Choice>> for ChoiceSet {
    type Error = ModelError;

    fn try_from(choices: Vec<Choice>) -> Result<Self> {
        Self::new(choices.into_iter().map(|c| (c.token, c.label)))
    }
}

impl From<ChoiceSet> for Vec<Choice> {
    fn from(set: ChoiceSet) -> Self {
        set.choices
    }
}

impl ChoiceSet {
    pub fn new<I, T, L>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, L)>,
        T: Into<String>,
        L: Into<String>,
    {
        let mut choices: Vec<Choice> = Vec::new();
        for (token, label) in pairs {
            let token = token.into();
            if choices.iter().any(|c| c.token == token) {
                return Err(ModelError::InvalidSchema(format!(
                    "Duplicate choice token '{}'",
                    token
                )));
            }
            choices.push(Choice {
                token,
                label: label.into(),
            });
        }
        Ok(Self { choices })
    }

    /// Choice set whose labels equal their tokens.
    pub fn from_tokens<I, T>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(tokens.into_iter().map(|t| {
            let token = t.into();
            (token.clone(), token)
        }))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.choices.iter().any(|c| c.token == token)
    }

    pub fn label(&self, token: &str) -> Option<&str> {
        self.choices
            .iter()
            .find(|c| c.token == token)
            .map(|c| c.label.as_str())
    }

    /// Selectable tokens in declaration order.
    pub fn tokens(&self) -> Vec<&str> {
        self.choices.iter().map(|c| c.token.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter()
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}
