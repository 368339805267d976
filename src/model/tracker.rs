//! Dirty-field tracking.
//!
//! A tracker keeps the string form of every field as it was when the record
//! was constructed, loaded or last saved. Comparing string forms gives one rule
//! for every field kind, so an integer `7` and a text `"7"` are not reported
//! as a change.

use std::collections::BTreeMap;

use im::OrdMap;
use serde_json::json;

use super::Record;

/// String form of every declared field, captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSnapshot {
    fields: OrdMap<String, String>,
}

impl RecordSnapshot {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub field: String,
    pub previous: String,
    pub current: String,
}

/// Fields whose string form differs from the snapshot, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDiff {
    entries: Vec<DiffEntry>,
}

impl FieldDiff {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: &str) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| (e.previous.as_str(), e.current.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter()
    }

    pub fn fields(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.field.clone()).collect()
    }

    pub fn into_map(self) -> BTreeMap<String, (String, String)> {
        self.entries
            .into_iter()
            .map(|e| (e.field, (e.previous, e.current)))
            .collect()
    }

    /// `{"field": [previous, current], ...}` for audit logs.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|e| (e.field.clone(), json!([e.previous, e.current])))
            .collect();
        serde_json::Value::Object(map)
    }
}

#[derive(Debug, Clone)]
pub struct ChangeTracker {
    snapshot: RecordSnapshot,
}

impl ChangeTracker {
    /// Starts tracking from the record's current state.
    pub fn attach(record: &Record) -> Self {
        Self {
            snapshot: Self::capture(record),
        }
    }

    pub fn capture(record: &Record) -> RecordSnapshot {
        let fields = record
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        RecordSnapshot { fields }
    }

    pub fn snapshot(&self) -> &RecordSnapshot {
        &self.snapshot
    }

    /// Replaces the snapshot; called after a successful save.
    pub fn refresh(&mut self, record: &Record) {
        self.snapshot = Self::capture(record);
    }

    pub fn diff(&self, record: &Record) -> FieldDiff {
        let entries = record
            .iter()
            .filter_map(|(name, value)| {
                let previous = self.snapshot.get(name)?;
                let current = value.to_string();
                (previous != current).then(|| DiffEntry {
                    field: name.to_string(),
                    previous: previous.to_string(),
                    current,
                })
            })
            .collect();
        FieldDiff { entries }
    }

    pub fn has_changed(&self, record: &Record) -> bool {
        !self.diff(record).is_empty()
    }

    pub fn changed_fields(&self, record: &Record) -> Vec<String> {
        self.diff(record).fields()
    }
}
