//! Records and the capabilities that can be attached to them.
//!
//! A [`Model`] is a [`Record`] plus any combination of a [`Validator`] and a
//! [`ChangeTracker`]. Each capability hooks into `save` on its own; there is
//! no ordering dependency between them beyond "validate, write, re-snapshot".

mod record;
mod tracker;
mod validator;

pub use record::Record;
pub use tracker::{ChangeTracker, DiffEntry, FieldDiff, RecordSnapshot};
pub use validator::Validator;

use std::sync::Arc;

use tracing::debug;

use crate::core::{Criteria, Result, Value};
use crate::query;
use crate::schema::ModelSchema;
use crate::store::Store;

/// Hook points a capability can use around a write.
pub trait SaveHook {
    /// Runs before the record is written; an error aborts the save.
    fn before_save(&self, _record: &Record) -> Result<()> {
        Ok(())
    }

    /// Runs after the write succeeded.
    fn after_save(&mut self, _record: &Record) {}
}

impl SaveHook for Validator {
    fn before_save(&self, record: &Record) -> Result<()> {
        self.full_clean(record)
    }
}

impl SaveHook for ChangeTracker {
    fn after_save(&mut self, record: &Record) {
        self.refresh(record);
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    record: Record,
    validator: Option<Validator>,
    tracker: Option<ChangeTracker>,
}

impl Model {
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        Self::from_record(Record::new(schema))
    }

    pub fn from_record(record: Record) -> Self {
        Self {
            record,
            validator: None,
            tracker: None,
        }
    }

    /// Full-clean before every save.
    pub fn with_validation(self) -> Self {
        self.with_validator(Validator::new())
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Tracks changes relative to the current state and to each later save.
    pub fn with_change_tracking(mut self) -> Self {
        self.tracker = Some(ChangeTracker::attach(&self.record));
        self
    }

    /// Looks up a record or builds an unsaved one. Capabilities are chained
    /// on afterwards, so a tracker snapshots the fetched or built state.
    pub fn get_or_build(
        store: &dyn Store,
        schema: &Arc<ModelSchema>,
        criteria: &Criteria,
    ) -> Result<(Self, bool)> {
        let (record, existed) = query::get_or_build(store, schema, criteria)?;
        Ok((Self::from_record(record), existed))
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    pub fn tracker(&self) -> Option<&ChangeTracker> {
        self.tracker.as_ref()
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub fn pk(&self) -> Option<i64> {
        self.record.pk()
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        self.record.get(name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.record.set(name, value)
    }

    pub fn display(&self, name: &str) -> Result<String> {
        self.record.display(name)
    }

    /// Runs the attached validator, or a default one when none is attached.
    pub fn full_clean(&self) -> Result<()> {
        match &self.validator {
            Some(validator) => validator.full_clean(&self.record),
            None => Validator::new().full_clean(&self.record),
        }
    }

    /// `false` when change tracking is not attached.
    pub fn has_changed(&self) -> bool {
        self.tracker
            .as_ref()
            .is_some_and(|t| t.has_changed(&self.record))
    }

    pub fn changed_fields(&self) -> Vec<String> {
        self.tracker
            .as_ref()
            .map(|t| t.changed_fields(&self.record))
            .unwrap_or_default()
    }

    pub fn diff(&self) -> FieldDiff {
        self.tracker
            .as_ref()
            .map(|t| t.diff(&self.record))
            .unwrap_or_default()
    }

    pub fn save(&mut self, store: &mut dyn Store) -> Result<()> {
        if let Some(validator) = &self.validator {
            validator.before_save(&self.record)?;
        }

        let changed = self.changed_fields();
        self.record.save(store)?;

        if let Some(tracker) = &mut self.tracker {
            tracker.after_save(&self.record);
        }

        debug!(
            model = self.record.schema().name(),
            pk = ?self.record.pk(),
            changed = ?changed,
            "model saved"
        );
        Ok(())
    }
}
