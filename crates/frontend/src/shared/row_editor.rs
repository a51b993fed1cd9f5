//! In-place editing of one fetched record.
//!
//! A [`RowEditor`] keeps the record exactly as the server sent it next to a
//! draft that absorbs the user's edits. Nothing leaves the draft until an
//! explicit save; the synchronizer drives the save itself and reports the
//! outcome back through [`RowEditor::finish_save`].

use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// A record that can be listed and edited field by field
pub trait Editable: Clone + 'static {
    type Id: Clone + Eq + Hash + Debug + 'static;

    fn id(&self) -> Self::Id;

    /// Apply a user edit to one field. Read-only records keep the default.
    fn set_field(&mut self, field: &str, _value: String) -> Result<(), FieldError> {
        Err(FieldError::Unknown(field.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Field `{0}` cannot be edited")]
    Immutable(String),

    #[error("Unknown field `{0}`")]
    Unknown(String),

    #[error("Row {0} is not in the list")]
    MissingRow(String),
}

/// Transient save flag of a row
///
/// `Idle -> Saving -> Saved -> Idle` on success,
/// `Idle -> Saving -> Idle` on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    Saved,
}

#[derive(Debug, Clone)]
pub struct RowEditor<R: Editable> {
    record: R,
    draft: R,
    state: SaveState,
    dirty: bool,
    generation: u64,
}

impl<R: Editable> RowEditor<R> {
    pub fn new(record: R, generation: u64) -> Self {
        Self {
            draft: record.clone(),
            record,
            state: SaveState::Idle,
            dirty: false,
            generation,
        }
    }

    pub fn id(&self) -> R::Id {
        self.record.id()
    }

    /// The record as last fetched
    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn draft(&self) -> &R {
        &self.draft
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Changes every time the editor is rebuilt from a fetch
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Row holds something a refresh would throw away
    pub fn is_busy(&self) -> bool {
        self.dirty || self.state == SaveState::Saving
    }

    pub fn edit(&mut self, field: &str, value: String) -> Result<(), FieldError> {
        self.draft.set_field(field, value)?;
        self.dirty = true;
        Ok(())
    }

    /// Enter `Saving` and hand out the full draft to send.
    ///
    /// Returns `None` while a save is already in flight.
    pub fn begin_save(&mut self) -> Option<R> {
        if self.state == SaveState::Saving {
            return None;
        }
        self.state = SaveState::Saving;
        Some(self.draft.clone())
    }

    /// Leave `Saving`. A failed save keeps the draft for a retry.
    pub fn finish_save(&mut self, succeeded: bool) {
        if self.state != SaveState::Saving {
            return;
        }
        if succeeded {
            self.state = SaveState::Saved;
            self.dirty = false;
        } else {
            self.state = SaveState::Idle;
        }
    }

    /// Drop the "saved" acknowledgement
    pub fn acknowledge(&mut self) {
        if self.state == SaveState::Saved {
            self.state = SaveState::Idle;
        }
    }

    pub(crate) fn keep_acknowledgement_of(&mut self, previous: &RowEditor<R>) {
        if previous.state == SaveState::Saved && self.state == SaveState::Idle {
            self.state = SaveState::Saved;
        }
    }
}
