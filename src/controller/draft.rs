//! Form drafts

use crate::models::Entity;

/// How a draft was opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
    View,
}

/// A record under edit, not yet (or not successfully) persisted.
///
/// Drafts opened for viewing expose no mutable access to their fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<E> {
    id: Option<String>,
    mode: FormMode,
    fields: E,
}

impl<E: Entity> Draft<E> {
    pub(crate) fn create() -> Self {
        Self {
            id: None,
            mode: FormMode::Create,
            fields: E::default(),
        }
    }

    pub(crate) fn existing(id: String, fields: E, mode: FormMode) -> Self {
        Self {
            id: Some(id),
            mode,
            fields,
        }
    }

    /// Identifier of the record being edited; `None` for a new record
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_read_only(&self) -> bool {
        self.mode == FormMode::View
    }

    pub fn fields(&self) -> &E {
        &self.fields
    }

    /// Mutable access for editing; `None` on a view-only draft
    pub fn fields_mut(&mut self) -> Option<&mut E> {
        if self.is_read_only() {
            None
        } else {
            Some(&mut self.fields)
        }
    }

    /// Replace the draft's fields wholesale, keeping id and mode.
    /// Ignored on a view-only draft; returns whether the edit applied.
    pub fn set_fields(&mut self, fields: E) -> bool {
        match self.fields_mut() {
            Some(current) => {
                *current = fields;
                true
            }
            None => false,
        }
    }

    pub(crate) fn into_parts(self) -> (Option<String>, FormMode, E) {
        (self.id, self.mode, self.fields)
    }
}
