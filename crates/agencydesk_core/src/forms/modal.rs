//! Modal lifecycle around an [`EntityForm`].

use super::{EntityForm, FormError};
use crate::model::entity::{Entity, EntityId};
use crate::store::EntityStore;
use log::debug;

/// What a submit will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalMode {
    #[default]
    Closed,
    Create,
    Edit(EntityId),
}

/// Modal holding one form.
#[derive(Debug, Clone, Default)]
pub struct FormModal<F: EntityForm> {
    mode: ModalMode,
    /// Controlled field values.
    pub form: F,
}

impl<F: EntityForm> FormModal<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ModalMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != ModalMode::Closed
    }

    /// Opens with blank fields.
    pub fn open_create(&mut self) {
        self.form = F::default();
        self.mode = ModalMode::Create;
    }

    /// Opens pre-filled from `entity`.
    pub fn open_edit(&mut self, entity: &F::Target) {
        self.form = F::fill_from(entity);
        self.mode = ModalMode::Edit(entity.id());
    }

    /// Closes and discards field values.
    pub fn close(&mut self) {
        self.form = F::default();
        self.mode = ModalMode::Closed;
    }

    /// Required fields still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.form.missing_fields()
    }

    /// Adds or updates through `store`, then closes.
    ///
    /// # Errors
    /// - `NotOpen` when the modal is closed.
    /// - `MissingFields` when a required field is blank; the modal stays open.
    /// - `Store(NotFound)` when the edited record was removed meanwhile; the
    ///   modal stays open.
    pub fn submit(&mut self, store: &mut EntityStore<F::Target>) -> Result<F::Target, FormError> {
        if self.mode == ModalMode::Closed {
            return Err(FormError::NotOpen);
        }

        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            debug!(
                "event=form_submit module=forms status=rejected kind={} missing={}",
                <F::Target as Entity>::KIND.as_str(),
                missing.len()
            );
            return Err(FormError::MissingFields(missing));
        }

        let saved = match self.mode {
            ModalMode::Edit(id) => store.update(id, self.form.to_patch())?,
            ModalMode::Create | ModalMode::Closed => store.add(self.form.to_draft()),
        };
        self.close();
        Ok(saved)
    }
}
