//! Create/edit form models.
//!
//! # Responsibility
//! - Hold controlled field values for create and edit modals.
//! - Check required fields and hand drafts/patches to entity stores.
//!
//! # Invariants
//! - Only presence is checked; field formats are never validated.
//! - A failed submit leaves the modal open with its field values intact.

pub mod fields;
pub mod modal;

use crate::model::entity::Entity;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use fields::{AgentForm, ClientForm, GroupForm};
pub use modal::{FormModal, ModalMode};

/// Controlled-field model for one entity kind.
pub trait EntityForm: Default {
    type Target: Entity;

    /// Names of required fields that are blank after trimming.
    fn missing_fields(&self) -> Vec<&'static str>;

    fn to_draft(&self) -> <Self::Target as Entity>::Draft;

    /// Patch overwriting every field the form edits.
    fn to_patch(&self) -> <Self::Target as Entity>::Patch;

    /// Pre-fills fields from an existing record for editing.
    fn fill_from(entity: &Self::Target) -> Self;
}

/// Form submission error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Submit called while the modal is closed.
    NotOpen,
    MissingFields(Vec<&'static str>),
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOpen => write!(f, "form is not open"),
            Self::MissingFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
