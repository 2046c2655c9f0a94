//! Kanban pipeline views.
//!
//! # Responsibility
//! - Partition a store's records into configured columns by group key.
//! - Translate drag-and-drop gestures into store transitions.
//!
//! # Invariants
//! - Each record lands in at most one column; unmatched records are reported
//!   as `unplaced` instead of being dropped.
//! - Moves never reorder the underlying collection.

pub mod board;
pub mod drag;

use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use board::{
    agent_group_columns, client_columns, node_kind_columns, Board, BoardColumn, ColumnSpec,
};
pub use drag::{DragPayload, DragSession, DropOutcome};

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Drag-and-drop failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Payload label belongs to another entity kind.
    PayloadKindMismatch {
        expected: &'static str,
        actual: String,
    },
    /// Payload value is not a valid entity id.
    InvalidPayload(String),
    /// Drop target is not a configured column.
    UnknownColumn(String),
    Store(StoreError),
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PayloadKindMismatch { expected, actual } => write!(
                f,
                "drag payload label `{actual}` does not match expected `{expected}`"
            ),
            Self::InvalidPayload(value) => write!(f, "invalid drag payload id: `{value}`"),
            Self::UnknownColumn(key) => write!(f, "drop target is not a board column: {key}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for PipelineError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
