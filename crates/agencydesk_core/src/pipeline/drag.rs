//! Drag-and-drop session for moving records between board columns.
//!
//! # Invariants
//! - Hover state is presentation-only; only `drop_on` mutates the store.
//! - A drop always ends the session, whether it succeeds or not.

use crate::model::entity::{Entity, EntityId, Grouped, Transition};
use crate::pipeline::board::ColumnSpec;
use crate::pipeline::{PipelineError, PipelineResult};
use crate::store::{EntityStore, StoreError};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Native drag-data entry: one id string under a per-kind label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    /// e.g. `clientId`.
    pub label: String,
    pub value: String,
}

impl DragPayload {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Payload tagging `id` as an entity of kind `T`.
    pub fn for_entity<T: Entity>(id: EntityId) -> Self {
        Self::new(T::KIND.drag_label(), id.to_string())
    }

    /// Extracts the dragged id, checking the label belongs to `T`.
    pub fn entity_id<T: Entity>(&self) -> PipelineResult<EntityId> {
        let expected = T::KIND.drag_label();
        if self.label != expected {
            return Err(PipelineError::PayloadKindMismatch {
                expected,
                actual: self.label.clone(),
            });
        }

        Uuid::parse_str(self.value.trim())
            .map_err(|_| PipelineError::InvalidPayload(self.value.clone()))
    }
}

/// Result of a completed drop.
#[derive(Debug, Clone, PartialEq)]
pub struct DropOutcome<T: Grouped> {
    /// Record after the transition.
    pub entity: T,
    pub from: T::Key,
    pub to: T::Key,
}

impl<T: Grouped> DropOutcome<T> {
    /// `false` for drops onto the record's own column.
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveDrag<K> {
    entity_id: EntityId,
    source: K,
}

/// Board-scoped drag state.
#[derive(Debug, Clone)]
pub struct DragSession<T: Transition> {
    columns: Vec<ColumnSpec<T::Key>>,
    active: Option<ActiveDrag<T::Key>>,
    hovered: Option<T::Key>,
}

impl<T: Transition> DragSession<T> {
    pub fn new(columns: Vec<ColumnSpec<T::Key>>) -> Self {
        Self {
            columns,
            active: None,
            hovered: None,
        }
    }

    pub fn columns(&self) -> &[ColumnSpec<T::Key>] {
        &self.columns
    }

    /// Replaces the column set and ends any drag in progress.
    pub fn set_columns(&mut self, columns: Vec<ColumnSpec<T::Key>>) {
        self.columns = columns;
        self.cancel();
    }

    /// Starts dragging `entity` out of its current column.
    pub fn begin(&mut self, entity: &T) -> DragPayload {
        let id = entity.id();
        self.active = Some(ActiveDrag {
            entity_id: id,
            source: entity.group_key(),
        });
        self.hovered = None;
        DragPayload::for_entity::<T>(id)
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragged_id(&self) -> Option<EntityId> {
        self.active.map(|drag| drag.entity_id)
    }

    /// Column the current drag started from.
    pub fn source(&self) -> Option<T::Key> {
        self.active.map(|drag| drag.source)
    }

    /// Marks `target` as hovered. Returns whether it accepts drops.
    pub fn drag_over(&mut self, target: T::Key) -> bool {
        let eligible = self.is_column(target);
        self.hovered = eligible.then_some(target);
        eligible
    }

    /// Clears the hover mark if it is on `target`.
    pub fn drag_leave(&mut self, target: T::Key) {
        if self.hovered == Some(target) {
            self.hovered = None;
        }
    }

    pub fn hovered(&self) -> Option<T::Key> {
        self.hovered
    }

    pub fn cancel(&mut self) {
        self.active = None;
        self.hovered = None;
    }

    /// Moves the record named by `payload` into the `target` column.
    ///
    /// Dropping onto the record's own column is a same-value update: the
    /// collection does not change but subscribers are still notified.
    ///
    /// # Errors
    /// - `UnknownColumn` when `target` is not configured on this board.
    /// - `PayloadKindMismatch` / `InvalidPayload` for foreign or malformed payloads.
    /// - `Store(NotFound)` when the id is not in `store`.
    pub fn drop_on(
        &mut self,
        store: &mut EntityStore<T>,
        payload: &DragPayload,
        target: T::Key,
    ) -> PipelineResult<DropOutcome<T>> {
        self.cancel();

        if !self.is_column(target) {
            return Err(PipelineError::UnknownColumn(format!("{target:?}")));
        }

        let id = payload.entity_id::<T>()?;
        let Some(from) = store.get(id).map(|record| record.group_key()) else {
            warn!(
                "event=pipeline_drop module=pipeline status=not_found kind={} id={}",
                T::KIND.as_str(),
                id
            );
            return Err(StoreError::NotFound { kind: T::KIND, id }.into());
        };

        let entity = store.update(id, T::transition_patch(target))?;
        let outcome = DropOutcome {
            entity,
            from,
            to: target,
        };
        info!(
            "event=pipeline_drop module=pipeline status=ok kind={} id={} from={:?} to={:?} moved={}",
            T::KIND.as_str(),
            id,
            outcome.from,
            outcome.to,
            outcome.moved()
        );
        Ok(outcome)
    }

    fn is_column(&self, key: T::Key) -> bool {
        self.columns.iter().any(|column| column.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::DragPayload;
    use crate::model::agent::Agent;
    use crate::model::client::Client;
    use crate::model::entity::new_entity_id;
    use crate::pipeline::PipelineError;

    #[test]
    fn payload_rejects_foreign_label() {
        let payload = DragPayload::for_entity::<Agent>(new_entity_id());
        let err = payload
            .entity_id::<Client>()
            .expect_err("agent payload must not decode as client");
        assert!(matches!(
            err,
            PipelineError::PayloadKindMismatch { expected: "clientId", .. }
        ));
    }

    #[test]
    fn payload_rejects_malformed_id() {
        let payload = DragPayload::new("clientId", "not-a-uuid");
        let err = payload.entity_id::<Client>().unwrap_err();
        assert_eq!(err, PipelineError::InvalidPayload("not-a-uuid".to_string()));
    }
}
