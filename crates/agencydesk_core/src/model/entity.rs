//! Shared entity contracts.
//!
//! # Responsibility
//! - Define the identity type and entity kind tags shared by every store.
//! - Define the traits stores, pipelines and forms are generic over.
//!
//! # Invariants
//! - `EntityId` values are generated once and never reassigned.
//! - `Entity::apply_patch` only overwrites fields present in the patch.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

/// Stable identifier for every record held by an entity store.
///
/// UUID v7 keeps generated ids time-ordered.
pub type EntityId = Uuid;

/// Generates a fresh entity identifier.
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}

/// Kind tag for every entity collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    AgentGroup,
    Agent,
    Client,
    CanvasNode,
}

impl EntityKind {
    /// Stable machine name used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AgentGroup => "agent_group",
            Self::Agent => "agent",
            Self::Client => "client",
            Self::CanvasNode => "canvas_node",
        }
    }

    /// Human-readable name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::AgentGroup => "agent group",
            Self::Agent => "agent",
            Self::Client => "client",
            Self::CanvasNode => "canvas node",
        }
    }

    /// Fixed drag-data label carrying an id of this kind.
    pub fn drag_label(self) -> &'static str {
        match self {
            Self::AgentGroup => "groupId",
            Self::Agent => "agentId",
            Self::Client => "clientId",
            Self::CanvasNode => "nodeId",
        }
    }
}

/// Record owned by an [`EntityStore`](crate::store::EntityStore).
pub trait Entity: Clone {
    /// Creation payload without `id`.
    type Draft;
    /// Partial update; every present field overwrites the stored value.
    type Patch;

    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    /// Builds a record from a draft, filling defaults for unspecified fields.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Shallow-merges `patch` into this record.
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Records that can be partitioned into board columns.
pub trait Grouped {
    type Key: Copy + Eq + Debug;

    fn group_key(&self) -> Self::Key;
}

/// Grouped records that can be moved between columns.
pub trait Transition: Entity + Grouped {
    /// Patch that moves a record into the `target` group and touches nothing else.
    fn transition_patch(target: Self::Key) -> Self::Patch;
}
