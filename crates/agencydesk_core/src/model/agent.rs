//! Agent groups and AI agents.
//!
//! # Invariants
//! - Every agent references exactly one owning group through `group_id`.
//! - Group existence is enforced by [`Workspace`](crate::workspace::Workspace),
//!   not by the agent store itself.

use crate::model::entity::{Entity, EntityId, EntityKind, Grouped, Transition};
use serde::{Deserialize, Serialize};

/// Folder that owns a set of agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentGroup {
    pub id: EntityId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentGroupDraft {
    pub name: String,
    pub description: String,
}

impl AgentGroupDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentGroupPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Entity for AgentGroup {
    type Draft = AgentGroupDraft;
    type Patch = AgentGroupPatch;

    const KIND: EntityKind = EntityKind::AgentGroup;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: AgentGroupDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
        }
    }

    fn apply_patch(&mut self, patch: AgentGroupPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Run state shown on an agent card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Active,
    #[default]
    Idle,
    Paused,
}

/// AI agent configured by the agency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: EntityId,
    pub group_id: EntityId,
    pub name: String,
    /// Short job title, e.g. "Copywriter".
    pub role: String,
    pub description: String,
    pub status: AgentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDraft {
    pub group_id: EntityId,
    pub name: String,
    pub role: String,
    pub description: String,
    /// `None` falls back to `AgentStatus::Idle`.
    pub status: Option<AgentStatus>,
}

impl AgentDraft {
    pub fn new(group_id: EntityId, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            group_id,
            name: name.into(),
            role: role.into(),
            description: String::new(),
            status: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: AgentStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentPatch {
    pub group_id: Option<EntityId>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub status: Option<AgentStatus>,
}

impl Entity for Agent {
    type Draft = AgentDraft;
    type Patch = AgentPatch;

    const KIND: EntityKind = EntityKind::Agent;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: AgentDraft) -> Self {
        Self {
            id,
            group_id: draft.group_id,
            name: draft.name,
            role: draft.role,
            description: draft.description,
            status: draft.status.unwrap_or_default(),
        }
    }

    fn apply_patch(&mut self, patch: AgentPatch) {
        if let Some(group_id) = patch.group_id {
            self.group_id = group_id;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl Grouped for Agent {
    type Key = EntityId;

    fn group_key(&self) -> EntityId {
        self.group_id
    }
}

impl Transition for Agent {
    fn transition_patch(target: EntityId) -> AgentPatch {
        AgentPatch {
            group_id: Some(target),
            ..AgentPatch::default()
        }
    }
}
