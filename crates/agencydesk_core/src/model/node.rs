//! Automation canvas nodes.
//!
//! # Responsibility
//! - Model canvas nodes with a typed payload per node kind.
//!
//! # Invariants
//! - A node's kind is derived from its `data` variant; the two never diverge.

use crate::model::entity::{Entity, EntityId, EntityKind, Grouped};
use serde::{Deserialize, Serialize};

/// Canvas coordinates in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
}

impl NodePosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Node type tag used for palette grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Trigger,
    Agent,
    Action,
    Condition,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Trigger,
        NodeKind::Agent,
        NodeKind::Action,
        NodeKind::Condition,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Trigger => "Triggers",
            Self::Agent => "Agents",
            Self::Action => "Actions",
            Self::Condition => "Conditions",
        }
    }
}

/// Kind-specific node payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeData {
    /// Starts a flow, e.g. "form_submitted".
    Trigger { event: String },
    /// Hands work to an agent; `agent_id` is unset until one is picked.
    Agent {
        agent_id: Option<EntityId>,
        instruction: String,
    },
    Action { action: String },
    Condition { expression: String },
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Trigger { .. } => NodeKind::Trigger,
            Self::Agent { .. } => NodeKind::Agent,
            Self::Action { .. } => NodeKind::Action,
            Self::Condition { .. } => NodeKind::Condition,
        }
    }

    /// Empty payload for a node freshly dropped from the palette.
    pub fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Trigger => Self::Trigger {
                event: String::new(),
            },
            NodeKind::Agent => Self::Agent {
                agent_id: None,
                instruction: String::new(),
            },
            NodeKind::Action => Self::Action {
                action: String::new(),
            },
            NodeKind::Condition => Self::Condition {
                expression: String::new(),
            },
        }
    }

    /// Free-text payload field, if any.
    pub fn text(&self) -> &str {
        match self {
            Self::Trigger { event } => event,
            Self::Agent { instruction, .. } => instruction,
            Self::Action { action } => action,
            Self::Condition { expression } => expression,
        }
    }

    /// Agent referenced by this payload.
    pub fn agent_id(&self) -> Option<EntityId> {
        match self {
            Self::Agent { agent_id, .. } => *agent_id,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: EntityId,
    pub label: String,
    pub position: NodePosition,
    pub data: NodeData,
}

impl CanvasNode {
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasNodeDraft {
    pub label: String,
    pub position: NodePosition,
    pub data: NodeData,
}

impl CanvasNodeDraft {
    pub fn new(label: impl Into<String>, position: NodePosition, data: NodeData) -> Self {
        Self {
            label: label.into(),
            position,
            data,
        }
    }
}

/// Partial update; `data` replaces the whole payload, which may change the kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanvasNodePatch {
    pub label: Option<String>,
    pub position: Option<NodePosition>,
    pub data: Option<NodeData>,
}

impl Entity for CanvasNode {
    type Draft = CanvasNodeDraft;
    type Patch = CanvasNodePatch;

    const KIND: EntityKind = EntityKind::CanvasNode;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: CanvasNodeDraft) -> Self {
        Self {
            id,
            label: draft.label,
            position: draft.position,
            data: draft.data,
        }
    }

    fn apply_patch(&mut self, patch: CanvasNodePatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(data) = patch.data {
            self.data = data;
        }
    }
}

impl Grouped for CanvasNode {
    type Key = NodeKind;

    fn group_key(&self) -> NodeKind {
        self.kind()
    }
}
