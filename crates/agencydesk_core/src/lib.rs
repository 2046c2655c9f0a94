//! Core domain logic for AgencyDesk.
//! This crate is the single source of truth for back-office state and its invariants.

pub mod forms;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod search;
pub mod shell;
pub mod store;
pub mod workspace;

pub use forms::{AgentForm, ClientForm, EntityForm, FormError, FormModal, GroupForm, ModalMode};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::agent::{
    Agent, AgentDraft, AgentGroup, AgentGroupDraft, AgentGroupPatch, AgentPatch, AgentStatus,
};
pub use model::client::{Client, ClientDraft, ClientPatch, ClientStatus};
pub use model::entity::{Entity, EntityId, EntityKind, Grouped, Transition};
pub use model::node::{
    CanvasNode, CanvasNodeDraft, CanvasNodePatch, NodeData, NodeKind, NodePosition,
};
pub use pipeline::{
    Board, BoardColumn, ColumnSpec, DragPayload, DragSession, DropOutcome, PipelineError,
};
pub use search::{filter_entities, FilteredView, SearchQuery, Searchable};
pub use shell::{AppShell, NavParams, View};
pub use store::{EntityStore, StoreError, StoreEvent, StoreResult, SubscriptionId};
pub use workspace::{Workspace, WorkspaceError, WorkspaceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
