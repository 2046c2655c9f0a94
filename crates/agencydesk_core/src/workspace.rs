//! Workspace of entity stores and cross-store rules.
//!
//! # Responsibility
//! - Own the group, agent, client and canvas-node stores.
//! - Enforce rules spanning stores (agent ↔ group membership, node ↔ agent links).
//!
//! # Invariants
//! - Every agent references an existing group.
//! - A group that still owns agents cannot be removed.
//! - Removing an agent clears canvas node references to it.

use crate::forms::{AgentForm, FormError, FormModal};
use crate::model::agent::{
    Agent, AgentDraft, AgentGroup, AgentGroupDraft, AgentGroupPatch, AgentPatch,
};
use crate::model::client::{Client, ClientDraft, ClientStatus};
use crate::model::entity::EntityId;
use crate::model::node::{CanvasNode, CanvasNodeDraft, CanvasNodePatch, NodeData, NodePosition};
use crate::pipeline::{
    agent_group_columns, Board, DragPayload, DragSession, DropOutcome, PipelineError,
};
use crate::store::{EntityStore, StoreError, StoreEvent, SubscriptionId};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Cross-store rule violation or wrapped lower-layer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    GroupNotFound(EntityId),
    /// Group still owns `agents` agents.
    GroupNotEmpty { group_id: EntityId, agents: usize },
    Store(StoreError),
    Pipeline(PipelineError),
    Form(FormError),
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GroupNotFound(id) => write!(f, "agent group not found: {id}"),
            Self::GroupNotEmpty { group_id, agents } => {
                write!(f, "agent group {group_id} still owns {agents} agent(s)")
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::Pipeline(err) => write!(f, "{err}"),
            Self::Form(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Pipeline(err) => Some(err),
            Self::Form(err) => Some(err),
            Self::GroupNotFound(_) | Self::GroupNotEmpty { .. } => None,
        }
    }
}

impl From<StoreError> for WorkspaceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<PipelineError> for WorkspaceError {
    fn from(value: PipelineError) -> Self {
        Self::Pipeline(value)
    }
}

impl From<FormError> for WorkspaceError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

/// All in-memory stores of one running session.
#[derive(Debug, Default)]
pub struct Workspace {
    groups: EntityStore<AgentGroup>,
    agents: EntityStore<Agent>,
    clients: EntityStore<Client>,
    nodes: EntityStore<CanvasNode>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small fixed data set used by the CLI probe and UI previews.
    pub fn with_demo_data() -> Self {
        let mut workspace = Self::new();

        let studio = workspace.add_group(AgentGroupDraft::new(
            "Content Studio",
            "Copy and creative production",
        ));
        let growth = workspace.add_group(AgentGroupDraft::new(
            "Growth Ops",
            "Campaign analytics and outreach",
        ));

        let seeded_agents = [
            AgentDraft::new(studio.id, "Scribe", "Copywriter")
                .with_description("Drafts blog posts and landing page copy"),
            AgentDraft::new(studio.id, "Pixel", "Art director")
                .with_description("Briefs and reviews campaign visuals"),
            AgentDraft::new(growth.id, "Beacon", "Outreach")
                .with_description("Prepares cold email sequences"),
        ];
        let mut writer = None;
        for draft in seeded_agents {
            match workspace.add_agent(draft) {
                Ok(agent) => {
                    writer.get_or_insert(agent.id);
                }
                Err(err) => warn!("event=demo_seed module=workspace status=error error={err}"),
            }
        }

        workspace.clients.add(
            ClientDraft::new("Ada Park", "Acme Corp", "ada@acme.example")
                .with_description("Quarterly brand refresh"),
        );
        workspace.clients.add(
            ClientDraft::new("Hank Scorpio", "Globex", "hank@globex.example")
                .with_status(ClientStatus::Active)
                .with_description("Paid social retainer"),
        );
        workspace.clients.add(
            ClientDraft::new("Bill Lumbergh", "Initech", "bill@initech.example")
                .with_status(ClientStatus::Negotiation)
                .with_phone("+1 555 0100"),
        );

        workspace.nodes.add(CanvasNodeDraft::new(
            "New lead",
            NodePosition::new(80.0, 120.0),
            NodeData::Trigger {
                event: "form_submitted".to_string(),
            },
        ));
        workspace.nodes.add(CanvasNodeDraft::new(
            "Write welcome email",
            NodePosition::new(320.0, 120.0),
            NodeData::Agent {
                agent_id: writer,
                instruction: "Draft a welcome email for the new lead".to_string(),
            },
        ));
        workspace.nodes.add(CanvasNodeDraft::new(
            "Send email",
            NodePosition::new(560.0, 120.0),
            NodeData::Action {
                action: "send_email".to_string(),
            },
        ));

        workspace
    }

    pub fn groups(&self) -> &EntityStore<AgentGroup> {
        &self.groups
    }

    pub fn agents(&self) -> &EntityStore<Agent> {
        &self.agents
    }

    pub fn clients(&self) -> &EntityStore<Client> {
        &self.clients
    }

    /// Mutable client store; client writes have no cross-store checks.
    pub fn clients_mut(&mut self) -> &mut EntityStore<Client> {
        &mut self.clients
    }

    pub fn nodes(&self) -> &EntityStore<CanvasNode> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut EntityStore<CanvasNode> {
        &mut self.nodes
    }

    pub fn subscribe_groups<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &[AgentGroup]) + Send + 'static,
    {
        self.groups.subscribe(observer)
    }

    pub fn subscribe_agents<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &[Agent]) + Send + 'static,
    {
        self.agents.subscribe(observer)
    }

    pub fn add_group(&mut self, draft: AgentGroupDraft) -> AgentGroup {
        self.groups.add(draft)
    }

    pub fn update_group(
        &mut self,
        id: EntityId,
        patch: AgentGroupPatch,
    ) -> WorkspaceResult<AgentGroup> {
        Ok(self.groups.update(id, patch)?)
    }

    /// Removes an empty group.
    ///
    /// # Errors
    /// - `GroupNotEmpty` while any agent references the group.
    /// - `Store(NotFound)` for unknown ids.
    pub fn remove_group(&mut self, id: EntityId) -> WorkspaceResult<AgentGroup> {
        let agents = self.agents_in_group(id).len();
        if agents > 0 {
            warn!(
                "event=group_remove module=workspace status=rejected id={} agents={}",
                id, agents
            );
            return Err(WorkspaceError::GroupNotEmpty {
                group_id: id,
                agents,
            });
        }
        Ok(self.groups.remove(id)?)
    }

    /// Agents owned by `group_id`, in store order.
    pub fn agents_in_group(&self, group_id: EntityId) -> Vec<&Agent> {
        self.agents
            .list()
            .iter()
            .filter(|agent| agent.group_id == group_id)
            .collect()
    }

    /// # Errors
    /// - `GroupNotFound` when `draft.group_id` is unknown.
    pub fn add_agent(&mut self, draft: AgentDraft) -> WorkspaceResult<Agent> {
        self.ensure_group(draft.group_id)?;
        Ok(self.agents.add(draft))
    }

    /// # Errors
    /// - `GroupNotFound` when the patch moves the agent to an unknown group.
    /// - `Store(NotFound)` for unknown agent ids.
    pub fn update_agent(&mut self, id: EntityId, patch: AgentPatch) -> WorkspaceResult<Agent> {
        if let Some(group_id) = patch.group_id {
            self.ensure_group(group_id)?;
        }
        Ok(self.agents.update(id, patch)?)
    }

    /// Removes an agent and unlinks canvas nodes pointing at it.
    pub fn remove_agent(&mut self, id: EntityId) -> WorkspaceResult<Agent> {
        let removed = self.agents.remove(id)?;

        let linked = self
            .nodes
            .list()
            .iter()
            .filter(|node| node.data.agent_id() == Some(id))
            .map(|node| (node.id, node.data.text().to_string()))
            .collect::<Vec<_>>();
        for (node_id, instruction) in linked {
            let patch = CanvasNodePatch {
                data: Some(NodeData::Agent {
                    agent_id: None,
                    instruction,
                }),
                ..CanvasNodePatch::default()
            };
            self.nodes.update(node_id, patch)?;
        }

        Ok(removed)
    }

    /// Agent board with one column per group.
    pub fn agent_board(&self) -> Board<'_, Agent> {
        Board::partition(&agent_group_columns(self.groups.list()), self.agents.list())
    }

    /// Drag session configured with the current groups as columns.
    pub fn agent_drag_session(&self) -> DragSession<Agent> {
        DragSession::new(agent_group_columns(self.groups.list()))
    }

    /// Moves a dragged agent into `target_group`.
    ///
    /// # Errors
    /// - `GroupNotFound` when `target_group` was removed after the session was built.
    /// - `Pipeline(..)` for payload, column or store failures.
    pub fn drop_agent(
        &mut self,
        session: &mut DragSession<Agent>,
        payload: &DragPayload,
        target_group: EntityId,
    ) -> WorkspaceResult<DropOutcome<Agent>> {
        if let Err(err) = self.ensure_group(target_group) {
            session.cancel();
            return Err(err);
        }
        Ok(session.drop_on(&mut self.agents, payload, target_group)?)
    }

    /// Submits an agent modal after checking its group exists.
    pub fn submit_agent_form(
        &mut self,
        modal: &mut FormModal<AgentForm>,
    ) -> WorkspaceResult<Agent> {
        if modal.missing_fields().is_empty() {
            if let Some(group_id) = modal.form.group_id {
                self.ensure_group(group_id)?;
            }
        }
        Ok(modal.submit(&mut self.agents)?)
    }

    fn ensure_group(&self, group_id: EntityId) -> WorkspaceResult<()> {
        if self.groups.contains(group_id) {
            return Ok(());
        }
        info!(
            "event=group_lookup module=workspace status=not_found id={}",
            group_id
        );
        Err(WorkspaceError::GroupNotFound(group_id))
    }
}
