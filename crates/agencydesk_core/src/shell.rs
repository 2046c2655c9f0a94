//! Application shell state.
//!
//! # Responsibility
//! - Track the selected view and its transient navigation parameters.
//! - Compose the workspace with the client pipeline and search views.
//!
//! # Invariants
//! - Navigation parameters never outlive the navigation that set them.
//! - The shell stores ids only; records are always read from the workspace.

use crate::model::agent::Agent;
use crate::model::client::{Client, ClientStatus};
use crate::model::entity::EntityId;
use crate::pipeline::{
    client_columns, Board, ColumnSpec, DragPayload, DragSession, DropOutcome, PipelineResult,
};
use crate::search::{FilteredView, SearchQuery};
use crate::workspace::Workspace;
use log::info;
use serde::{Deserialize, Serialize};

/// Top-level dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Agents,
    Tasks,
    Clients,
    Calendar,
    Email,
    Finance,
    Canvas,
}

impl View {
    /// Sidebar order.
    pub const ALL: [View; 8] = [
        View::Dashboard,
        View::Agents,
        View::Tasks,
        View::Clients,
        View::Calendar,
        View::Email,
        View::Finance,
        View::Canvas,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Agents => "agents",
            Self::Tasks => "tasks",
            Self::Clients => "clients",
            Self::Calendar => "calendar",
            Self::Email => "email",
            Self::Finance => "finance",
            Self::Canvas => "canvas",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|view| view.as_str() == normalized)
    }
}

/// Transient parameters passed along with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavParams {
    /// Record opened in the target view's detail panel.
    pub selected_id: Option<EntityId>,
    /// Agent group pre-selected in the agents view.
    pub group_id: Option<EntityId>,
}

impl NavParams {
    pub fn selected(id: EntityId) -> Self {
        Self {
            selected_id: Some(id),
            ..Self::default()
        }
    }

    pub fn group(group_id: EntityId) -> Self {
        Self {
            group_id: Some(group_id),
            ..Self::default()
        }
    }
}

/// Dashboard shell: view state plus the workspace it hosts.
#[derive(Debug)]
pub struct AppShell {
    workspace: Workspace,
    view: View,
    params: NavParams,
    client_drag: DragSession<Client>,
    client_filter: FilteredView<Client>,
}

impl Default for AppShell {
    fn default() -> Self {
        Self::new(Workspace::default())
    }
}

impl AppShell {
    pub fn new(workspace: Workspace) -> Self {
        Self::with_client_columns(workspace, client_columns())
    }

    /// Shell with a custom client pipeline layout.
    pub fn with_client_columns(
        workspace: Workspace,
        columns: Vec<ColumnSpec<ClientStatus>>,
    ) -> Self {
        Self {
            workspace,
            view: View::default(),
            params: NavParams::default(),
            client_drag: DragSession::new(columns),
            client_filter: FilteredView::default(),
        }
    }

    pub fn current_view(&self) -> View {
        self.view
    }

    pub fn params(&self) -> NavParams {
        self.params
    }

    /// Switches view; parameters not passed are cleared.
    pub fn navigate(&mut self, view: View, params: NavParams) {
        info!(
            "event=navigate module=shell status=ok from={} to={} selected={} group={}",
            self.view.as_str(),
            view.as_str(),
            params.selected_id.is_some(),
            params.group_id.is_some()
        );
        if view != self.view {
            self.client_drag.cancel();
        }
        self.view = view;
        self.params = params;
    }

    /// Changes the selection inside the current view.
    pub fn select(&mut self, id: Option<EntityId>) {
        self.params.selected_id = id;
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    /// Selected client, if the selection still exists.
    pub fn selected_client(&self) -> Option<&Client> {
        let id = self.params.selected_id?;
        self.workspace.clients().get(id)
    }

    /// Selected agent, if the selection still exists.
    pub fn selected_agent(&self) -> Option<&Agent> {
        let id = self.params.selected_id?;
        self.workspace.agents().get(id)
    }

    pub fn client_columns(&self) -> &[ColumnSpec<ClientStatus>] {
        self.client_drag.columns()
    }

    pub fn client_board(&self) -> Board<'_, Client> {
        Board::partition(self.client_drag.columns(), self.workspace.clients().list())
    }

    pub fn client_drag(&self) -> &DragSession<Client> {
        &self.client_drag
    }

    pub fn client_drag_mut(&mut self) -> &mut DragSession<Client> {
        &mut self.client_drag
    }

    /// Starts dragging the client with `id`. Returns `None` for unknown ids.
    pub fn begin_client_drag(&mut self, id: EntityId) -> Option<DragPayload> {
        let client = self.workspace.clients().get(id)?;
        Some(self.client_drag.begin(client))
    }

    /// Completes a client drop onto `target`.
    pub fn drop_client(
        &mut self,
        payload: &DragPayload,
        target: ClientStatus,
    ) -> PipelineResult<DropOutcome<Client>> {
        self.client_drag
            .drop_on(self.workspace.clients_mut(), payload, target)
    }

    /// Clients matching `query`; cached until the query or client store changes.
    pub fn search_clients(&mut self, query: SearchQuery) -> Vec<&Client> {
        self.client_filter.set_query(query);
        self.client_filter.results(self.workspace.clients())
    }

    pub fn client_filter(&self) -> &FilteredView<Client> {
        &self.client_filter
    }
}

#[cfg(test)]
mod tests {
    use super::View;

    #[test]
    fn view_parse_roundtrips_every_view() {
        for view in View::ALL {
            assert_eq!(View::parse(view.as_str()), Some(view));
        }
        assert_eq!(View::parse(" Clients "), Some(View::Clients));
        assert_eq!(View::parse("settings"), None);
    }
}
