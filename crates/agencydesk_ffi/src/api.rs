//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose shell navigation and client pipeline use-cases to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` + message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - All calls share one in-process shell session; no state is persisted.

use agencydesk_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppShell, Client, ClientDraft, ClientPatch, ClientStatus, DragPayload, EntityId, NavParams,
    SearchQuery, View, Workspace,
};
use log::error;
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;

const SEARCH_DEFAULT_LIMIT: u32 = 20;
const SEARCH_LIMIT_MAX: u32 = 50;

static SESSION: OnceLock<Mutex<AppShell>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// Returns an empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Client card as rendered by the pipeline and list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientItem {
    pub id: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
    pub description: String,
    /// Wire status (`PROSPECT|NEGOTIATION|ACTIVE|INACTIVE`).
    pub status: String,
}

/// One pipeline column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientColumn {
    pub status: String,
    pub title: String,
    pub items: Vec<ClientItem>,
}

/// Full client board snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBoardResponse {
    pub columns: Vec<ClientColumn>,
    /// Clients whose status has no column on this board.
    pub unplaced: Vec<ClientItem>,
    pub message: String,
}

/// Search envelope for the client list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSearchResponse {
    pub items: Vec<ClientItem>,
    pub message: String,
    pub applied_limit: u32,
}

/// Native drag-data entry produced when a card is picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStartResponse {
    pub ok: bool,
    /// Drag-data label, e.g. `clientId`.
    pub label: String,
    pub value: String,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Affected entity id, when any.
    pub entity_id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, entity_id: Option<String>) -> Self {
        Self {
            ok: true,
            entity_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entity_id: None,
            message: message.into(),
        }
    }
}

/// Shell view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellStateResponse {
    pub view: String,
    pub selected_id: Option<String>,
    pub group_id: Option<String>,
}

/// Switches the dashboard view.
///
/// Unknown view names or malformed ids return `ok=false` and leave the view unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn shell_navigate(
    view: String,
    selected_id: Option<String>,
    group_id: Option<String>,
) -> ActionResponse {
    let Some(target) = View::parse(view.as_str()) else {
        return ActionResponse::failure(format!("shell_navigate failed: unknown view `{view}`"));
    };
    let params = match (parse_optional_id(selected_id), parse_optional_id(group_id)) {
        (Ok(selected_id), Ok(group_id)) => NavParams {
            selected_id,
            group_id,
        },
        (Err(message), _) | (_, Err(message)) => {
            return ActionResponse::failure(format!("shell_navigate failed: {message}"));
        }
    };

    with_shell(|shell| {
        shell.navigate(target, params);
        ActionResponse::success(format!("Switched to {}.", target.as_str()), None)
    })
    .unwrap_or_else(ActionResponse::failure)
}

/// Returns the current view and navigation parameters.
#[flutter_rust_bridge::frb(sync)]
pub fn shell_current_view() -> ShellStateResponse {
    with_shell(|shell| {
        let params = shell.params();
        ShellStateResponse {
            view: shell.current_view().as_str().to_string(),
            selected_id: params.selected_id.map(|id| id.to_string()),
            group_id: params.group_id.map(|id| id.to_string()),
        }
    })
    .unwrap_or_else(|_| ShellStateResponse {
        view: View::default().as_str().to_string(),
        selected_id: None,
        group_id: None,
    })
}

/// Creates a client from the new-client modal.
///
/// Required: `name`, `company`, `email`. `status` defaults to `PROSPECT` when blank.
#[flutter_rust_bridge::frb(sync)]
pub fn client_create(
    name: String,
    company: String,
    email: String,
    phone: Option<String>,
    description: String,
    status: Option<String>,
) -> ActionResponse {
    let mut missing = Vec::new();
    for (field, value) in [("name", &name), ("company", &company), ("email", &email)] {
        if value.trim().is_empty() {
            missing.push(field);
        }
    }
    if !missing.is_empty() {
        return ActionResponse::failure(format!(
            "client_create failed: missing required fields: {}",
            missing.join(", ")
        ));
    }

    let status = match status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => match ClientStatus::parse(value) {
            Some(status) => Some(status),
            None => {
                return ActionResponse::failure(format!(
                    "client_create failed: unknown status `{value}`"
                ));
            }
        },
        None => None,
    };

    let draft = ClientDraft {
        name: name.trim().to_string(),
        company: company.trim().to_string(),
        email: email.trim().to_string(),
        phone: phone
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()),
        description: description.trim().to_string(),
        status,
    };

    with_shell(|shell| {
        let client = shell.workspace_mut().clients_mut().add(draft);
        ActionResponse::success("Client created.", Some(client.id.to_string()))
    })
    .unwrap_or_else(ActionResponse::failure)
}

/// Sets a client's status without a drag gesture.
#[flutter_rust_bridge::frb(sync)]
pub fn client_update_status(client_id: String, status: String) -> ActionResponse {
    let id = match parse_id(client_id.as_str()) {
        Ok(id) => id,
        Err(message) => {
            return ActionResponse::failure(format!("client_update_status failed: {message}"));
        }
    };
    let Some(status) = ClientStatus::parse(status.as_str()) else {
        return ActionResponse::failure(format!(
            "client_update_status failed: unknown status `{status}`"
        ));
    };

    with_shell(|shell| {
        match shell
            .workspace_mut()
            .clients_mut()
            .update(id, ClientPatch::status(status))
        {
            Ok(client) => ActionResponse::success("Client updated.", Some(client.id.to_string())),
            Err(err) => ActionResponse::failure(format!("client_update_status failed: {err}")),
        }
    })
    .unwrap_or_else(ActionResponse::failure)
}

/// Deletes a client.
#[flutter_rust_bridge::frb(sync)]
pub fn client_delete(client_id: String) -> ActionResponse {
    let id = match parse_id(client_id.as_str()) {
        Ok(id) => id,
        Err(message) => {
            return ActionResponse::failure(format!("client_delete failed: {message}"));
        }
    };

    with_shell(|shell| match shell.workspace_mut().clients_mut().remove(id) {
        Ok(client) => ActionResponse::success("Client deleted.", Some(client.id.to_string())),
        Err(err) => ActionResponse::failure(format!("client_delete failed: {err}")),
    })
    .unwrap_or_else(ActionResponse::failure)
}

/// Returns the pipeline board partitioned by status.
#[flutter_rust_bridge::frb(sync)]
pub fn client_board() -> ClientBoardResponse {
    with_shell(|shell| {
        let board = shell.client_board();
        let columns = board
            .columns
            .iter()
            .map(|column| ClientColumn {
                status: column.key.as_str().to_string(),
                title: column.title.clone(),
                items: column.items.iter().map(|client| to_client_item(client)).collect(),
            })
            .collect::<Vec<_>>();
        let unplaced = board
            .unplaced
            .iter()
            .map(|client| to_client_item(client))
            .collect::<Vec<_>>();
        let message = format!("{} client(s) on board.", board.placed_count());
        ClientBoardResponse {
            columns,
            unplaced,
            message,
        }
    })
    .unwrap_or_else(|message| ClientBoardResponse {
        columns: Vec::new(),
        unplaced: Vec::new(),
        message,
    })
}

/// Picks up a client card and returns the drag-data entry to attach.
#[flutter_rust_bridge::frb(sync)]
pub fn client_drag_start(client_id: String) -> DragStartResponse {
    let failure = |message: String| DragStartResponse {
        ok: false,
        label: String::new(),
        value: String::new(),
        message,
    };
    let id = match parse_id(client_id.as_str()) {
        Ok(id) => id,
        Err(message) => return failure(format!("client_drag_start failed: {message}")),
    };

    with_shell(|shell| match shell.begin_client_drag(id) {
        Some(payload) => DragStartResponse {
            ok: true,
            label: payload.label,
            value: payload.value,
            message: "Drag started.".to_string(),
        },
        None => failure(format!("client_drag_start failed: client not found: {id}")),
    })
    .unwrap_or_else(failure)
}

/// Drops a dragged client onto the `target_status` column.
#[flutter_rust_bridge::frb(sync)]
pub fn client_drop(label: String, value: String, target_status: String) -> ActionResponse {
    let Some(target) = ClientStatus::parse(target_status.as_str()) else {
        return ActionResponse::failure(format!(
            "client_drop failed: unknown status `{target_status}`"
        ));
    };
    let payload = DragPayload::new(label, value);

    with_shell(|shell| match shell.drop_client(&payload, target) {
        Ok(outcome) => {
            let message = if outcome.moved() {
                format!("Moved to {}.", outcome.to.as_str())
            } else {
                "Status unchanged.".to_string()
            };
            ActionResponse::success(message, Some(outcome.entity.id.to_string()))
        }
        Err(err) => ActionResponse::failure(format!("client_drop failed: {err}")),
    })
    .unwrap_or_else(ActionResponse::failure)
}

/// Filters clients by name, company or description.
#[flutter_rust_bridge::frb(sync)]
pub fn client_search(text: String, limit: Option<u32>) -> ClientSearchResponse {
    let applied_limit = normalize_search_limit(limit);
    let query = SearchQuery::new(text).with_limit(applied_limit as usize);

    with_shell(|shell| {
        let items = shell
            .search_clients(query)
            .into_iter()
            .map(to_client_item)
            .collect::<Vec<_>>();
        let message = if items.is_empty() {
            "No results.".to_string()
        } else {
            format!("Found {} result(s).", items.len())
        };
        ClientSearchResponse {
            items,
            message,
            applied_limit,
        }
    })
    .unwrap_or_else(|message| ClientSearchResponse {
        items: Vec::new(),
        message,
        applied_limit,
    })
}

fn with_shell<T>(f: impl FnOnce(&mut AppShell) -> T) -> Result<T, String> {
    let mut guard = lock_session()?;
    Ok(f(&mut *guard))
}

fn lock_session() -> Result<MutexGuard<'static, AppShell>, String> {
    SESSION
        .get_or_init(|| Mutex::new(AppShell::new(Workspace::new())))
        .lock()
        .map_err(|_| {
            error!("event=session_lock module=ffi status=error error_code=poisoned");
            "shell session is unavailable".to_string()
        })
}

fn parse_id(value: &str) -> Result<EntityId, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid id `{value}`"))
}

fn parse_optional_id(value: Option<String>) -> Result<Option<EntityId>, String> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_id(text).map(Some),
    }
}

fn normalize_search_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(value) if value > 0 => value.min(SEARCH_LIMIT_MAX),
        _ => SEARCH_DEFAULT_LIMIT,
    }
}

fn to_client_item(client: &Client) -> ClientItem {
    ClientItem {
        id: client.id.to_string(),
        name: client.name.clone(),
        company: client.company.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        description: client.description.clone(),
        status: client.status.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        client_board, client_create, client_delete, client_drag_start, client_drop,
        client_search, normalize_search_limit, parse_optional_id, ping, shell_current_view,
        shell_navigate,
    };

    // One test drives the shared session so parallel tests cannot interleave.
    #[test]
    fn client_pipeline_flow_over_ffi() {
        let created = client_create(
            "Ada".to_string(),
            "Acme Corp".to_string(),
            "ada@acme.test".to_string(),
            None,
            String::new(),
            Some("prospect".to_string()),
        );
        assert!(created.ok, "{}", created.message);
        let id = created.entity_id.expect("created client id");

        let drag = client_drag_start(id.clone());
        assert!(drag.ok, "{}", drag.message);
        assert_eq!(drag.label, "clientId");

        let dropped = client_drop(drag.label, drag.value, "ACTIVE".to_string());
        assert!(dropped.ok, "{}", dropped.message);
        assert_eq!(dropped.message, "Moved to ACTIVE.");

        let board = client_board();
        let active = board
            .columns
            .iter()
            .find(|column| column.status == "ACTIVE")
            .expect("active column");
        assert!(active.items.iter().any(|item| item.id == id));

        let hits = client_search("ACME".to_string(), None);
        assert_eq!(hits.items.len(), 1);
        assert_eq!(hits.applied_limit, 20);

        let nav = shell_navigate("clients".to_string(), Some(id.clone()), None);
        assert!(nav.ok);
        assert_eq!(shell_current_view().selected_id, Some(id.clone()));

        assert!(client_delete(id.clone()).ok);
        assert!(!client_delete(id).ok);
    }

    #[test]
    fn create_rejects_missing_fields_and_unknown_status() {
        let missing = client_create(
            " ".to_string(),
            "Acme".to_string(),
            String::new(),
            None,
            String::new(),
            None,
        );
        assert!(!missing.ok);
        assert!(missing.message.contains("name, email"));

        let bad_status = client_create(
            "Ada".to_string(),
            "Acme".to_string(),
            "ada@acme.test".to_string(),
            None,
            String::new(),
            Some("archived".to_string()),
        );
        assert!(!bad_status.ok);
    }

    #[test]
    fn helpers_normalize_input() {
        assert_eq!(ping(), "pong");
        assert_eq!(normalize_search_limit(None), 20);
        assert_eq!(normalize_search_limit(Some(0)), 20);
        assert_eq!(normalize_search_limit(Some(500)), 50);
        assert_eq!(parse_optional_id(Some("  ".to_string())), Ok(None));
        assert!(parse_optional_id(Some("nope".to_string())).is_err());
        assert!(!shell_navigate("settings".to_string(), None, None).ok);
    }
}
