use agencydesk_core::{
    AgentDraft, AgentForm, AgentGroupDraft, AgentPatch, DragPayload, FormError, FormModal,
    NodeData, PipelineError, StoreEvent, Workspace, WorkspaceError,
};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[test]
fn agent_requires_existing_group() {
    let mut workspace = Workspace::new();
    let missing = Uuid::now_v7();

    let err = workspace
        .add_agent(AgentDraft::new(missing, "Scribe", "Copywriter"))
        .unwrap_err();
    assert_eq!(err, WorkspaceError::GroupNotFound(missing));
    assert!(workspace.agents().is_empty());
}

#[test]
fn update_agent_rejects_unknown_target_group() {
    let mut workspace = Workspace::new();
    let group = workspace.add_group(AgentGroupDraft::new("Studio", ""));
    let agent = workspace
        .add_agent(AgentDraft::new(group.id, "Scribe", "Copywriter"))
        .unwrap();

    let missing = Uuid::now_v7();
    let err = workspace
        .update_agent(
            agent.id,
            AgentPatch {
                group_id: Some(missing),
                ..AgentPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, WorkspaceError::GroupNotFound(missing));
    assert_eq!(workspace.agents().get(agent.id).unwrap().group_id, group.id);
}

#[test]
fn non_empty_group_cannot_be_removed() {
    let mut workspace = Workspace::new();
    let group = workspace.add_group(AgentGroupDraft::new("Studio", ""));
    let agent = workspace
        .add_agent(AgentDraft::new(group.id, "Scribe", "Copywriter"))
        .unwrap();

    let err = workspace.remove_group(group.id).unwrap_err();
    assert_eq!(
        err,
        WorkspaceError::GroupNotEmpty {
            group_id: group.id,
            agents: 1
        }
    );

    workspace.remove_agent(agent.id).unwrap();
    assert_eq!(workspace.remove_group(group.id).unwrap().id, group.id);
    assert!(workspace.groups().is_empty());
}

#[test]
fn removing_agent_unlinks_canvas_nodes() {
    let mut workspace = Workspace::with_demo_data();
    let linked = workspace
        .nodes()
        .list()
        .iter()
        .find_map(|node| node.data.agent_id().map(|agent_id| (node.id, agent_id)))
        .expect("demo canvas links an agent");

    workspace.remove_agent(linked.1).unwrap();

    let node = workspace.nodes().get(linked.0).unwrap();
    match &node.data {
        NodeData::Agent {
            agent_id,
            instruction,
        } => {
            assert_eq!(*agent_id, None);
            assert!(!instruction.is_empty());
        }
        other => panic!("unexpected node payload: {other:?}"),
    }
}

#[test]
fn agents_move_between_group_columns() {
    let mut workspace = Workspace::new();
    let studio = workspace.add_group(AgentGroupDraft::new("Studio", ""));
    let growth = workspace.add_group(AgentGroupDraft::new("Growth", ""));
    let agent = workspace
        .add_agent(AgentDraft::new(studio.id, "Scribe", "Copywriter"))
        .unwrap();

    let mut session = workspace.agent_drag_session();
    let payload = session.begin(&agent);
    assert_eq!(payload.label, "agentId");
    let outcome = workspace
        .drop_agent(&mut session, &payload, growth.id)
        .unwrap();
    assert!(outcome.moved());

    let board = workspace.agent_board();
    assert!(board.column(studio.id).unwrap().is_empty());
    assert_eq!(board.column(growth.id).unwrap().items[0].id, agent.id);
    assert_eq!(board.columns[1].title, "Growth");
}

#[test]
fn drop_on_removed_group_is_rejected() {
    let mut workspace = Workspace::new();
    let studio = workspace.add_group(AgentGroupDraft::new("Studio", ""));
    let doomed = workspace.add_group(AgentGroupDraft::new("Doomed", ""));
    let agent = workspace
        .add_agent(AgentDraft::new(studio.id, "Scribe", "Copywriter"))
        .unwrap();

    let mut session = workspace.agent_drag_session();
    let payload = session.begin(&agent);
    workspace.remove_group(doomed.id).unwrap();

    let err = workspace
        .drop_agent(&mut session, &payload, doomed.id)
        .unwrap_err();
    assert_eq!(err, WorkspaceError::GroupNotFound(doomed.id));
    assert!(!session.is_dragging());
    assert_eq!(workspace.agents().get(agent.id).unwrap().group_id, studio.id);

    let foreign = DragPayload::new("clientId", agent.id.to_string());
    let err = workspace
        .drop_agent(&mut session, &foreign, studio.id)
        .unwrap_err();
    assert!(matches!(
        err,
        WorkspaceError::Pipeline(PipelineError::PayloadKindMismatch { .. })
    ));
}

#[test]
fn agent_modal_checks_group_before_submit() {
    let mut workspace = Workspace::new();
    let group = workspace.add_group(AgentGroupDraft::new("Studio", ""));
    let mut modal = FormModal::<AgentForm>::new();
    modal.open_create();
    modal.form.name = "Scribe".to_string();
    modal.form.role = "Copywriter".to_string();

    let err = workspace.submit_agent_form(&mut modal).unwrap_err();
    assert_eq!(err, WorkspaceError::Form(FormError::MissingFields(vec!["group"])));

    let missing = Uuid::now_v7();
    modal.form.group_id = Some(missing);
    let err = workspace.submit_agent_form(&mut modal).unwrap_err();
    assert_eq!(err, WorkspaceError::GroupNotFound(missing));
    assert!(modal.is_open());

    modal.form.group_id = Some(group.id);
    let agent = workspace.submit_agent_form(&mut modal).unwrap();
    assert_eq!(agent.group_id, group.id);
    assert_eq!(workspace.agents_in_group(group.id).len(), 1);
    assert!(!modal.is_open());
}

#[test]
fn group_and_agent_subscribers_see_workspace_mutations() {
    let mut workspace = Workspace::new();
    let group_events = Arc::new(Mutex::new(Vec::new()));
    let agent_events = Arc::new(Mutex::new(Vec::new()));
    let group_sink = Arc::clone(&group_events);
    let agent_sink = Arc::clone(&agent_events);
    workspace.subscribe_groups(move |event, groups| {
        group_sink.lock().unwrap().push((*event, groups.len()));
    });
    workspace.subscribe_agents(move |event, agents| {
        agent_sink.lock().unwrap().push((*event, agents.len()));
    });

    let group = workspace.add_group(AgentGroupDraft::new("Studio", ""));
    let agent = workspace
        .add_agent(AgentDraft::new(group.id, "Scribe", "Copywriter"))
        .unwrap();
    workspace.remove_agent(agent.id).unwrap();
    workspace.remove_group(group.id).unwrap();

    assert_eq!(
        group_events.lock().unwrap().as_slice(),
        &[
            (StoreEvent::Added(group.id), 1),
            (StoreEvent::Removed(group.id), 0)
        ]
    );
    assert_eq!(
        agent_events.lock().unwrap().as_slice(),
        &[
            (StoreEvent::Added(agent.id), 1),
            (StoreEvent::Removed(agent.id), 0)
        ]
    );
}
