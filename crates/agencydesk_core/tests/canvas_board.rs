use agencydesk_core::pipeline::node_kind_columns;
use agencydesk_core::{
    Board, CanvasNode, CanvasNodeDraft, CanvasNodePatch, EntityStore, NodeData, NodeKind,
    NodePosition, Workspace,
};

#[test]
fn demo_canvas_groups_nodes_by_kind() {
    let workspace = Workspace::with_demo_data();
    let columns = node_kind_columns();
    assert_eq!(
        columns.iter().map(|column| column.key).collect::<Vec<_>>(),
        NodeKind::ALL.to_vec()
    );

    let board = Board::partition(&columns, workspace.nodes().list());
    assert!(board.unplaced.is_empty());
    assert_eq!(board.placed_count(), workspace.nodes().len());
    assert_eq!(board.column(NodeKind::Trigger).unwrap().len(), 1);
    assert_eq!(board.column(NodeKind::Agent).unwrap().len(), 1);
    assert_eq!(board.column(NodeKind::Action).unwrap().len(), 1);
    assert!(board.column(NodeKind::Condition).unwrap().is_empty());
    assert_eq!(board.column(NodeKind::Condition).unwrap().title, "Conditions");
}

#[test]
fn replacing_node_payload_moves_it_to_the_new_kind_column() {
    let mut store = EntityStore::<CanvasNode>::new();
    let node = store.add(CanvasNodeDraft::new(
        "Check budget",
        NodePosition::new(10.0, 20.0),
        NodeData::Action {
            action: "notify".to_string(),
        },
    ));
    let board = Board::partition(&node_kind_columns(), store.list());
    assert_eq!(board.column_of(node.id), Some(NodeKind::Action));

    store
        .update(
            node.id,
            CanvasNodePatch {
                data: Some(NodeData::Condition {
                    expression: "budget > 1000".to_string(),
                }),
                ..CanvasNodePatch::default()
            },
        )
        .unwrap();

    let board = Board::partition(&node_kind_columns(), store.list());
    assert_eq!(board.column_of(node.id), Some(NodeKind::Condition));
    assert!(board.column(NodeKind::Action).unwrap().is_empty());
}
