use agencydesk_core::pipeline::client_columns;
use agencydesk_core::{
    Board, Client, ClientDraft, ClientPatch, ClientStatus, ColumnSpec, DragSession, EntityStore,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn status_strategy() -> impl Strategy<Value = ClientStatus> {
    prop::sample::select(ClientStatus::ALL.to_vec())
}

fn store_from(statuses: &[ClientStatus]) -> EntityStore<Client> {
    let mut store = EntityStore::new();
    for (index, status) in statuses.iter().enumerate() {
        store.add(
            ClientDraft::new(format!("c{index}"), format!("Co {index}"), "c@co.test")
                .with_status(*status),
        );
    }
    store
}

proptest! {
    #[test]
    fn generated_ids_are_pairwise_distinct(count in 0usize..200) {
        let mut store = EntityStore::<Client>::new();
        for index in 0..count {
            store.add(ClientDraft::new(format!("c{index}"), "Co", "c@co.test"));
        }
        let ids = store.list().iter().map(|c| c.id).collect::<HashSet<_>>();
        prop_assert_eq!(ids.len(), count);
    }

    #[test]
    fn update_touches_only_patched_fields(
        name in prop::option::of("[a-z]{1,12}"),
        description in prop::option::of("[a-z ]{0,24}"),
        status in prop::option::of(status_strategy()),
    ) {
        let mut store = EntityStore::<Client>::new();
        let original = store.add(
            ClientDraft::new("Ada", "Acme", "ada@acme.test").with_description("seed"),
        );
        let patch = ClientPatch {
            name: name.clone(),
            description: description.clone(),
            status,
            ..ClientPatch::default()
        };

        let updated = store.update(original.id, patch).unwrap();
        prop_assert_eq!(updated.name, name.unwrap_or(original.name));
        prop_assert_eq!(updated.description, description.unwrap_or(original.description));
        prop_assert_eq!(updated.status, status.unwrap_or(original.status));
        prop_assert_eq!(updated.company, original.company);
        prop_assert_eq!(updated.email, original.email);
        prop_assert_eq!(updated.phone, original.phone);
    }

    #[test]
    fn partition_covers_exactly_the_known_statuses(
        statuses in prop::collection::vec(status_strategy(), 0..40),
        configured in prop::collection::hash_set(status_strategy(), 0..4),
    ) {
        let store = store_from(&statuses);
        let columns = ClientStatus::ALL
            .into_iter()
            .filter(|status| configured.contains(status))
            .map(|status| ColumnSpec::new(status, status.label()))
            .collect::<Vec<_>>();

        let board = Board::partition(&columns, store.list());
        let placed = board
            .columns
            .iter()
            .flat_map(|column| column.items.iter().map(|c| c.id))
            .collect::<HashSet<_>>();
        let expected = store
            .list()
            .iter()
            .filter(|c| configured.contains(&c.status))
            .map(|c| c.id)
            .collect::<HashSet<_>>();

        prop_assert_eq!(&placed, &expected);
        prop_assert_eq!(board.placed_count(), expected.len());
        prop_assert_eq!(board.placed_count() + board.unplaced.len(), store.len());
    }

    #[test]
    fn drop_on_current_column_is_observably_a_no_op(
        statuses in prop::collection::vec(status_strategy(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut store = store_from(&statuses);
        let before = store.list().to_vec();
        let target = pick.get(&before).clone();
        let mut session = DragSession::new(client_columns());

        let payload = session.begin(&target);
        let outcome = session.drop_on(&mut store, &payload, target.status).unwrap();

        prop_assert!(!outcome.moved());
        prop_assert_eq!(store.list(), before.as_slice());
    }
}
