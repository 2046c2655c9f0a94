//! Column partitioning for kanban boards.

use crate::model::agent::AgentGroup;
use crate::model::client::ClientStatus;
use crate::model::entity::{Entity, EntityId, Grouped};
use crate::model::node::NodeKind;
use log::warn;

/// Configured board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec<K> {
    pub key: K,
    pub title: String,
}

impl<K> ColumnSpec<K> {
    pub fn new(key: K, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
        }
    }
}

/// Default client pipeline: one column per status, in declaration order.
pub fn client_columns() -> Vec<ColumnSpec<ClientStatus>> {
    ClientStatus::ALL
        .into_iter()
        .map(|status| ColumnSpec::new(status, status.label()))
        .collect()
}

/// One column per agent group, in group store order.
pub fn agent_group_columns(groups: &[AgentGroup]) -> Vec<ColumnSpec<EntityId>> {
    groups
        .iter()
        .map(|group| ColumnSpec::new(group.id, group.name.clone()))
        .collect()
}

/// Canvas palette grouping.
pub fn node_kind_columns() -> Vec<ColumnSpec<NodeKind>> {
    NodeKind::ALL
        .into_iter()
        .map(|kind| ColumnSpec::new(kind, kind.label()))
        .collect()
}

/// Column with the records currently assigned to it.
#[derive(Debug, Clone)]
pub struct BoardColumn<'a, T: Grouped> {
    pub key: T::Key,
    pub title: String,
    /// Store order, not drag order.
    pub items: Vec<&'a T>,
}

impl<T: Grouped> BoardColumn<'_, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Partitioned snapshot of a collection.
#[derive(Debug, Clone)]
pub struct Board<'a, T: Grouped> {
    pub columns: Vec<BoardColumn<'a, T>>,
    /// Records whose key matches no configured column.
    pub unplaced: Vec<&'a T>,
}

impl<'a, T: Entity + Grouped> Board<'a, T> {
    /// Buckets `records` by group key.
    ///
    /// A record goes to the first column with a matching key. Records with no
    /// matching column are kept in `unplaced` and logged.
    pub fn partition(columns: &[ColumnSpec<T::Key>], records: &'a [T]) -> Self {
        let mut board_columns = columns
            .iter()
            .map(|spec| BoardColumn {
                key: spec.key,
                title: spec.title.clone(),
                items: Vec::new(),
            })
            .collect::<Vec<_>>();
        let mut unplaced = Vec::new();

        for record in records {
            let key = record.group_key();
            match board_columns.iter_mut().find(|column| column.key == key) {
                Some(column) => column.items.push(record),
                None => {
                    warn!(
                        "event=pipeline_partition module=pipeline status=unplaced kind={} id={} key={:?}",
                        T::KIND.as_str(),
                        record.id(),
                        key
                    );
                    unplaced.push(record);
                }
            }
        }

        Self {
            columns: board_columns,
            unplaced,
        }
    }

    pub fn column(&self, key: T::Key) -> Option<&BoardColumn<'a, T>> {
        self.columns.iter().find(|column| column.key == key)
    }

    /// Column key currently holding `id`, if placed.
    pub fn column_of(&self, id: EntityId) -> Option<T::Key> {
        self.columns
            .iter()
            .find(|column| column.items.iter().any(|item| item.id() == id))
            .map(|column| column.key)
    }

    /// Number of records placed in some column.
    pub fn placed_count(&self) -> usize {
        self.columns.iter().map(BoardColumn::len).sum()
    }
}
