//! Generic entity store with change subscriptions.
//!
//! # Invariants
//! - Ids are unique within a store and never re-issued.
//! - Insertion order is preserved; updates never move a record.
//! - Observers run synchronously after the mutation, in subscription order.
//! - `(instance_id, revision)` identifies one observable state across all stores.

use crate::model::entity::{new_entity_id, Entity, EntityId, EntityKind};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STORE_INSTANCE: AtomicU64 = AtomicU64::new(1);

pub type StoreResult<T> = Result<T, StoreError>;

/// Store mutation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with `id` exists in the `kind` collection.
    NotFound { kind: EntityKind, id: EntityId },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{} not found: {id}", kind.label()),
        }
    }
}

impl Error for StoreError {}

/// Change notification delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Added(EntityId),
    Updated(EntityId),
    Removed(EntityId),
}

impl StoreEvent {
    pub fn entity_id(&self) -> EntityId {
        match self {
            Self::Added(id) | Self::Updated(id) | Self::Removed(id) => *id,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Added(_) => "entity_add",
            Self::Updated(_) => "entity_update",
            Self::Removed(_) => "entity_remove",
        }
    }
}

/// Handle returned by [`EntityStore::subscribe`].
pub type SubscriptionId = u64;

/// Observer callback: receives the event and the full collection after it.
type Observer<T> = Box<dyn FnMut(&StoreEvent, &[T]) + Send>;

/// Ordered in-memory collection for one entity kind.
pub struct EntityStore<T: Entity> {
    records: Vec<T>,
    observers: Vec<(SubscriptionId, Observer<T>)>,
    next_subscription: SubscriptionId,
    instance: u64,
    revision: u64,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            observers: Vec::new(),
            next_subscription: 1,
            instance: NEXT_STORE_INSTANCE.fetch_add(1, Ordering::Relaxed),
            revision: 0,
        }
    }
}

impl<T: Entity + Debug> Debug for EntityStore<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("kind", &T::KIND)
            .field("records", &self.records)
            .field("observers", &self.observers.len())
            .field("instance", &self.instance)
            .field("revision", &self.revision)
            .finish()
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record built from `draft` under a freshly generated id.
    ///
    /// Always succeeds; the created record is returned for convenience.
    pub fn add(&mut self, draft: T::Draft) -> T {
        let mut id = new_entity_id();
        while self.contains(id) {
            id = new_entity_id();
        }

        let record = T::from_draft(id, draft);
        self.records.push(record.clone());
        self.commit(StoreEvent::Added(id));
        record
    }

    /// Shallow-merges `patch` into the record with `id`.
    ///
    /// A patch that repeats current values still counts as a mutation.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no record has `id`; the collection is untouched.
    pub fn update(&mut self, id: EntityId, patch: T::Patch) -> StoreResult<T> {
        let Some(index) = self.position(id) else {
            return Err(self.not_found("entity_update", id));
        };

        let record = &mut self.records[index];
        record.apply_patch(patch);
        let updated = record.clone();
        self.commit(StoreEvent::Updated(id));
        Ok(updated)
    }

    /// Removes the record with `id` and returns it.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no record has `id`.
    pub fn remove(&mut self, id: EntityId) -> StoreResult<T> {
        let Some(index) = self.position(id) else {
            return Err(self.not_found("entity_remove", id));
        };

        let removed = self.records.remove(index);
        self.commit(StoreEvent::Removed(id));
        Ok(removed)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.position(id).is_some()
    }

    /// Full collection in insertion order.
    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Process-unique id of this store; never shared by two live stores.
    pub fn instance_id(&self) -> u64 {
        self.instance
    }

    /// Mutation counter; bumped once per add/update/remove.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers an observer called after every mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &[T]) + Send + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drops an observer. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(subscription, _)| *subscription != id);
        self.observers.len() != before
    }

    fn position(&self, id: EntityId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn commit(&mut self, event: StoreEvent) {
        self.revision += 1;
        debug!(
            "event={} module=store status=ok kind={} id={} revision={} size={}",
            event.name(),
            T::KIND.as_str(),
            event.entity_id(),
            self.revision,
            self.records.len()
        );
        for (_, observer) in self.observers.iter_mut() {
            observer(&event, &self.records);
        }
    }

    fn not_found(&self, event: &str, id: EntityId) -> StoreError {
        warn!(
            "event={} module=store status=not_found kind={} id={}",
            event,
            T::KIND.as_str(),
            id
        );
        StoreError::NotFound { kind: T::KIND, id }
    }
}
