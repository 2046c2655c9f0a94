//! In-memory entity stores.
//!
//! # Responsibility
//! - Own one ordered collection per entity kind.
//! - Funnel every mutation through add/update/remove and notify subscribers.
//!
//! # Invariants
//! - Lookups by unknown id return `StoreError::NotFound`; nothing is ignored silently.
//! - Every mutation bumps the store revision exactly once.

pub mod entity_store;

pub use entity_store::{EntityStore, StoreError, StoreEvent, StoreResult, SubscriptionId};
