//! Domain model for the back-office views.
//!
//! # Responsibility
//! - Define the records held by entity stores (groups, agents, clients, nodes).
//! - Define draft/patch shapes used by create and update paths.
//!
//! # Invariants
//! - Every record is identified by a stable `EntityId` assigned at creation.
//! - Every record belongs to exactly one group key at any time.

pub mod agent;
pub mod client;
pub mod entity;
pub mod node;
