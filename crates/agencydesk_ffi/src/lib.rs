//! Flutter-facing bindings for AgencyDesk core.

pub mod api;
