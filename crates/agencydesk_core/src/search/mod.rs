//! In-memory search entry points.
//!
//! # Responsibility
//! - Filter store collections by case-insensitive substring queries.
//! - Cache derived results until the query or the store revision changes.
//!
//! # Invariants
//! - Filtering never mutates a store.
//! - Results keep store insertion order.

pub mod filter;

pub use filter::{filter_entities, normalize_search_text, FilteredView, SearchQuery, Searchable};
