//! Substring filtering over entity collections.

use crate::model::agent::{Agent, AgentGroup};
use crate::model::client::Client;
use crate::model::entity::Entity;
use crate::model::node::CanvasNode;
use crate::store::EntityStore;
use once_cell::sync::Lazy;
use regex::Regex;
use std::marker::PhantomData;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Records exposing free-text fields to search.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.company.as_str(),
            self.description.as_str(),
        ]
    }
}

impl Searchable for Agent {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.role.as_str(),
            self.description.as_str(),
        ]
    }
}

impl Searchable for AgentGroup {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

impl Searchable for CanvasNode {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.label.as_str(), self.data.text()]
    }
}

/// Search input for list views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    /// Raw user input.
    pub text: String,
    /// Maximum number of hits; `None` returns every match.
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Normalized needle, or `None` when the query is blank.
    pub fn needle(&self) -> Option<String> {
        let needle = normalize_search_text(&self.text);
        (!needle.is_empty()).then_some(needle)
    }

    /// Whether `record` matches. Blank queries match everything.
    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        match self.needle() {
            Some(needle) => matches_needle(record, &needle),
            None => true,
        }
    }
}

/// Lowercases, trims and collapses whitespace runs to one space.
pub fn normalize_search_text(value: &str) -> String {
    WHITESPACE_RE
        .replace_all(value.trim(), " ")
        .to_lowercase()
}

fn matches_needle<T: Searchable>(record: &T, needle: &str) -> bool {
    record
        .search_fields()
        .into_iter()
        .any(|field| normalize_search_text(field).contains(needle))
}

/// Returns records matching `query`, in collection order.
pub fn filter_entities<'a, T: Searchable>(records: &'a [T], query: &SearchQuery) -> Vec<&'a T> {
    let limit = query.limit.unwrap_or(usize::MAX);
    match query.needle() {
        Some(needle) => records
            .iter()
            .filter(|record| matches_needle(*record, &needle))
            .take(limit)
            .collect(),
        None => records.iter().take(limit).collect(),
    }
}

#[derive(Debug, Clone)]
struct ViewCache {
    store: u64,
    revision: u64,
    query: SearchQuery,
    indices: Vec<usize>,
}

/// Derived search view over one store.
///
/// The cached hit list is reused until either the query or the store revision
/// changes. One view must only be read against one store.
#[derive(Debug, Clone)]
pub struct FilteredView<T> {
    query: SearchQuery,
    cache: Option<ViewCache>,
    recomputes: u64,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Default for FilteredView<T> {
    fn default() -> Self {
        Self {
            query: SearchQuery::default(),
            cache: None,
            recomputes: 0,
            _entity: PhantomData,
        }
    }
}

impl<T: Entity + Searchable> FilteredView<T> {
    pub fn new(query: SearchQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: SearchQuery) {
        self.query = query;
    }

    /// Number of times the hit list was rebuilt.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Current hits against `store`, rebuilt when the query, the store instance or
    /// its revision changed.
    pub fn results<'a>(&mut self, store: &'a EntityStore<T>) -> Vec<&'a T> {
        let records = store.list();
        let fresh = self.cache.as_ref().is_some_and(|cache| {
            cache.store == store.instance_id()
                && cache.revision == store.revision()
                && cache.query == self.query
        });

        if !fresh {
            let needle = self.query.needle();
            let limit = self.query.limit.unwrap_or(usize::MAX);
            let indices = records
                .iter()
                .enumerate()
                .filter(|(_, record)| match &needle {
                    Some(needle) => matches_needle(*record, needle),
                    None => true,
                })
                .map(|(index, _)| index)
                .take(limit)
                .collect();
            self.cache = Some(ViewCache {
                store: store.instance_id(),
                revision: store.revision(),
                query: self.query.clone(),
                indices,
            });
            self.recomputes += 1;
        }

        match &self.cache {
            Some(cache) => cache.indices.iter().map(|index| &records[*index]).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_search_text;

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize_search_text("  Acme \t  CORP\n"), "acme corp");
    }
}
