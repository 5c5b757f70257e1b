use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::node::{NodeId, NodeMeta};
use crate::Result;

/// The three caches a crawl reads and grows.
///
/// Node metadata is immutable once recorded. Edge lists are only ever
/// inserted whole, after every page of the connection was fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphCache {
    nodes: BTreeMap<NodeId, NodeMeta>,
    user_stars: BTreeMap<NodeId, Vec<NodeId>>,
    repo_stargazers: BTreeMap<NodeId, Vec<NodeId>>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a cache from previously persisted maps.
    pub fn from_parts(
        nodes: BTreeMap<NodeId, NodeMeta>,
        user_stars: BTreeMap<NodeId, Vec<NodeId>>,
        repo_stargazers: BTreeMap<NodeId, Vec<NodeId>>,
    ) -> Self {
        Self {
            nodes,
            user_stars,
            repo_stargazers,
        }
    }

    #[inline]
    pub fn node(&self, id: &str) -> Option<&NodeMeta> {
        self.nodes.get(id)
    }

    /// Record metadata for `id` unless it is already known.
    ///
    /// Returns `true` if the entry was new.
    pub fn insert_node(&mut self, id: NodeId, meta: NodeMeta) -> bool {
        match self.nodes.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(meta);
                true
            }
        }
    }

    #[inline]
    pub fn user_stars(&self, id: &str) -> Option<&[NodeId]> {
        self.user_stars.get(id).map(Vec::as_slice)
    }

    #[inline]
    pub fn repo_stargazers(&self, id: &str) -> Option<&[NodeId]> {
        self.repo_stargazers.get(id).map(Vec::as_slice)
    }

    pub fn insert_user_stars(&mut self, id: NodeId, repos: Vec<NodeId>) {
        self.user_stars.insert(id, repos);
    }

    pub fn insert_repo_stargazers(&mut self, id: NodeId, users: Vec<NodeId>) {
        self.repo_stargazers.insert(id, users);
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, NodeMeta> {
        &self.nodes
    }

    pub fn all_user_stars(&self) -> &BTreeMap<NodeId, Vec<NodeId>> {
        &self.user_stars
    }

    pub fn all_repo_stargazers(&self) -> &BTreeMap<NodeId, Vec<NodeId>> {
        &self.repo_stargazers
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            nodes: self.nodes.len(),
            users_expanded: self.user_stars.len(),
            repositories_expanded: self.repo_stargazers.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub nodes: usize,
    pub users_expanded: usize,
    pub repositories_expanded: usize,
}

/// Destination for full cache dumps.
pub trait CacheSink {
    /// Overwrite the persisted state with `cache` in full.
    fn flush(&self, cache: &GraphCache) -> Result<()>;
}

impl<T: CacheSink + ?Sized> CacheSink for &T {
    fn flush(&self, cache: &GraphCache) -> Result<()> {
        (**self).flush(cache)
    }
}
