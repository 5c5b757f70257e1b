// In-memory star graph and sinks for unit tests
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde_json::{json, Value};

use crate::cache::{CacheSink, GraphCache};
use crate::node::NodeMeta;
use crate::query::{GraphQuery, QueryKind};
use crate::source::GraphSource;
use crate::{Error, Result};

pub(crate) fn ids(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}{}", prefix, i)).collect()
}

/// Star graph served the way the GraphQL endpoint pages it.
///
/// Cursors are the decimal offset of the next edge. Every query is
/// recorded; `fail_at(n)` makes the n-th call (1-based) a transport error.
#[derive(Default)]
pub(crate) struct FakeSource {
    nodes: HashMap<String, NodeMeta>,
    edges: HashMap<String, Vec<String>>,
    calls: RefCell<Vec<GraphQuery>>,
    fail_at: Option<usize>,
    no_connections: bool,
    stuck_cursor: bool,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, id: &str, login: &str, starred: &[&str]) -> Self {
        self.nodes.insert(id.to_string(), NodeMeta::user(login));
        self.edges
            .insert(id.to_string(), starred.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn repo(mut self, id: &str, owner: &str, name: &str, stargazers: &[&str]) -> Self {
        self.nodes.insert(id.to_string(), NodeMeta::repository(owner, name));
        self.edges
            .insert(id.to_string(), stargazers.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn fail_at(mut self, call: usize) -> Self {
        self.fail_at = Some(call);
        self
    }

    /// Answer connection queries as if the user or repository vanished.
    pub fn forget_connections(mut self) -> Self {
        self.no_connections = true;
        self
    }

    /// Serve the first page forever, always with the same cursor.
    pub fn stuck_cursor(mut self) -> Self {
        self.stuck_cursor = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls_of(&self, kind: QueryKind) -> usize {
        self.calls.borrow().iter().filter(|q| q.kind == kind).count()
    }

    pub fn cursors(&self, kind: QueryKind) -> Vec<Option<String>> {
        self.calls
            .borrow()
            .iter()
            .filter(|q| q.kind == kind)
            .map(|q| q.cursor().map(str::to_string))
            .collect()
    }

    /// Whether any recorded query carried `value` in one of its variables.
    pub fn touched(&self, value: &str) -> bool {
        self.calls.borrow().iter().any(|q| {
            q.variables
                .as_object()
                .map(|vars| vars.values().any(|v| v.as_str() == Some(value)))
                .unwrap_or(false)
        })
    }

    fn find(&self, wanted: &NodeMeta) -> Option<&String> {
        self.nodes
            .iter()
            .find(|(_, meta)| *meta == wanted)
            .map(|(id, _)| id)
    }

    fn connection(&self, id: &str, query: &GraphQuery) -> Value {
        let all = self.edges.get(id).cloned().unwrap_or_default();
        let first = query.variables["first"].as_u64().unwrap_or(100) as usize;
        if self.stuck_cursor {
            let edges: Vec<Value> = all
                .iter()
                .take(first)
                .map(|n| json!({ "node": edge_node(n, &self.nodes[n]) }))
                .collect();
            return json!({
                "edges": edges,
                "pageInfo": { "endCursor": "stuck", "hasNextPage": true }
            });
        }
        let start = query
            .cursor()
            .map(|c| c.parse::<usize>().expect("numeric cursor"))
            .unwrap_or(0);
        let end = (start + first).min(all.len());

        let edges: Vec<Value> = all[start..end]
            .iter()
            .map(|n| json!({ "node": edge_node(n, &self.nodes[n]) }))
            .collect();
        let end_cursor = if end > start { Some(end.to_string()) } else { None };

        json!({
            "edges": edges,
            "pageInfo": { "endCursor": end_cursor, "hasNextPage": end < all.len() }
        })
    }
}

fn edge_node(id: &str, meta: &NodeMeta) -> Value {
    match meta {
        NodeMeta::Repository { owner, name } => {
            json!({ "id": id, "owner": { "login": owner }, "name": name })
        }
        NodeMeta::User { login } => json!({ "id": id, "login": login }),
    }
}

impl GraphSource for FakeSource {
    async fn execute(&self, query: &GraphQuery) -> Result<Value> {
        self.calls.borrow_mut().push(query.clone());
        if self.fail_at == Some(self.calls()) {
            return Err(Error::Transport(
                "Query failed to run by returning code of 502".to_string(),
            ));
        }

        let data = match query.kind {
            QueryKind::Node => {
                let node = query.var("id").and_then(|id| self.nodes.get(id));
                match node {
                    Some(NodeMeta::Repository { owner, name }) => {
                        json!({ "node": { "owner": { "login": owner }, "name": name } })
                    }
                    Some(NodeMeta::User { login }) => json!({ "node": { "login": login } }),
                    None => json!({ "node": null }),
                }
            }
            QueryKind::StarredRepositories => {
                let wanted = NodeMeta::user(query.var("login").unwrap_or_default());
                match self.find(&wanted).filter(|_| !self.no_connections) {
                    Some(id) => json!({ "user": { "starredRepositories": self.connection(id, query) } }),
                    None => json!({ "user": null }),
                }
            }
            QueryKind::Stargazers => {
                let wanted = NodeMeta::repository(
                    query.var("owner").unwrap_or_default(),
                    query.var("name").unwrap_or_default(),
                );
                match self.find(&wanted).filter(|_| !self.no_connections) {
                    Some(id) => json!({ "repository": { "stargazers": self.connection(id, query) } }),
                    None => json!({ "repository": null }),
                }
            }
        };
        Ok(data)
    }
}

/// Sink that keeps the last flushed state in memory.
#[derive(Default)]
pub(crate) struct CountingSink {
    flushes: Cell<usize>,
    last: RefCell<Option<GraphCache>>,
}

impl CountingSink {
    pub fn flushes(&self) -> usize {
        self.flushes.get()
    }

    pub fn last(&self) -> Option<GraphCache> {
        self.last.borrow().clone()
    }
}

impl CacheSink for CountingSink {
    fn flush(&self, cache: &GraphCache) -> Result<()> {
        self.flushes.set(self.flushes.get() + 1);
        *self.last.borrow_mut() = Some(cache.clone());
        Ok(())
    }
}
