// Users and repositories on the star graph
use serde::{Deserialize, Serialize};

/// Opaque GraphQL node id.
pub type NodeId = String;

/// Identifying attributes of a resolved node.
///
/// Serialized untagged so a cache entry is either `{"owner": .., "name": ..}`
/// or `{"login": ..}`. The repository shape is tried first, matching the
/// classification order of node lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeMeta {
    Repository { owner: String, name: String },
    User { login: String },
}

impl NodeMeta {
    #[inline]
    #[must_use]
    pub fn user(login: impl Into<String>) -> Self {
        NodeMeta::User { login: login.into() }
    }

    #[inline]
    #[must_use]
    pub fn repository(owner: impl Into<String>, name: impl Into<String>) -> Self {
        NodeMeta::Repository {
            owner: owner.into(),
            name: name.into(),
        }
    }

    #[inline]
    pub fn is_user(&self) -> bool {
        matches!(self, NodeMeta::User { .. })
    }

    #[inline]
    pub fn is_repository(&self) -> bool {
        matches!(self, NodeMeta::Repository { .. })
    }
}

impl std::fmt::Display for NodeMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeMeta::Repository { owner, name } => write!(f, "{}/{}", owner, name),
            NodeMeta::User { login } => write!(f, "@{}", login),
        }
    }
}

/// A node returned inline on an edge, with the attributes the page carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    pub id: NodeId,
    pub meta: NodeMeta,
}

impl Neighbor {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<NodeId>, meta: NodeMeta) -> Self {
        Self { id: id.into(), meta }
    }
}

/// One page of a cursor-paginated connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub neighbors: Vec<Neighbor>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}
