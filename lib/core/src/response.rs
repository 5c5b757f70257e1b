// Decoding of GraphQL `data` objects into pages and node metadata
use serde::Deserialize;
use serde_json::Value;

use crate::node::{Neighbor, NodeMeta, Page};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct Owner {
    login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    end_cursor: Option<String>,
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
struct Edge<N> {
    node: N,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection<N> {
    edges: Vec<Edge<N>>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    id: String,
    owner: Owner,
    name: String,
}

#[derive(Debug, Deserialize)]
struct UserNode {
    id: String,
    login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserStars {
    starred_repositories: Connection<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryStargazers {
    stargazers: Connection<UserNode>,
}

#[derive(Debug, Deserialize)]
struct StarsData {
    user: Option<UserStars>,
}

#[derive(Debug, Deserialize)]
struct StargazersData {
    repository: Option<RepositoryStargazers>,
}

/// Classify the answer to a node lookup.
///
/// Returns `None` when the node is missing or is neither a repository nor a user.
pub fn decode_node(data: &Value) -> Option<NodeMeta> {
    let node = data.get("node")?;
    let owner = node
        .get("owner")
        .and_then(|o| o.get("login"))
        .and_then(Value::as_str);
    let name = node.get("name").and_then(Value::as_str);
    if let (Some(owner), Some(name)) = (owner, name) {
        return Some(NodeMeta::repository(owner, name));
    }
    node.get("login")
        .and_then(Value::as_str)
        .map(|login| NodeMeta::user(login))
}

/// Decode one page of `user.starredRepositories`.
pub fn decode_starred_repositories(data: Value, login: &str) -> Result<Page> {
    let data: StarsData = serde_json::from_value(data)?;
    let connection = data
        .user
        .ok_or_else(|| Error::Query(format!("user '{}' not found", login)))?
        .starred_repositories;

    into_page(connection, |node| {
        Neighbor::new(node.id, NodeMeta::repository(node.owner.login, node.name))
    })
}

/// Decode one page of `repository.stargazers`.
pub fn decode_stargazers(data: Value, owner: &str, name: &str) -> Result<Page> {
    let data: StargazersData = serde_json::from_value(data)?;
    let connection = data
        .repository
        .ok_or_else(|| Error::Query(format!("repository '{}/{}' not found", owner, name)))?
        .stargazers;

    into_page(connection, |node| Neighbor::new(node.id, NodeMeta::user(node.login)))
}

fn into_page<N>(connection: Connection<N>, to_neighbor: impl Fn(N) -> Neighbor) -> Result<Page> {
    let PageInfo {
        end_cursor,
        has_next_page,
    } = connection.page_info;

    if has_next_page && end_cursor.is_none() {
        return Err(Error::Query(
            "page reports a next page but carries no end cursor".to_string(),
        ));
    }

    Ok(Page {
        neighbors: connection.edges.into_iter().map(|e| to_neighbor(e.node)).collect(),
        end_cursor,
        has_next_page,
    })
}
