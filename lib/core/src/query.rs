//! Parameterized GraphQL queries
//!
//! Every query text is a static template. Ids, logins, repository names and
//! cursors travel as GraphQL variables, so no caller-supplied value is ever
//! spliced into the query string.

use serde_json::{json, Value};

/// Number of edges requested per page. Also the API maximum.
pub const PAGE_SIZE: usize = 100;

const NODE_QUERY: &str = r#"query($id: ID!) {
  node(id: $id) {
    ... on Repository {
      owner {
        login
      }
      name
    }
    ... on User {
      login
    }
  }
}"#;

const STARRED_REPOSITORIES_QUERY: &str = r#"query($login: String!, $first: Int!, $after: String) {
  user(login: $login) {
    starredRepositories(first: $first, after: $after) {
      edges {
        node {
          id
          owner {
            login
          }
          name
        }
      }
      pageInfo {
        endCursor
        hasNextPage
      }
    }
  }
}"#;

const STARGAZERS_QUERY: &str = r#"query($owner: String!, $name: String!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    stargazers(first: $first, after: $after) {
      edges {
        node {
          id
          login
        }
      }
      pageInfo {
        endCursor
        hasNextPage
      }
    }
  }
}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Node,
    StarredRepositories,
    Stargazers,
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            QueryKind::Node => "node",
            QueryKind::StarredRepositories => "starredRepositories",
            QueryKind::Stargazers => "stargazers",
        };
        f.write_str(name)
    }
}

/// A query ready to be posted to the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQuery {
    pub kind: QueryKind,
    pub query: &'static str,
    pub variables: Value,
}

impl GraphQuery {
    /// Look up a node by id, asking for both the repository and the user shape.
    pub fn node(id: &str) -> Self {
        Self {
            kind: QueryKind::Node,
            query: NODE_QUERY,
            variables: json!({ "id": id }),
        }
    }

    /// One page of the repositories `login` has starred.
    pub fn starred_repositories(login: &str, first: usize, after: Option<&str>) -> Self {
        Self {
            kind: QueryKind::StarredRepositories,
            query: STARRED_REPOSITORIES_QUERY,
            variables: json!({ "login": login, "first": first, "after": after }),
        }
    }

    /// One page of the users who starred `owner/name`.
    pub fn stargazers(owner: &str, name: &str, first: usize, after: Option<&str>) -> Self {
        Self {
            kind: QueryKind::Stargazers,
            query: STARGAZERS_QUERY,
            variables: json!({ "owner": owner, "name": name, "first": first, "after": after }),
        }
    }

    /// Request body in the shape the GraphQL endpoint expects.
    pub fn to_body(&self) -> Value {
        json!({ "query": self.query, "variables": self.variables })
    }

    /// The `after` cursor of a paginated query, if any.
    pub fn cursor(&self) -> Option<&str> {
        self.variables.get("after").and_then(Value::as_str)
    }

    /// A string variable by name.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.variables.get(name).and_then(Value::as_str)
    }
}
