// Paginated edge fetchers: user -> starred repositories, repository -> stargazers
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::CacheSink;
use crate::explorer::Explorer;
use crate::node::{Neighbor, NodeId, NodeMeta, Page};
use crate::query::GraphQuery;
use crate::response::{decode_stargazers, decode_starred_repositories};
use crate::source::GraphSource;
use crate::{Error, Result};

impl<S: GraphSource, P: CacheSink> Explorer<S, P> {
    /// Repositories starred by the user `id`.
    ///
    /// Returns `Ok(None)` when `id` is a repository. A cached list is returned
    /// as is; otherwise every page is fetched, the list is cached and the
    /// cache is flushed. A failure on any page leaves the cache untouched.
    pub async fn user_stars(&mut self, id: &str) -> Result<Option<Vec<NodeId>>> {
        let login = match self.resolve(id).await? {
            NodeMeta::User { login } => login,
            NodeMeta::Repository { .. } => return Ok(None),
        };
        if let Some(repos) = self.cache.user_stars(id) {
            return Ok(Some(repos.to_vec()));
        }

        let first = self.page_size;
        let repos = self
            .fetch_all(
                id,
                |after| GraphQuery::starred_repositories(&login, first, after),
                |data| decode_starred_repositories(data, &login),
            )
            .await?;

        info!(node = id, login = %login, starred = repos.len(), "fetched starred repositories");
        self.cache.insert_user_stars(id.to_string(), repos.clone());
        self.flush()?;
        Ok(Some(repos))
    }

    /// Users who starred the repository `id`.
    ///
    /// The mirror of [`Explorer::user_stars`]: `Ok(None)` when `id` is a user.
    pub async fn repo_stargazers(&mut self, id: &str) -> Result<Option<Vec<NodeId>>> {
        let (owner, name) = match self.resolve(id).await? {
            NodeMeta::Repository { owner, name } => (owner, name),
            NodeMeta::User { .. } => return Ok(None),
        };
        if let Some(users) = self.cache.repo_stargazers(id) {
            return Ok(Some(users.to_vec()));
        }

        let first = self.page_size;
        let users = self
            .fetch_all(
                id,
                |after| GraphQuery::stargazers(&owner, &name, first, after),
                |data| decode_stargazers(data, &owner, &name),
            )
            .await?;

        info!(node = id, owner = %owner, name = %name, stargazers = users.len(), "fetched stargazers");
        self.cache.insert_repo_stargazers(id.to_string(), users.clone());
        self.flush()?;
        Ok(Some(users))
    }

    /// Walk a connection from the first page to the last.
    ///
    /// Neighbor metadata is committed to the cache only once the final page
    /// arrived, so an aborted fetch leaves no trace.
    async fn fetch_all<Q, D>(&mut self, id: &str, build: Q, decode: D) -> Result<Vec<NodeId>>
    where
        Q: Fn(Option<&str>) -> GraphQuery,
        D: Fn(Value) -> Result<Page>,
    {
        let mut neighbors: Vec<Neighbor> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let query = build(cursor.as_deref());
            let page = decode(self.source.execute(&query).await?)?;
            pages += 1;
            neighbors.extend(page.neighbors);
            debug!(node = id, kind = %query.kind, pages, edges = neighbors.len(), "fetched page");

            if !page.has_next_page {
                break;
            }
            if page.end_cursor == cursor {
                return Err(Error::Query(format!(
                    "{} for {} repeated cursor {:?}",
                    query.kind, id, cursor
                )));
            }
            cursor = page.end_cursor;
        }

        let mut ids = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            self.cache.insert_node(neighbor.id.clone(), neighbor.meta);
            ids.push(neighbor.id);
        }
        Ok(ids)
    }
}
