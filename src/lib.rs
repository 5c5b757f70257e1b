//! # stargraph
//!
//! Breadth-first crawler over the bipartite "user starred repository" graph
//! of GitHub, backed by the GraphQL API and a local JSON cache.
//!
//! Starting from a seed node (a user or a repository), stargraph expands
//! each user into the repositories they starred and each repository into
//! its stargazers, level by level, up to a fixed depth. Every discovered
//! relationship and node is cached to disk, so reruns only pay for what is
//! new.
//!
//! ## Quick Start
//!
//! ```bash
//! echo "ghp_yourtoken" > token
//! stargraph --init-cache --max-level 3
//! ```
//!
//! ## Crate Structure
//!
//! - `stargraph-core` - Node model, cache context, queries, resolver, edge fetchers, BFS walker
//! - `stargraph-storage` - The three JSON cache files
//! - `stargraph-github` - HTTPS transport and token handling

use tracing::info;

// Re-export core types
pub use stargraph_core::{
    CacheSink, CacheStats, CrawlConfig, Error, Explorer, GraphCache, GraphQuery, GraphSource,
    NodeId, NodeMeta, QueryKind, Result, WalkReport, DEFAULT_MAX_LEVEL, DEFAULT_SEED, PAGE_SIZE,
};

// Re-export storage
pub use stargraph_storage::CacheFiles;

// Re-export transport
pub use stargraph_github::{Credential, GithubClient, GITHUB_GRAPHQL_URL};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        crawl, CacheFiles, CacheSink, CrawlConfig, Credential, Error, Explorer, GithubClient,
        GraphCache, GraphSource, NodeMeta, Result, WalkReport, DEFAULT_MAX_LEVEL, DEFAULT_SEED,
        GITHUB_GRAPHQL_URL, PAGE_SIZE,
    };
}

/// Run one crawl as configured and flush the cache when it completes.
///
/// Returns the walk report together with the grown cache. A fatal error
/// aborts the crawl; whatever was flushed after the last completed edge
/// fetch stays on the sink.
pub async fn crawl<S: GraphSource, P: CacheSink>(
    source: S,
    sink: P,
    cache: GraphCache,
    config: &CrawlConfig,
) -> Result<(WalkReport, GraphCache)> {
    config.validate()?;

    let mut explorer = Explorer::new(source, sink, cache).with_page_size(config.page_size);
    let report = explorer.walk(&config.seed, config.max_level).await?;
    explorer.flush()?;

    let stats = explorer.cache().stats();
    info!(
        visited = report.visited.len(),
        expanded = report.expanded.len(),
        unresolved = report.unresolved.len(),
        deepest_level = report.deepest_level,
        cached_nodes = stats.nodes,
        cached_users = stats.users_expanded,
        cached_repositories = stats.repositories_expanded,
        "crawl finished"
    );
    Ok((report, explorer.into_cache()))
}
