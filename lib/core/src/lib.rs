//! # stargraph Core
//!
//! Core library for crawling the bipartite "user starred repository" graph.
//!
//! This crate provides the data model and the traversal engine:
//!
//! - [`NodeMeta`] - A node resolved as a user or a repository
//! - [`GraphCache`] - Node metadata plus the two edge caches
//! - [`GraphQuery`] - Parameterized GraphQL queries
//! - [`GraphSource`] / [`CacheSink`] - Transport and persistence seams
//! - [`Explorer`] - Node resolver, paginated edge fetchers and BFS walker
//!
//! ## Example
//!
//! ```rust,no_run
//! use serde_json::Value;
//! use stargraph_core::{CacheSink, Explorer, GraphCache, GraphQuery, GraphSource, Result};
//!
//! struct Offline;
//!
//! impl GraphSource for Offline {
//!     async fn execute(&self, _query: &GraphQuery) -> Result<Value> {
//!         Ok(Value::Null)
//!     }
//! }
//!
//! struct Discard;
//!
//! impl CacheSink for Discard {
//!     fn flush(&self, _cache: &GraphCache) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! async fn crawl() -> Result<()> {
//!     let mut explorer = Explorer::new(Offline, Discard, GraphCache::new());
//!     let report = explorer.walk("MDEwOlJlcG9zaXRvcnkxMTc1MTM4NTI=", 3).await?;
//!     println!("visited {} nodes", report.visited.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod explorer;
mod fetch;
pub mod node;
pub mod query;
mod resolver;
pub mod response;
pub mod source;
pub mod walker;

#[cfg(test)]
mod testing;

pub use cache::{CacheSink, CacheStats, GraphCache};
pub use config::{CrawlConfig, DEFAULT_MAX_LEVEL, DEFAULT_SEED};
pub use error::{Error, Result};
pub use explorer::Explorer;
pub use node::{Neighbor, NodeId, NodeMeta, Page};
pub use query::{GraphQuery, QueryKind, PAGE_SIZE};
pub use source::GraphSource;
pub use walker::WalkReport;
