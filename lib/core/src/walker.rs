//! Level-order traversal of the star graph
//!
//! The seed is level 1. A node at level `L` has its edges fetched iff
//! `L <= max_level`; nodes one level further out are discovered and marked
//! visited, but the walk stops as soon as the first of them is dequeued.

use std::collections::VecDeque;

use ahash::AHashSet;
use tracing::{info, warn};

use crate::cache::CacheSink;
use crate::explorer::Explorer;
use crate::node::{NodeId, NodeMeta};
use crate::source::GraphSource;
use crate::{Error, Result};

/// Outcome of a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkReport {
    /// Every node reached, seed first, in discovery order.
    pub visited: Vec<NodeId>,
    /// Nodes taken off the queue and expanded, in processing order.
    pub expanded: Vec<NodeId>,
    /// Expanded nodes that turned out to be neither user nor repository.
    pub unresolved: Vec<NodeId>,
    /// Level of the last expanded node, 0 if none was.
    pub deepest_level: u32,
    /// Whether queued nodes were left behind by the level limit.
    pub cut_off: bool,
}

impl<S: GraphSource, P: CacheSink> Explorer<S, P> {
    /// Breadth-first walk from `seed`, expanding levels `1..=max_level`.
    ///
    /// Neighbors are enqueued in the order the source returned them, each
    /// only by the first parent that discovers it. Any fatal error aborts
    /// the walk; unresolvable nodes are skipped.
    pub async fn walk(&mut self, seed: &str, max_level: u32) -> Result<WalkReport> {
        let mut report = WalkReport {
            visited: vec![seed.to_string()],
            ..Default::default()
        };
        if max_level == 0 {
            report.cut_off = true;
            return Ok(report);
        }

        let mut visited: AHashSet<NodeId> = AHashSet::new();
        visited.insert(seed.to_string());
        let mut queue: VecDeque<NodeId> = VecDeque::from([seed.to_string()]);

        let mut level = 1u32;
        let mut left_in_level = 1usize;
        let mut next_level = 0usize;

        while let Some(current) = queue.pop_front() {
            if left_in_level == 0 {
                level += 1;
                left_in_level = next_level;
                next_level = 0;
                if level > max_level {
                    info!(level, max_level, pending = queue.len() + 1, "depth limit reached");
                    report.cut_off = true;
                    break;
                }
            }
            left_in_level -= 1;

            info!(level, node = %current, "bfs visiting node");
            let neighbors = self.neighbors(&current).await?;
            report.expanded.push(current.clone());
            report.deepest_level = level;

            let Some(neighbors) = neighbors else {
                warn!(node = %current, "node is neither a user nor a repository, skipping");
                report.unresolved.push(current);
                continue;
            };

            for neighbor in neighbors {
                if visited.insert(neighbor.clone()) {
                    report.visited.push(neighbor.clone());
                    queue.push_back(neighbor);
                    next_level += 1;
                }
            }
        }

        Ok(report)
    }

    /// Outgoing edges of `id`, picked by its resolved kind.
    ///
    /// `None` means the node could not be resolved.
    async fn neighbors(&mut self, id: &str) -> Result<Option<Vec<NodeId>>> {
        let meta = match self.resolve(id).await {
            Ok(meta) => meta,
            Err(Error::Unresolvable(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let edges = match meta {
            NodeMeta::User { .. } => self.user_stars(id).await?,
            NodeMeta::Repository { .. } => self.repo_stargazers(id).await?,
        };
        Ok(Some(edges.unwrap_or_default()))
    }
}
