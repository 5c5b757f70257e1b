// Node resolution with memoization in the metadata cache
use tracing::{debug, trace};

use crate::cache::CacheSink;
use crate::explorer::Explorer;
use crate::node::NodeMeta;
use crate::query::GraphQuery;
use crate::response::decode_node;
use crate::source::GraphSource;
use crate::{Error, Result};

impl<S: GraphSource, P: CacheSink> Explorer<S, P> {
    /// Classify `id` as a user or a repository.
    ///
    /// A cached entry is returned without touching the source. Otherwise a
    /// single node lookup is issued and a successful answer is cached.
    /// Ids that are neither kind yield [`Error::Unresolvable`] and are not
    /// cached, so a later call asks again.
    pub async fn resolve(&mut self, id: &str) -> Result<NodeMeta> {
        if let Some(meta) = self.cache.node(id) {
            return Ok(meta.clone());
        }

        trace!(node = id, "looking up node");
        let data = self.source.execute(&GraphQuery::node(id)).await?;
        let meta = decode_node(&data).ok_or_else(|| Error::Unresolvable(id.to_string()))?;

        debug!(node = id, %meta, "resolved node");
        self.cache.insert_node(id.to_string(), meta.clone());
        Ok(meta)
    }
}
