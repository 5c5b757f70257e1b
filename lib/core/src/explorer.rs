use crate::cache::{CacheSink, GraphCache};
use crate::query::PAGE_SIZE;
use crate::source::GraphSource;
use crate::Result;

/// Crawl session over the star graph.
///
/// Owns the cache context and hands it to the node resolver, the two edge
/// fetchers and the BFS walker, which live in their own modules as further
/// `impl` blocks on this type. Every completed edge fetch is flushed to the
/// sink in full.
pub struct Explorer<S, P> {
    pub(crate) source: S,
    pub(crate) sink: P,
    pub(crate) cache: GraphCache,
    pub(crate) page_size: usize,
}

impl<S: GraphSource, P: CacheSink> Explorer<S, P> {
    pub fn new(source: S, sink: P, cache: GraphCache) -> Self {
        Self {
            source,
            sink,
            cache,
            page_size: PAGE_SIZE,
        }
    }

    /// Use pages of `page_size` edges.
    ///
    /// `page_size` must already be validated to `1..=PAGE_SIZE`, as
    /// [`CrawlConfig::validate`](crate::CrawlConfig::validate) does.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        debug_assert!(
            (1..=PAGE_SIZE).contains(&page_size),
            "page size {} outside 1..={}",
            page_size,
            PAGE_SIZE
        );
        self.page_size = page_size;
        self
    }

    #[inline]
    pub fn cache(&self) -> &GraphCache {
        &self.cache
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Write the whole cache to the sink.
    pub fn flush(&self) -> Result<()> {
        self.sink.flush(&self.cache)
    }

    pub fn into_cache(self) -> GraphCache {
        self.cache
    }
}
