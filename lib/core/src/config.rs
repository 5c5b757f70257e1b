use crate::node::NodeId;
use crate::query::PAGE_SIZE;
use crate::{Error, Result};

/// Seed repository the crawl starts from when none is given.
pub const DEFAULT_SEED: &str = "MDEwOlJlcG9zaXRvcnkxMTc1MTM4NTI=";

/// Default number of BFS levels to expand, the seed being level 1.
pub const DEFAULT_MAX_LEVEL: u32 = 3;

/// Parameters of a single crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    pub seed: NodeId,
    pub max_level: u32,
    pub page_size: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED.to_string(),
            max_level: DEFAULT_MAX_LEVEL,
            page_size: PAGE_SIZE,
        }
    }
}

impl CrawlConfig {
    pub fn validate(&self) -> Result<()> {
        if self.seed.trim().is_empty() {
            return Err(Error::InvalidConfig("seed id must not be empty".to_string()));
        }
        if self.page_size == 0 || self.page_size > PAGE_SIZE {
            return Err(Error::InvalidConfig(format!(
                "page size must be between 1 and {}, got {}",
                PAGE_SIZE, self.page_size
            )));
        }
        Ok(())
    }
}
