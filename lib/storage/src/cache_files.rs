// JSON persistence of the three crawl caches
use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use stargraph_core::{CacheSink, Error, GraphCache, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const NODES_FILE: &str = "NODE_ID_CONTENT.json";
pub const USER_STARS_FILE: &str = "USER_STAR_REPOSITORIES.json";
pub const REPO_STARGAZERS_FILE: &str = "REPOSITORY_STARGAZERS.json";

/// The three cache files of a data directory.
///
/// Each file holds one map as a flat JSON object keyed by node id. Files are
/// read in full at startup and rewritten in full on every flush.
#[derive(Debug, Clone)]
pub struct CacheFiles {
    data_dir: PathBuf,
    nodes_path: PathBuf,
    user_stars_path: PathBuf,
    repo_stargazers_path: PathBuf,
}

impl CacheFiles {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            nodes_path: data_dir.join(NODES_FILE),
            user_stars_path: data_dir.join(USER_STARS_FILE),
            repo_stargazers_path: data_dir.join(REPO_STARGAZERS_FILE),
            data_dir,
        }
    }

    fn paths(&self) -> [&Path; 3] {
        [
            self.nodes_path.as_path(),
            self.user_stars_path.as_path(),
            self.repo_stargazers_path.as_path(),
        ]
    }

    /// Load all three caches.
    ///
    /// A missing or malformed file is an error; there is no fallback to an
    /// empty cache.
    pub fn load(&self) -> Result<GraphCache> {
        let nodes = read_json(&self.nodes_path)?;
        let user_stars = read_json(&self.user_stars_path)?;
        let repo_stargazers = read_json(&self.repo_stargazers_path)?;
        let cache = GraphCache::from_parts(nodes, user_stars, repo_stargazers);

        let stats = cache.stats();
        debug!(
            dir = ?self.data_dir,
            nodes = stats.nodes,
            users = stats.users_expanded,
            repositories = stats.repositories_expanded,
            "cache loaded"
        );
        Ok(cache)
    }

    /// Overwrite all three files with the current cache state.
    pub fn save(&self, cache: &GraphCache) -> Result<()> {
        write_json(&self.repo_stargazers_path, cache.all_repo_stargazers())?;
        write_json(&self.user_stars_path, cache.all_user_stars())?;
        write_json(&self.nodes_path, cache.nodes())?;
        debug!(dir = ?self.data_dir, "cache flushed");
        Ok(())
    }

    /// Create the data directory and write an empty map for every absent file.
    ///
    /// Returns how many files were created. Existing files are left alone.
    pub fn init_missing(&self) -> Result<usize> {
        std::fs::create_dir_all(&self.data_dir)?;
        let mut created = 0;
        for path in self.paths() {
            if !path.exists() {
                let empty: serde_json::Map<String, serde_json::Value> = serde_json::Map::new();
                write_json(path, &empty)?;
                debug!(path = ?path, "created empty cache file");
                created += 1;
            }
        }
        Ok(created)
    }
}

impl CacheSink for CacheFiles {
    fn flush(&self, cache: &GraphCache) -> Result<()> {
        self.save(cache)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read(path)
        .map_err(|e| Error::Persistence(format!("cannot read {}: {}", path.display(), e)))?;
    serde_json::from_slice(&data)
        .map_err(|e| Error::Persistence(format!("malformed {}: {}", path.display(), e)))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_vec(value)?;
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(&data))
        .map_err(|e| Error::Persistence(format!("cannot write {}: {}", path.display(), e)))
}
