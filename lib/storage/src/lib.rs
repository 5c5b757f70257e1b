pub mod cache_files;

pub use cache_files::{CacheFiles, NODES_FILE, REPO_STARGAZERS_FILE, USER_STARS_FILE};
