// Integration tests for stargraph
use serde_json::{json, Value};
use stargraph::{
    crawl, CacheFiles, CrawlConfig, Error, GraphCache, GraphQuery, GraphSource, NodeMeta,
    QueryKind, Result,
};
use std::cell::Cell;

/// R1 is starred by U1 and U2; U1 starred R1 and R2; U2 starred R1;
/// R2 is starred by U1 and U3. Everything fits on one page.
struct StaticGraph {
    calls: Cell<usize>,
    fail_from: Option<usize>,
}

impl StaticGraph {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
            fail_from: None,
        }
    }

    /// Every call from the n-th on (1-based) fails.
    fn failing_from(call: usize) -> Self {
        Self {
            calls: Cell::new(0),
            fail_from: Some(call),
        }
    }
}

fn page(edges: Vec<Value>) -> Value {
    json!({ "edges": edges, "pageInfo": { "endCursor": "end", "hasNextPage": false } })
}

fn repo_edge(id: &str, name: &str) -> Value {
    json!({ "node": { "id": id, "owner": { "login": "octo" }, "name": name } })
}

fn user_edge(id: &str, login: &str) -> Value {
    json!({ "node": { "id": id, "login": login } })
}

impl GraphSource for StaticGraph {
    async fn execute(&self, query: &GraphQuery) -> Result<Value> {
        self.calls.set(self.calls.get() + 1);
        if self.fail_from.is_some_and(|n| self.calls.get() >= n) {
            return Err(Error::Transport("Query failed to run by returning code of 401".into()));
        }

        let data = match (query.kind, query.var("id"), query.var("login"), query.var("name")) {
            (QueryKind::Node, Some("R1"), _, _) => {
                json!({ "node": { "owner": { "login": "octo" }, "name": "one" } })
            }
            (QueryKind::Node, _, _, _) => json!({ "node": null }),
            (QueryKind::Stargazers, _, _, Some("one")) => json!({
                "repository": { "stargazers": page(vec![user_edge("U1", "alice"), user_edge("U2", "bob")]) }
            }),
            (QueryKind::Stargazers, _, _, Some("two")) => json!({
                "repository": { "stargazers": page(vec![user_edge("U1", "alice"), user_edge("U3", "carol")]) }
            }),
            (QueryKind::StarredRepositories, _, Some("alice"), _) => json!({
                "user": { "starredRepositories": page(vec![repo_edge("R1", "one"), repo_edge("R2", "two")]) }
            }),
            (QueryKind::StarredRepositories, _, Some("bob"), _) => json!({
                "user": { "starredRepositories": page(vec![repo_edge("R1", "one")]) }
            }),
            (QueryKind::StarredRepositories, _, Some("carol"), _) => json!({
                "user": { "starredRepositories": page(vec![]) }
            }),
            _ => json!({ "user": null, "repository": null }),
        };
        Ok(data)
    }
}

fn config(max_level: u32) -> CrawlConfig {
    CrawlConfig {
        seed: "R1".to_string(),
        max_level,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_end_to_end_crawl_persists_cache() {
    let temp_dir = tempfile::tempdir().unwrap();
    let files = CacheFiles::new(temp_dir.path());
    files.init_missing().unwrap();

    let source = StaticGraph::new();
    let (report, cache) = crawl(&source, &files, files.load().unwrap(), &config(2))
        .await
        .unwrap();

    assert_eq!(report.visited, vec!["R1", "U1", "U2", "R2"]);
    assert_eq!(report.expanded, vec!["R1", "U1", "U2"]);
    assert!(report.cut_off);
    // Seed lookup plus one fetch per expanded node.
    assert_eq!(source.calls.get(), 4);

    let on_disk = files.load().unwrap();
    assert_eq!(on_disk, cache);
    assert_eq!(on_disk.repo_stargazers("R1"), Some(&["U1".to_string(), "U2".to_string()][..]));
    assert_eq!(on_disk.user_stars("U1").map(<[_]>::len), Some(2));
    assert_eq!(on_disk.user_stars("U2").map(<[_]>::len), Some(1));
    assert!(on_disk.repo_stargazers("R2").is_none());
    assert_eq!(on_disk.node("R2"), Some(&NodeMeta::repository("octo", "two")));
}

#[tokio::test]
async fn test_rerun_is_served_from_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let files = CacheFiles::new(temp_dir.path());
    files.init_missing().unwrap();
    crawl(StaticGraph::new(), &files, files.load().unwrap(), &config(2))
        .await
        .unwrap();

    // A source that refuses every call still completes the same walk.
    let offline = StaticGraph::failing_from(1);
    let (report, _) = crawl(&offline, &files, files.load().unwrap(), &config(2))
        .await
        .unwrap();
    assert_eq!(report.visited, vec!["R1", "U1", "U2", "R2"]);
    assert_eq!(offline.calls.get(), 0);
}

#[tokio::test]
async fn test_failure_keeps_completed_fetches_on_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let files = CacheFiles::new(temp_dir.path());
    files.init_missing().unwrap();

    // Calls: R1 lookup, R1 stargazers, U1 stars, then U2 stars fails.
    let source = StaticGraph::failing_from(4);
    let err = crawl(&source, &files, files.load().unwrap(), &config(3))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));

    let on_disk = files.load().unwrap();
    assert!(on_disk.repo_stargazers("R1").is_some());
    assert!(on_disk.user_stars("U1").is_some());
    assert!(on_disk.user_stars("U2").is_none());
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_any_call() {
    let source = StaticGraph::new();
    let bad = CrawlConfig {
        page_size: 500,
        ..config(2)
    };
    let err = crawl(&source, &MemorySink, GraphCache::new(), &bad).await.unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert_eq!(source.calls.get(), 0);
}

#[test]
fn test_missing_cache_files_are_fatal() {
    let temp_dir = tempfile::tempdir().unwrap();
    let err = CacheFiles::new(temp_dir.path()).load().unwrap_err();
    assert!(matches!(err, Error::Persistence(_)));
}

struct MemorySink;

impl stargraph::CacheSink for MemorySink {
    fn flush(&self, _cache: &GraphCache) -> Result<()> {
        Ok(())
    }
}
