use clap::Parser;
use stargraph::prelude::*;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Breadth-first crawl of the GitHub star graph
#[derive(Parser, Debug)]
#[command(name = "stargraph")]
#[command(about = "Crawl who-starred-what on GitHub into a local cache", long_about = None)]
struct Args {
    /// Directory holding the three JSON cache files
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// File whose first line is the API token
    #[arg(short, long, default_value = "token")]
    token_file: PathBuf,

    /// GraphQL endpoint
    #[arg(long, default_value = GITHUB_GRAPHQL_URL)]
    endpoint: String,

    /// Node id of the user or repository to start from
    #[arg(short, long, default_value = DEFAULT_SEED)]
    seed: String,

    /// Number of BFS levels to expand, the seed being level 1
    #[arg(short, long, default_value_t = DEFAULT_MAX_LEVEL)]
    max_level: u32,

    /// Edges requested per page (1-100)
    #[arg(long, default_value_t = PAGE_SIZE)]
    page_size: usize,

    /// Create empty cache files where none exist instead of failing
    #[arg(long)]
    init_cache: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting stargraph v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("Seed: {} (max level {})", args.seed, args.max_level);

    let config = CrawlConfig {
        seed: args.seed,
        max_level: args.max_level,
        page_size: args.page_size,
    };
    config.validate()?;

    let credential = Credential::from_file(&args.token_file)?;

    let files = CacheFiles::new(&args.data_dir);
    if args.init_cache {
        let created = files.init_missing()?;
        if created > 0 {
            info!("Created {} empty cache file(s)", created);
        }
    }
    let cache = files.load()?;
    let stats = cache.stats();
    info!(
        "Cache loaded: {} nodes, {} users and {} repositories expanded",
        stats.nodes, stats.users_expanded, stats.repositories_expanded
    );

    let client = GithubClient::new(args.endpoint, credential)?;
    info!("GraphQL endpoint: {}", client.endpoint());

    let (report, _cache) = crawl(client, &files, cache, &config).await?;

    info!(
        "Visited {} nodes, expanded {}{}",
        report.visited.len(),
        report.expanded.len(),
        if report.cut_off { " (stopped at depth limit)" } else { "" }
    );
    Ok(())
}
