//! bench-trends CLI - Performance trend dashboard
//!
//! Builds trend charts from a published benchmark history and CI build list.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use bench_trends::{
    dashboard,
    html::{DashboardConfig, HtmlPresenter},
    links::{RepoLinks, DEFAULT_REPOSITORY},
    loader::{HistoryLoader, Location, DEFAULT_CI_URL},
    BuildRecord, MetricKind,
};
use bench_trends_core::{commit_hash_list, short_hash, short_hash_list, GroupValue};

/// bench-trends: Performance trend charts from benchmark history
#[derive(Parser, Debug)]
#[command(name = "bench-trends")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the HTML trend dashboard
    Dashboard(DashboardArgs),

    /// Print the chart columns of one metric as JSON
    Columns(ColumnsArgs),

    /// Show recent benchmark snapshots
    History(HistoryArgs),
}

#[derive(Parser, Debug)]
struct DashboardArgs {
    /// Benchmark history JSON (path or URL)
    #[arg(long, default_value = "data.json")]
    data: String,

    /// CI build list endpoint
    #[arg(long, env = "BENCH_TRENDS_CI_URL", default_value = DEFAULT_CI_URL)]
    ci_url: String,

    /// Token for the CI API
    #[arg(long, env = "TRAVIS_TOKEN", hide_env_values = true)]
    ci_token: Option<String>,

    /// Do not fetch CI builds (no compile-time chart)
    #[arg(long, default_value = "false")]
    skip_ci: bool,

    /// Repository that chart points link to
    #[arg(long, env = "GITHUB_REPOSITORY", default_value = DEFAULT_REPOSITORY)]
    repository: String,

    /// GitHub server for chart links
    #[arg(long, env = "GITHUB_SERVER_URL")]
    server_url: Option<String>,

    /// Output directory for the dashboard
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,

    /// Dashboard title
    #[arg(long, default_value = "Benchmark Trends")]
    title: String,
}

#[derive(Parser, Debug)]
struct ColumnsArgs {
    /// Benchmark history JSON (path or URL)
    #[arg(long, default_value = "data.json")]
    data: String,

    /// Metric group (benchmark, throughput, req_per_sec, binary_size, ...)
    #[arg(short, long)]
    metric: MetricKind,

    /// Pretty-print the JSON output
    #[arg(long, default_value = "false")]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct HistoryArgs {
    /// Benchmark history JSON (path or URL)
    #[arg(long, default_value = "data.json")]
    data: String,

    /// Number of recent snapshots to show
    #[arg(short, long, default_value = "10")]
    limit: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Dashboard(args) => dashboard_command(args).await,
        Commands::Columns(args) => columns_command(args).await,
        Commands::History(args) => history_command(args).await,
    }
}

/// Load both sources concurrently and render every chart that can be built
async fn dashboard_command(args: DashboardArgs) -> Result<()> {
    info!("Generating dashboard");

    let loader = HistoryLoader::new(args.ci_token.clone())?;
    let data_location = Location::parse(&args.data)?;
    let links = RepoLinks::from_repository(&args.repository, args.server_url.as_deref())?;

    let ci_url = if args.skip_ci {
        None
    } else {
        Some(
            Url::parse(&args.ci_url)
                .with_context(|| format!("Invalid CI URL: {}", args.ci_url))?,
        )
    };

    let snapshots = loader.load_snapshots(&data_location);
    let builds = async {
        match ci_url {
            Some(ref url) => Some(loader.load_build_history(url, BuildRecord::has_duration).await),
            None => None,
        }
    };
    let (snapshots, builds) = tokio::join!(snapshots, builds);

    // Each source only affects its own charts
    let mut charts = Vec::new();
    match snapshots {
        Ok(history) => {
            info!("Loaded {} snapshots from {}", history.len(), data_location);
            charts.extend(dashboard::snapshot_charts(&history.snapshots, Some(&links)));
        }
        Err(e) => warn!("Failed to load benchmark history from {}: {}", data_location, e),
    }
    match builds {
        Some(Ok(builds)) => {
            info!("Loaded {} CI builds", builds.len());
            charts.push(dashboard::compile_time_chart(&builds, Some(&links)));
        }
        Some(Err(e)) => warn!("Failed to load CI build history: {}", e),
        None => debug!("Skipping CI build history"),
    }

    if charts.is_empty() {
        anyhow::bail!("No charts could be built");
    }

    let config = DashboardConfig {
        title: args.title,
        output_dir: args.output_dir.to_string_lossy().to_string(),
    };
    let mut presenter = HtmlPresenter::new(config);
    dashboard::present(&mut presenter, &charts)?;

    let base_path = std::env::current_dir()?;
    let index_path = presenter
        .write(&base_path)
        .with_context(|| "Failed to generate dashboard")?;

    info!(
        "Dashboard with {} charts generated at {:?}",
        presenter.chart_count(),
        index_path
    );

    Ok(())
}

/// Print one metric's columns and axis categories
async fn columns_command(args: ColumnsArgs) -> Result<()> {
    let loader = HistoryLoader::new(None)?;
    let history = loader
        .load_snapshots(&Location::parse(&args.data)?)
        .await
        .with_context(|| "Failed to load benchmark history")?;

    let columns = args
        .metric
        .columns(&history.snapshots)
        .with_context(|| format!("Failed to project metric '{}'", args.metric))?;

    let output = serde_json::json!({
        "metric": args.metric.group(),
        "categories": short_hash_list(&commit_hash_list(&history.snapshots)),
        "columns": columns,
    });

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", serde_json::to_string(&output)?);
    }

    Ok(())
}

/// Show recent snapshots with the metric groups they carry
async fn history_command(args: HistoryArgs) -> Result<()> {
    let loader = HistoryLoader::new(None)?;
    let history = loader
        .load_snapshots(&Location::parse(&args.data)?)
        .await
        .with_context(|| "Failed to load benchmark history")?;

    println!("## {} snapshots\n", history.len());

    for snapshot in history.snapshots.iter().rev().take(args.limit) {
        let date = snapshot
            .created_at()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown date".to_string());
        println!("### {} - {}", short_hash(&snapshot.commit_hash), date);

        for name in snapshot.groups.keys() {
            let shape = match snapshot.group(name) {
                Some(GroupValue::Keyed(map)) => format!("{} series", map.len()),
                Some(GroupValue::Scalar(value)) => format!("legacy value {}", value),
                Some(GroupValue::Other(_)) => "unrecognized".to_string(),
                None => "null".to_string(),
            };
            println!("  - {}: {}", name, shape);
        }
        println!();
    }

    Ok(())
}
