use augury::api::{self, AppState};
use augury::config::Config;
use augury::error::AnalysisError;
use augury::services::discovery::{self, AssetDiscovery};
use augury::services::signals::PatternDetector;
use augury::services::{export, AssetReport, ComparativeAnalyzer, ComparisonSummary, DiscoveryReport};
use augury::sources::{SeriesSource, YahooFinanceClient};
use augury::types::{AssetCatalog, ChartRange, Interval};
use axum::Router;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "augury", version, about = "Technical signal engine for market price series")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one catalog asset by name or ticker
    Analyze {
        asset: String,
        /// Lookback range (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, ...)
        #[arg(long)]
        range: Option<ChartRange>,
        /// Bar interval (1m, 5m, 15m, 1h, 1d, 1wk, ...)
        #[arg(long)]
        interval: Option<Interval>,
    },
    /// Analyze and rank every catalog asset
    Compare {
        #[arg(long)]
        range: Option<ChartRange>,
        #[arg(long)]
        interval: Option<Interval>,
        /// Export the ranking as CSV
        #[arg(long)]
        csv: bool,
        /// Export the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scan candidate tickers for growth potential
    Discover {
        /// Minimum potential score (0-100)
        #[arg(long)]
        min_score: Option<u32>,
        /// Add discovered assets to the catalog
        #[arg(long)]
        save: bool,
    },
    /// Manage the asset catalog
    Assets {
        #[command(subcommand)]
        action: AssetsAction,
    },
    /// Run the HTTP API
    Serve,
}

#[derive(Subcommand)]
enum AssetsAction {
    /// List catalog entries
    List,
    /// Add or update an entry
    Add { name: String, ticker: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augury=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let mut catalog = AssetCatalog::load_or_default(&config.catalog_path);

    match cli.command {
        Command::Analyze {
            asset,
            range,
            interval,
        } => {
            let entry = catalog
                .resolve(&asset)
                .ok_or_else(|| AnalysisError::UnknownAsset(asset.clone()))?;
            let analysis = analyzer(&config)?
                .analyze_asset(
                    &entry.name,
                    &entry.ticker,
                    range.unwrap_or(config.default_range),
                    interval.unwrap_or(config.default_interval),
                )
                .await?;
            println!("{}", AssetReport(&analysis));
        }
        Command::Compare {
            range,
            interval,
            csv,
            json,
        } => {
            let progress = |message: &str, fraction: f64| {
                eprintln!("[{:>3.0}%] {}", fraction * 100.0, message);
            };
            let report = analyzer(&config)?
                .analyze_all(
                    &catalog,
                    range.unwrap_or(config.default_range),
                    interval.unwrap_or(config.default_interval),
                    Some(&progress),
                )
                .await;
            println!("{}", ComparisonSummary(&report));

            let dir = config.reports_dir();
            if csv {
                let path = export::export_csv(&report, &dir)?;
                println!("CSV written to {}", path.display());
            }
            if json {
                let path = export::export_json(&report, &dir)?;
                println!("JSON written to {}", path.display());
            }
        }
        Command::Discover { min_score, save } => {
            let min_score = min_score.unwrap_or(config.discovery_min_score).min(100);
            let found = AssetDiscovery::new(source(&config)?)
                .discover(&catalog, min_score)
                .await;
            println!("{}", DiscoveryReport(&found));

            if save && !found.is_empty() {
                let added = discovery::merge_into(&mut catalog, &found);
                catalog.save(&config.catalog_path)?;
                println!(
                    "Added {} assets to {}",
                    added,
                    config.catalog_path.display()
                );
            }
        }
        Command::Assets { action } => match action {
            AssetsAction::List => {
                for entry in catalog.iter() {
                    println!("{:<24} {}", entry.name, entry.ticker);
                }
                println!("{} assets", catalog.len());
            }
            AssetsAction::Add { name, ticker } => {
                let verb = if catalog.add(name.clone(), ticker.clone()) {
                    "Added"
                } else {
                    "Updated"
                };
                catalog.save(&config.catalog_path)?;
                println!("{} {} ({})", verb, name, ticker);
            }
        },
        Command::Serve => serve(config, catalog).await?,
    }

    Ok(())
}

fn source(config: &Config) -> anyhow::Result<Arc<dyn SeriesSource>> {
    Ok(Arc::new(YahooFinanceClient::new(config.http_timeout)?))
}

fn analyzer(config: &Config) -> anyhow::Result<ComparativeAnalyzer> {
    Ok(ComparativeAnalyzer::new(source(config)?)
        .with_detector(PatternDetector::new(config.recent_patterns)))
}

async fn serve(config: Config, catalog: AssetCatalog) -> anyhow::Result<()> {
    let addr = config.bind_address();
    info!("Starting Augury API on {} ({} assets)", addr, catalog.len());

    let source = source(&config)?;
    let state = AppState::new(config, catalog, source);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Augury API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
