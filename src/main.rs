use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cup_analytics::api::state::AppState;
use cup_analytics::calculate::{rank_by_impact, MIN_MATCHES};
use cup_analytics::config::AppConfig;
use cup_analytics::dashboard::{PlayerSort, Tab};
use cup_analytics::storage::StorageConfig;
use cup_analytics::view::SortOrder;
use cup_analytics::{DatasetRegistry, SourceFile};

#[derive(Parser)]
#[command(name = "cup-analytics")]
#[command(about = "Tournament analytics dashboard over pre-computed statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print one dashboard tab as JSON
    Show {
        /// Tab id (summary, all-players, agent-meta, leaderboards,
        /// clutch-analysis, economy, ability-usage, mvp-rankings)
        tab: String,

        /// Column to sort the All Players table by
        #[arg(long)]
        sort: Option<String>,

        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,
    },

    /// List loaded datasets
    Datasets,

    /// Print impact ratings
    Rate {
        /// Only show this player
        #[arg(long)]
        player: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting cup-analytics v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());
    let registry = DatasetRegistry::from_storage(&storage);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let app = cup_analytics::api::build_router(AppState::new(registry, config));
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Show {
            tab,
            sort,
            ascending,
        } => {
            let tab: Tab = tab.parse().map_err(anyhow::Error::msg)?;
            let sort = PlayerSort {
                column: sort,
                order: Some(SortOrder::from_ascending(ascending)),
            };
            let state = AppState::new(registry, config);
            let view = state.dashboard().tab(tab, &sort);
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Datasets => {
            println!("{:<24} {:>8}  STATUS", "DATASET", "RECORDS");
            for info in registry.info() {
                let status = if info.load_failed { "missing/invalid" } else { "ok" };
                println!("{:<24} {:>8}  {}", info.name, info.records, status);
            }
        }
        Commands::Rate { player } => {
            let ranking = rank_by_impact(&registry.source(SourceFile::AllPlayers));
            let wanted = |name: &Option<String>| match (&player, name) {
                (None, _) => true,
                (Some(p), Some(n)) => p.eq_ignore_ascii_case(n),
                (Some(_), None) => false,
            };

            println!(
                "{:>4}  {:<20} {:>7} {:>6} {:>7} {:>6} {:>6} {:>7}",
                "RANK", "PLAYER", "IMPACT", "K/D", "OPEN", "WIN", "ACS", "CLUTCH"
            );
            for p in ranking.ranked.iter().filter(|p| wanted(&p.player)) {
                let b = &p.breakdown;
                println!(
                    "{:>4}  {:<20} {:>7.3} {:>6.2} {:>7.2} {:>6.2} {:>6.2} {:>7.3}",
                    p.rank,
                    p.player.as_deref().unwrap_or("-"),
                    p.impact_rating,
                    b.kd,
                    b.opening_impact,
                    b.win_contribution,
                    b.combat_contribution,
                    b.clutch_factor,
                );
            }

            let ineligible: Vec<_> = ranking
                .ineligible
                .iter()
                .filter(|p| wanted(&p.player))
                .collect();
            if !ineligible.is_empty() {
                println!("\nUnrated (fewer than {} matches):", MIN_MATCHES);
                for p in ineligible {
                    println!(
                        "  - {} ({} matches)",
                        p.player.as_deref().unwrap_or("-"),
                        p.matches.map_or("unknown".to_string(), |m| m.to_string())
                    );
                }
            }
        }
    }

    Ok(())
}
