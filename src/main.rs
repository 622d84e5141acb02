//! Intent Agent - route a request to search, drawing or speech tools

use anyhow::Result;
use clap::{Parser, Subcommand};
use intent_agent::config::{self, Config, ConfigSource};
use intent_agent::{llm, tools, IntentRouter};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the query and run the matching tool
    Run { query: String },
    /// Print the ranked tool names without running anything
    Classify { query: String },
    /// List registered tools
    Tools,
    /// Write a default config file if none exists
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let (config, source) = Config::load_with_source(&config_path)?;

    // Setup logging; RUST_LOG wins over the config level
    let level = if args.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set subscriber: {e}"))?;

    info!("🧭 Intent Agent v{} starting...", env!("CARGO_PKG_VERSION"));
    if let ConfigSource::Recovered { backup, reason } = &source {
        warn!(
            "⚠️ Config file corrupted or invalid, using defaults: {} (moved to {})",
            reason,
            backup.display()
        );
    }

    match args.command {
        Command::InitConfig => {
            if config_path.exists() {
                println!("Config already exists at {}", config_path.display());
            } else {
                Config::default().save_to(&config_path)?;
                println!("Wrote default config to {}", config_path.display());
            }
        }
        Command::Run { query } => {
            let router = build_router(&config)?;
            ensure_reachable(&router, &config).await?;
            let output = router.route(&query).await?;
            println!("{output}");
        }
        Command::Classify { query } => {
            let router = build_router(&config)?;
            ensure_reachable(&router, &config).await?;
            let ranked = router.classify(&query).await?;
            if ranked.is_empty() {
                println!("(no capability matched)");
            }
            for (i, name) in ranked.iter().enumerate() {
                println!("{}. {}", i + 1, name);
            }
        }
        Command::Tools => {
            for cap in build_router(&config)?.registry().iter() {
                println!("{}\t{}", cap.name(), cap.description());
            }
        }
    }

    Ok(())
}

fn build_router(config: &Config) -> Result<IntentRouter> {
    let client = config.http_client()?;
    let model = llm::create_model(config, client.clone())?;
    let registry = tools::create_registry(config, client, model.clone())?;
    Ok(IntentRouter::new(registry, model))
}

/// Fail before classification when the model backend is down
async fn ensure_reachable(router: &IntentRouter, config: &Config) -> Result<()> {
    if router.model().health_check().await {
        return Ok(());
    }
    anyhow::bail!(
        "language model '{}' is unreachable at {} (is {} running?)",
        config.llm.model,
        config.llm.url,
        router.model().name()
    )
}
