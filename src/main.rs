use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use civic_feed::config::Config;
use civic_feed::feed::{filter_bar, FeedFilter};
use civic_feed::render::{render_feed, render_filter_bar};
use civic_feed::script;
use civic_feed::seed;
use civic_feed::state::{FeedState, SharedFeed};
use civic_feed::storage::SystemClock;

/// Default config path (~/.config/civic-feed/config.toml), if HOME is set.
fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("civic-feed")
            .join("config.toml"),
    )
}

#[derive(Parser, Debug)]
#[command(name = "civic-feed", about = "In-memory civic issue feed")]
struct Args {
    /// Config file (defaults to ~/.config/civic-feed/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the feed
    Feed {
        /// Only show posts in this category
        #[arg(long)]
        category: Option<i64>,
    },
    /// List categories
    Categories,
    /// Apply a JSON-lines operation script, then show the feed
    Replay {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only show posts in this category
        #[arg(long)]
        category: Option<i64>,
    },
}

fn initial_state(config: &Config) -> FeedState {
    let mut state = if config.seed_sample_data {
        seed::sample_state(Arc::new(SystemClock))
    } else {
        FeedState::new()
    };
    state.filter = config.initial_filter();
    state.assembler = config.assembler();
    state
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.config.clone().or_else(default_config_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    tracing::debug!(?config, "Effective configuration");

    let mut state = initial_state(&config);

    let filter_override = match &args.command {
        Command::Feed { category } | Command::Replay { category, .. } => *category,
        Command::Categories => None,
    };

    if let Command::Replay { file, .. } = &args.command {
        let ops = script::load_script(file)
            .with_context(|| format!("Failed to load script {}", file.display()))?;
        let count = ops.len();
        script::replay(&mut state, ops);
        tracing::info!(operations = count, "Replayed script");
    }

    if let Some(category) = filter_override {
        state.filter = FeedFilter::Category(category);
    }

    let shared = SharedFeed::new(state);

    match args.command {
        Command::Categories => {
            let categories = shared.categories().await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for category in categories {
                    println!(
                        "{:>14}  {} {}  {}",
                        category.id, category.icon, category.name, category.description
                    );
                }
            }
        }
        Command::Feed { .. } | Command::Replay { .. } => {
            let (items, chips) = shared
                .read(|state| (state.feed(), filter_bar(&state.categories, state.filter)))
                .await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                println!("{}\n", render_filter_bar(&chips));
                print!("{}", render_feed(&items, config.preview_width));
            }
        }
    }

    Ok(())
}
