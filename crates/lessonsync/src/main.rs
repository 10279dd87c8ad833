mod commands;
mod config;
mod prefs;
mod repository;
mod storage;
mod sync;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lessonsync_core::codec::CodecRegistry;
use lessonsync_core::content::QuarterlyGroup;
use lessonsync_core::storage::CacheStore;

use crate::commands::Command as Run;
use crate::config::Config;
use crate::prefs::{FixedDevice, MemoryPreferences};
use crate::repository::CachedQuarterliesRepository;
use crate::sync::{OfflineSync, SnapshotSync};

/// lessonsync - Offline-first quarterly lesson content
#[derive(Parser, Debug)]
#[command(name = "lessonsync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Preferred language code
    #[arg(long, global = true, default_value = "en", env = "LESSONSYNC_LANGUAGE")]
    language: String,

    /// Device country
    #[arg(long, global = true, default_value = "us", env = "LESSONSYNC_COUNTRY")]
    country: String,

    /// Path to the SQLite cache
    #[arg(long, global = true, default_value = "lessonsync.db", env = "SQLITE_PATH")]
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    sqlite_path: String,

    /// Content snapshot used as the remote source
    #[arg(long, global = true, env = "SNAPSHOT_PATH")]
    snapshot: Option<PathBuf>,

    /// Keep the cache in memory instead of SQLite
    #[arg(long, global = true)]
    in_memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the quarterlies of a language
    Quarterlies {
        /// Language code (defaults to the preferred language)
        #[arg(long)]
        lang: Option<String>,

        /// Only list quarterlies of this group
        #[arg(long, requires = "group_order")]
        group: Option<String>,

        /// Order of the group
        #[arg(long, requires = "group")]
        group_order: Option<i32>,

        /// Keep printing updates until interrupted
        #[arg(long)]
        watch: bool,
    },
    /// Show a quarterly with its lessons
    Info {
        /// Quarterly index, e.g. en-2024-01
        index: String,
    },
    /// Show the publishing info for the device country and language
    Publishing {
        /// Keep printing updates until interrupted
        #[arg(long)]
        watch: bool,
    },
}

impl Cli {
    fn run(&self) -> Run {
        match &self.command {
            Command::Quarterlies {
                lang,
                group,
                group_order,
                watch,
            } => Run::Quarterlies {
                language_code: lang.clone(),
                group: group
                    .clone()
                    .zip(*group_order)
                    .map(|(name, order)| QuarterlyGroup::new(name, order)),
                watch: *watch,
            },
            Command::Info { index } => Run::Info {
                index: index.clone(),
            },
            Command::Publishing { watch } => Run::Publishing { watch: *watch },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lessonsync=info,lessonsync_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    tracing::debug!(?cli, ?config, "Loaded configuration");

    let codecs = Arc::new(CodecRegistry::new());

    #[cfg(feature = "sqlite")]
    if !cli.in_memory {
        tracing::info!(path = %cli.sqlite_path, "Using SQLite cache");
        let store = Arc::new(storage::SqliteStore::new(&cli.sqlite_path).await?);
        return run_with_store(store, codecs, &cli, &config).await;
    }

    tracing::info!("Using in-memory cache");
    let store = Arc::new(storage::MemoryStore::new());
    run_with_store(store, codecs, &cli, &config).await
}

/// Picks the sync coordinator and runs the command.
async fn run_with_store<S>(
    store: Arc<S>,
    codecs: Arc<CodecRegistry>,
    cli: &Cli,
    config: &Config,
) -> Result<()>
where
    S: CacheStore + 'static,
{
    let preferences = Arc::new(MemoryPreferences::new(&cli.language));
    let device = Arc::new(FixedDevice::new(&cli.country));
    let command = cli.run();

    match &cli.snapshot {
        Some(path) => {
            tracing::info!(path = %path.display(), "Syncing from content snapshot");
            let sync = Arc::new(SnapshotSync::new(path, store.clone(), codecs.clone()));
            let repository =
                CachedQuarterliesRepository::new(store, sync, preferences, device, codecs);
            let result = commands::execute(&repository, command, config.stream_wait()).await;
            repository.shutdown();
            result
        }
        None => {
            tracing::info!("No content snapshot configured, serving cached content only");
            let sync = Arc::new(OfflineSync);
            let repository =
                CachedQuarterliesRepository::new(store, sync, preferences, device, codecs);
            let result = commands::execute(&repository, command, config.stream_wait()).await;
            repository.shutdown();
            result
        }
    }
}
