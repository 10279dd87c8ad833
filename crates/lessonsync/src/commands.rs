//! CLI command handlers.

use std::time::Duration;

use anyhow::{bail, Result};
use serde::Serialize;
use tokio::signal;
use tokio_stream::{Stream, StreamExt};

use lessonsync_core::content::QuarterlyGroup;
use lessonsync_core::repository::{self, QuarterliesRepository};

/// A resolved CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quarterlies {
        language_code: Option<String>,
        group: Option<QuarterlyGroup>,
        watch: bool,
    },
    Info {
        index: String,
    },
    Publishing {
        watch: bool,
    },
}

/// Runs `command` against `repository`, printing results as JSON on stdout.
///
/// Stream commands print the latest value once the stream has been quiet for
/// `wait`, or every value until interrupted when watching.
pub async fn execute<R>(repository: &R, command: Command, wait: Duration) -> Result<()>
where
    R: QuarterliesRepository,
{
    match command {
        Command::Info { index } => {
            let info = repository.get_quarterly_info(&index).await?;
            print_json(&info)
        }
        Command::Quarterlies {
            language_code,
            group,
            watch,
        } => {
            let stream = repository.get_quarterlies(language_code.as_deref(), group.as_ref());
            if watch {
                watch_stream(stream).await
            } else {
                print_json(&settle(stream, wait).await?)
            }
        }
        Command::Publishing { watch } => {
            let stream = repository.get_publishing_info();
            if watch {
                watch_stream(stream).await
            } else {
                print_json(&settle(stream, wait).await?)
            }
        }
    }
}

/// Returns the last value of `stream` once it has been quiet for `wait`.
async fn settle<T, S>(mut stream: S, wait: Duration) -> Result<T>
where
    S: Stream<Item = repository::Result<T>> + Unpin,
{
    let mut latest = None;
    loop {
        match tokio::time::timeout(wait, stream.next()).await {
            Ok(Some(Ok(value))) => latest = Some(value),
            Ok(Some(Err(err))) => tracing::warn!(error = %err, "Skipping failed read"),
            Ok(None) | Err(_) => break,
        }
    }

    match latest {
        Some(value) => Ok(value),
        None => bail!("No content received within {}s", wait.as_secs_f32()),
    }
}

/// Prints every value of `stream` until it ends or the process is interrupted.
async fn watch_stream<T, S>(mut stream: S) -> Result<()>
where
    T: Serialize,
    S: Stream<Item = repository::Result<T>> + Unpin,
{
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            item = stream.next() => match item {
                Some(Ok(value)) => print_json(&value)?,
                Some(Err(err)) => tracing::warn!(error = %err, "Skipping failed read"),
                None => break,
            },
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
