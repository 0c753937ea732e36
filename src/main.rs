// Page Spy - session analytics for a landing page
//
// The binary replays a scripted visit against an in-session event log and
// prints what the live page would print: one console line per recorded event,
// the end-of-session summary report, and optionally the snapshot JSON.
//
// Architecture:
// - Session: owns the append-only event log and the derived counters
// - Producers (src/ui): menu, nav, counters, forms, carousel, accordion,
//   toasts, theme and visibility, all recording through one shared handle
// - Demo: the scripted visitor driving every producer
// - Summary and snapshot: projections of the session taken at finalize

mod cli;
mod config;
mod demo;
mod device;
mod events;
mod prefs;
mod scroll;
mod session;
mod sink;
mod summary;
mod timer;
mod ui;

use anyhow::Result;
use config::{Config, LogRotation};
use session::Session;
use sink::ConsoleSink;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --update)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Initialize tracing/logging
    // File logging: optionally write to rotating log files (in addition to stdout)
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("pagespy={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Set up file logging if enabled (non-blocking writer with rotation)
    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            // Create log directory if it doesn't exist
            if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                // Fall back to stdout-only logging
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .init();
                None
            } else {
                // Create rolling file appender based on configured rotation
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };

                // Wrap in non-blocking writer (writes happen in background thread)
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // File layer uses JSON format for structured log parsing
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(non_blocking)
                            .with_ansi(false),
                    )
                    .init();

                Some(guard)
            }
        } else {
            // No file logging - stdout layer only
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();

            None
        };

    tracing::info!(page_url = %config.page_url, "session starting");

    // One session per run; every producer records through this handle
    let session = Session::shared(&config.page_url, ConsoleSink::new(), demo::visitor_probe());

    // Shutdown channel lets Ctrl+C stop the scripted visit mid-flight
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let visit_session = session.clone();
    let timing = config.timing.clone();
    let mut visit_handle =
        tokio::spawn(async move { demo::run(visit_session, timing, shutdown_rx).await });

    // Wait for the visit to finish or the user to interrupt it. Either way
    // the session still gets its summary, like a page printing on unload.
    tokio::select! {
        result = &mut visit_handle => {
            result??;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received, ending the visit");
            let _ = shutdown_tx.send(());
            let _ = (&mut visit_handle).await;
        }
    }

    // End of session: summary report through the sink, then the snapshot
    let snapshot = {
        let guard = session.lock().unwrap();
        guard.finalize()
    };

    if config.export_snapshot {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    tracing::info!(
        events = snapshot.events.len(),
        duration_seconds = snapshot.session.duration_seconds,
        "session complete"
    );
    Ok(())
}
