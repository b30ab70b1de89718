use std::path::Path;
use std::sync::Arc;

use readaloud_app::badge::{BadgeCounter, TracingBadge};
use readaloud_app::config::AppConfig;
use readaloud_app::engine::SimEngine;
use readaloud_app::selection::StaticSelection;
use readaloud_bus::{MessageBus, SenderId};
use readaloud_controller::{
    ControllerCommand, SpeechSessionController, TracingErrorReporter,
};
use readaloud_observer::{SelectionSource, SelectionWatcher};
use readaloud_tts::{MemoryPrefs, SpeechEngine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("logs")?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "readaloud.log");
    let (non_blocking_file, _guard) = tracing_appender::non_blocking(file_appender);
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout.and(non_blocking_file))
        .with_env_filter(log_level)
        .init();
    std::mem::forget(_guard);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging().map_err(|e| anyhow::anyhow!("logging init failed: {e}"))?;
    let config = AppConfig::load_or_default(Path::new("readaloud.toml"))?;
    tracing::info!(?config, "starting readaloud");

    let bus = MessageBus::new();
    let extension = SenderId::new("readaloud");

    // Controller context: owns the engine and the session state machine.
    let prefs = Arc::new(MemoryPrefs::new());
    let reporter = Arc::new(TracingErrorReporter);
    let (engine_events_tx, engine_events_rx) = mpsc::unbounded_channel();
    let engine = SimEngine::new(engine_events_tx, config.engine.chars_per_sec);
    match engine.list_voices().await {
        Ok(voices) => tracing::info!(count = voices.len(), "speech engine voices available"),
        Err(e) => tracing::warn!(error = %e, "could not enumerate voices"),
    }
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let controller = SpeechSessionController::new(
        bus.handle(extension.clone()),
        commands_rx,
        Box::new(engine),
        engine_events_rx,
        prefs,
        reporter,
        extension.clone(),
        config.controller.clone(),
    );
    let controller_handle = tokio::spawn(controller.run());

    // Observer context: selection capture, debouncing, keep-alive.
    let selection = Arc::new(StaticSelection::new());
    let (changes_tx, changes_rx) = mpsc::unbounded_channel();
    let watcher = SelectionWatcher::new(
        bus.handle(extension.clone()),
        Arc::clone(&selection) as Arc<dyn SelectionSource>,
        changes_rx,
        extension.clone(),
        config.observer.clone(),
    );
    let watcher_handle = tokio::spawn(watcher.run());

    // Badge collaborator rides the same lifecycle messages.
    let badge = BadgeCounter::new(
        &bus.handle(extension.clone()),
        extension,
        Box::new(TracingBadge),
    );
    let badge_handle = tokio::spawn(badge.run());

    tracing::info!("type text to select it, /read to capture, /stop to stop, Ctrl-C to quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown requested");
                break;
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => match line.trim() {
                        "" => {}
                        "/stop" => commands_tx.send(ControllerCommand::Stop)?,
                        "/read" => commands_tx.send(ControllerCommand::ReadSelection)?,
                        text => {
                            selection.set(text);
                            changes_tx.send(())?;
                        }
                    },
                    None => break,
                }
            }
        }
    }

    commands_tx.send(ControllerCommand::Stop).ok();
    controller_handle.abort();
    watcher_handle.abort();
    badge_handle.abort();
    tracing::info!("readaloud stopped");
    Ok(())
}
