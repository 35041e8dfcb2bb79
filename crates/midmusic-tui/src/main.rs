mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod haptics;
mod mpv;
mod player;
mod theme;
mod widgets;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use midmusic_core::catalog;
use midmusic_core::config::Config;
use midmusic_core::library::LibraryStore;
use midmusic_core::network::ConnectivityMonitor;
use midmusic_core::playback::PlaybackContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = midmusic_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("midmusic.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; keep HTTP client internals quiet by default.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("midmusic log: {}", log_path.display());
    tracing::info!("midmusic starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_default();

    // ── Collaborators ────────────────────────────────────────────────────────
    let catalog: Arc<dyn catalog::CatalogClient> = Arc::from(catalog::from_config(&config.catalog)?);

    let (engine, engine_events) = mpv::MpvEngine::new(&config.playback);
    let playback = PlaybackContext::new(Box::new(engine));

    // Probes stop when the monitor is dropped, so it lives until `run` returns.
    let monitor = ConnectivityMonitor::spawn(&config.network)?;

    let library = LibraryStore::new(&config.paths.library_file, &config.paths.export_dir);
    let haptics = haptics::from_config(config.ui.haptics);

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(
        &config,
        catalog,
        playback,
        engine_events,
        monitor.subscribe(),
        library,
        haptics,
    );
    let result = app.run().await;

    drop(monitor);
    tracing::info!("midmusic exiting");
    result
}
