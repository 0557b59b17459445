mod api;
mod app;
mod application;
mod domain;
mod ui;
mod utils;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const TRACING_TARGET_STARTUP: &str = "universal_media_downloader::startup";

fn main() -> iced::Result {
    // .env must be loaded before the subscriber reads RUST_LOG
    let dotenv = dotenvy::dotenv();
    init_tracing();

    match dotenv {
        Ok(path) => tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            path = %path.display(),
            "Loaded .env file"
        ),
        Err(err) if !err.not_found() => tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            error = %err,
            "Failed to load .env file"
        ),
        Err(_) => {}
    }

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Universal Media Downloader"
    );

    iced::application(app::DownloadApp::default, app::update, app::view)
        .title("Universal Media Downloader")
        .window_size((560.0, 760.0))
        .run()
}

/// Log level comes from `RUST_LOG`, defaulting to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
