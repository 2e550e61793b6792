//! AthleteHub - Athlete Management Application
//!
//! Main entry point for the application.

use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AthleteHub v{}", env!("CARGO_PKG_VERSION"));

    // Background store, auth and AI calls are spawned from the UI thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("athletehub-worker")
        .build()?;
    let _guard = runtime.enter();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("AthleteHub"),
        ..Default::default()
    };

    eframe::run_native(
        "AthleteHub",
        options,
        Box::new(|cc| Ok(Box::new(app::AthleteHubApp::new(cc)?))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}
