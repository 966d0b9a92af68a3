mod app;
mod backend;
mod config;
mod engine;
mod messages;
mod resolver;
mod retention;
mod utils;
mod vfs;

use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CacheSweep")
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([400.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CacheSweep",
        options,
        Box::new(|cc| Ok(Box::new(app::CacheSweepApp::new(cc)))),
    )
}
