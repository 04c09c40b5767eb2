#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use timeline_board::app::TimelineApp;
use tracing_subscriber::EnvFilter;

/// Log level comes from `RUST_LOG`, e.g. `RUST_LOG=timeline_board=debug`.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("timeline_board=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

fn main() -> eframe::Result<()> {
    init_logging();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Timeline Board"),
        ..Default::default()
    };

    eframe::run_native(
        "Timeline Board",
        options,
        Box::new(|cc| Ok(Box::new(TimelineApp::new(cc)))),
    )
}
