mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::NflSplitsApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        config::APP_NAME,
        options,
        Box::new(|_cc| Ok(Box::new(NflSplitsApp::new()))),
    )
}
