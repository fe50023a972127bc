use std::path::Path;

use eframe::egui;

use crate::config::DEFAULT_DATA_PATH;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NflSplitsApp {
    pub state: AppState,
}

impl NflSplitsApp {
    /// Start with the default data file already loaded.
    pub fn new() -> Self {
        let mut state = AppState::default();
        state.load(Path::new(DEFAULT_DATA_PATH));
        Self { state }
    }
}

impl eframe::App for NflSplitsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selector_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: six chart regions ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::dashboard(ui, &self.state);
        });
    }
}
