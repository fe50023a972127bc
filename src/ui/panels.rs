use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::{DASHBOARD_TITLE, SIDEBAR_NOTE};
use crate::data::filter::rows;
use crate::data::model::Metric;
use crate::state::{AppState, Placeholder};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – the three selectors
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let (Some(table), Some(selection)) = (&state.table, &state.selection) else {
        match state.placeholder() {
            Some(Placeholder::NoRowsLeft) => ui.label("No rows left to select."),
            _ => ui.label("No dataset loaded."),
        };
        return;
    };

    // Clone what we need so we can mutate state inside the combo boxes.
    let teams: Vec<String> = table.teams.iter().cloned().collect();
    let seasons: Vec<i64> = table.seasons.iter().copied().collect();
    let current = selection.clone();

    ui.strong("Select Team");
    egui::ComboBox::from_id_salt("team")
        .selected_text(current.team.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for team in &teams {
                if ui.selectable_label(current.team == *team, team.as_str()).clicked() {
                    state.set_team(team.clone());
                }
            }
        });
    ui.add_space(6.0);

    ui.strong("Select Game Metric");
    let current_metric = state.metric;
    egui::ComboBox::from_id_salt("metric")
        .selected_text(current_metric.id())
        .show_ui(ui, |ui: &mut Ui| {
            for metric in Metric::ALL {
                if ui
                    .selectable_label(current_metric == metric, metric.id())
                    .clicked()
                {
                    state.set_metric(metric);
                }
            }
        });
    ui.add_space(6.0);

    ui.strong("Select Season");
    egui::ComboBox::from_id_salt("season")
        .selected_text(current.season.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &season in &seasons {
                if ui
                    .selectable_label(current.season == season, season.to_string())
                    .clicked()
                {
                    state.set_season(season);
                }
            }
        });

    ui.separator();
    ui.label(RichText::new("Note:").strong());
    ui.label(SIDEBAR_NOTE);
}

// ---------------------------------------------------------------------------
// Central panel – the six chart regions
// ---------------------------------------------------------------------------

/// Render the dashboard: bar sections first, then the league-wide scatters.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if let Some(placeholder) = state.placeholder() {
        let text = RichText::new(placeholder.message());
        let text = match placeholder {
            Placeholder::LoadFailed(_) => text.color(Color32::RED),
            _ => text,
        };
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(text);
        });
        return;
    }

    let (Some(table), Some(view)) = (&state.table, &state.view) else {
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new(DASHBOARD_TITLE).size(22.0));
            ui.add_space(8.0);

            egui::CollapsingHeader::new("Selected games")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    table::selected_rows(ui, &rows(table, &view.selected));
                });

            for (split, section) in &view.bars {
                subheader(ui, split.section_heading());
                plot::bar_section(ui, section);
            }

            for spec in &view.scatters {
                subheader(ui, &spec.heading);
                plot::scatter_chart(ui, spec, &state.team_colors);
            }
        });
}

fn subheader(ui: &mut Ui, text: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(text).heading());
    ui.separator();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(source)) = (&state.table, &state.source) {
            let selected = state.view.as_ref().map_or(0, |v| v.selected.len());
            ui.label(format!(
                "{} rows from {}, {} selected",
                table.len(),
                source.display(),
                selected
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open game data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
