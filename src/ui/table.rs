use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::GameRecord;

const HEADERS: [&str; 10] = [
    "Game ID",
    "Home",
    "Away",
    "Points",
    "Pass Att",
    "Pass Yds",
    "Rush Yds",
    "Intl",
    "Thu",
    "Away?",
];

/// Table of the rows behind the bar charts.
pub fn selected_rows(ui: &mut Ui, rows: &[&GameRecord]) {
    if rows.is_empty() {
        ui.label("No rows for this team and season.");
        return;
    }

    TableBuilder::new(ui)
        .id_salt("selected_rows")
        .striped(true)
        // The dashboard already scrolls.
        .vscroll(false)
        .column(Column::auto().at_least(110.0))
        .columns(Column::auto(), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for h in HEADERS {
                header.col(|ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = rows[row.index()];
                let cells = [
                    r.game_id.clone(),
                    r.home_team.clone(),
                    r.away_team.clone(),
                    format!("{}", r.points_scored),
                    number(r.pass_attempts),
                    number(r.passing_yards),
                    number(r.rushing_yards),
                    flag(r.is_international),
                    flag(r.is_thursday),
                    flag(r.is_away == 1),
                ];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

fn number(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "–".to_string())
}

fn flag(b: bool) -> String {
    if b { "1" } else { "0" }.to_string()
}
