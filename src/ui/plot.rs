use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, MarkerShape, Plot, PlotPoint, Points, Text};

use crate::chart::{BarChartSpec, BarSection, ScatterChartSpec, ScatterPoint};
use crate::color::{self, TeamColors};
use crate::config::{
    BAR_CHART_HEIGHT, HIGHLIGHT_NAME, HIGHLIGHT_RADIUS, POINT_RADIUS, SCATTER_CHART_HEIGHT,
};

// ---------------------------------------------------------------------------
// Bar sections
// ---------------------------------------------------------------------------

/// Render a bar section: the chart, or the text that replaces it.
pub fn bar_section(ui: &mut Ui, section: &BarSection) {
    match section {
        BarSection::Chart(spec) => bar_chart(ui, spec),
        BarSection::NoData(msg) | BarSection::NotRowLevel(msg) => {
            ui.label(*msg);
        }
    }
}

fn bar_chart(ui: &mut Ui, spec: &BarChartSpec) {
    ui.label(RichText::new(&spec.title).strong());

    let (flagged, unflagged): (Vec<Bar>, Vec<Bar>) = spec
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let fill = if b.flagged { color::FLAGGED } else { color::UNFLAGGED };
            (
                b.flagged,
                Bar::new(i as f64, b.value)
                    .name(&b.game_id)
                    .fill(fill)
                    .width(0.8),
            )
        })
        .fold((Vec::new(), Vec::new()), |(mut yes, mut no), (is_flagged, bar)| {
            if is_flagged {
                yes.push(bar);
            } else {
                no.push(bar);
            }
            (yes, no)
        });

    let game_ids: Vec<String> = spec.bars.iter().map(|b| b.game_id.clone()).collect();
    let y_label = spec.y_label.clone();

    Plot::new(&spec.id)
        .height(BAR_CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.x_label.as_str())
        .y_axis_label(spec.y_label.as_str())
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            game_id_at(&game_ids, mark.value).unwrap_or_default()
        })
        .label_formatter(move |name: &str, value: &PlotPoint| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\n{y_label}: {:.1}", value.y)
            }
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(flagged)
                    .name(format!("{} = 1", spec.color_label))
                    .color(color::FLAGGED),
            );
            plot_ui.bar_chart(
                BarChart::new(unflagged)
                    .name(format!("{} = 0", spec.color_label))
                    .color(color::UNFLAGGED),
            );
        });
}

/// Game id for an axis mark sitting exactly on a bar.
fn game_id_at(game_ids: &[String], position: f64) -> Option<String> {
    if position < 0.0 || position.fract() != 0.0 {
        return None;
    }
    game_ids.get(position as usize).cloned()
}

// ---------------------------------------------------------------------------
// League-wide scatters
// ---------------------------------------------------------------------------

/// Render a league-wide scatter, one series per team plus the highlight.
pub fn scatter_chart(ui: &mut Ui, spec: &ScatterChartSpec, colors: &TeamColors) {
    ui.label(RichText::new(&spec.title).strong());

    let mut by_team: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &spec.points {
        by_team.entry(p.team.as_str()).or_default().push([p.x, p.y]);
    }

    let points = spec.points.clone();
    let x_label = spec.x_label.clone();
    let y_label = spec.y_label.clone();

    Plot::new(&spec.id)
        .height(SCATTER_CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.x_label.as_str())
        .y_axis_label(spec.y_label.as_str())
        .label_formatter(move |name: &str, value: &PlotPoint| {
            hover_text(&points, name, value, &x_label, &y_label)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (team, coords) in by_team {
                plot_ui.points(
                    Points::new(coords)
                        .name(team)
                        .color(colors.color_for(team))
                        .radius(POINT_RADIUS)
                        .filled(true),
                );
            }

            if let Some(h) = &spec.highlight {
                plot_ui.points(
                    Points::new(vec![[h.x, h.y]])
                        .name(HIGHLIGHT_NAME)
                        .color(color::HIGHLIGHT)
                        .shape(MarkerShape::Asterisk)
                        .radius(HIGHLIGHT_RADIUS),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(h.x, h.y), RichText::new(&h.text).strong())
                        .anchor(Align2::CENTER_BOTTOM)
                        .color(color::HIGHLIGHT),
                );
            }
        });
}

/// Tooltip: team, seasons sharing the hovered coordinates, and both values.
fn hover_text(
    points: &[ScatterPoint],
    name: &str,
    value: &PlotPoint,
    x_label: &str,
    y_label: &str,
) -> String {
    if name.is_empty() {
        return String::new();
    }
    let seasons: Vec<String> = points
        .iter()
        .filter(|p| p.team == name && p.x == value.x && (p.y - value.y).abs() < 1e-9)
        .map(|p| p.season.to_string())
        .collect();
    let header = if seasons.is_empty() {
        name.to_string()
    } else {
        format!("{name} {}", seasons.join(", "))
    };
    format!("{header}\n{x_label}: {}\n{y_label}: {:.2}", value.x, value.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_marks_only_label_whole_positions() {
        let ids = vec!["g1".to_string(), "g2".to_string()];
        assert_eq!(game_id_at(&ids, 1.0).as_deref(), Some("g2"));
        assert_eq!(game_id_at(&ids, 0.5), None);
        assert_eq!(game_id_at(&ids, -1.0), None);
        assert_eq!(game_id_at(&ids, 2.0), None);
    }

    #[test]
    fn hover_names_every_season_at_the_point() {
        let p = |season, x, y| ScatterPoint {
            team: "KC".to_string(),
            season,
            x,
            y,
        };
        let points = vec![p(2018, 1.0, 30.0), p(2019, 1.0, 30.0), p(2022, 2.0, 27.0)];
        let text = hover_text(&points, "KC", &PlotPoint::new(1.0, 30.0), "Away Games", "Points per Game");
        assert_eq!(text, "KC 2018, 2019\nAway Games: 1\nPoints per Game: 30.00");
        assert_eq!(hover_text(&points, "", &PlotPoint::new(1.0, 30.0), "x", "y"), "");
    }
}
