//! Chart specifications: everything the plots need, computed from the tables
//! without touching egui. Each builder is a pure function of its inputs.

use crate::config::{GAME_ID_LABEL, NOT_ROW_LEVEL_MESSAGE, POINTS_PER_GAME_LABEL};
use crate::data::aggregate::{AggregateRow, aggregate_by_team_season, highlight};
use crate::data::filter::{Selection, selected_indices, split_indices};
use crate::data::model::{GameTable, Metric, Split};

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// One game on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct GameBar {
    pub game_id: String,
    /// Metric summed over the game's rows; empty cells count as zero.
    pub value: f64,
    /// Any of the game's rows carries the split flag.
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Legend title for the flag colouring.
    pub color_label: String,
    pub bars: Vec<GameBar>,
}

/// What a bar section shows.
#[derive(Debug, Clone, PartialEq)]
pub enum BarSection {
    Chart(BarChartSpec),
    /// The split subset was empty.
    NoData(&'static str),
    /// The metric has no per-row value.
    NotRowLevel(&'static str),
}

/// Build one split's bar section from the selected rows.
///
/// The split subset only gates whether a chart is drawn; the chart itself
/// covers every selected row, coloured by the split flag.
pub fn bar_section(
    table: &GameTable,
    selected: &[usize],
    split: Split,
    metric: Metric,
    team: &str,
) -> BarSection {
    if split_indices(table, selected, split).is_empty() {
        return BarSection::NoData(split.empty_message());
    }

    let mut bars: Vec<GameBar> = Vec::new();
    for &i in selected {
        let record = &table.records[i];
        let value = match metric.row_value(record) {
            Ok(v) => v.unwrap_or(0.0),
            Err(e) => {
                log::debug!("{split:?} bar chart skipped: {e}");
                return BarSection::NotRowLevel(NOT_ROW_LEVEL_MESSAGE);
            }
        };
        let flagged = record.in_split(split);
        match bars.iter_mut().find(|b| b.game_id == record.game_id) {
            Some(bar) => {
                bar.value += value;
                bar.flagged |= flagged;
            }
            None => bars.push(GameBar {
                game_id: record.game_id.clone(),
                value,
                flagged,
            }),
        }
    }

    let label = metric.label();
    BarSection::Chart(BarChartSpec {
        id: format!("{}_bar", split.flag_column()),
        title: format!("{team} – {label} {}", split.title_suffix()),
        x_label: GAME_ID_LABEL.to_string(),
        y_label: label,
        color_label: split.flag_column().to_string(),
        bars,
    })
}

// ---------------------------------------------------------------------------
// Scatter charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub team: String,
    pub season: i64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightMarker {
    /// `"{team} {season}"`, drawn above the marker.
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChartSpec {
    pub id: String,
    pub heading: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
    /// `None` when the selected team has no row in this season.
    pub highlight: Option<HighlightMarker>,
}

/// League-wide scatter of points per game against one split's count.
pub fn scatter_chart(table: &GameTable, split: Split, selection: &Selection) -> ScatterChartSpec {
    let rows = aggregate_by_team_season(table, split);
    scatter_from_rows(&rows, split, selection)
}

fn scatter_from_rows(rows: &[AggregateRow], split: Split, selection: &Selection) -> ScatterChartSpec {
    debug_assert!(rows.iter().all(|r| r.split == split));
    let count_label = split.count_label();
    let highlight = highlight(rows, &selection.team, selection.season).map(|r| HighlightMarker {
        text: format!("{} {}", selection.team, selection.season),
        x: f64::from(r.split_games),
        y: r.points_per_game,
    });
    if highlight.is_none() {
        log::debug!(
            "No {} aggregate for {} {}",
            split.count_column(),
            selection.team,
            selection.season
        );
    }

    ScatterChartSpec {
        id: format!("{}_scatter", split.count_column()),
        heading: format!("{POINTS_PER_GAME_LABEL} vs. {count_label} (League-wide)"),
        title: format!("{POINTS_PER_GAME_LABEL} vs. {count_label} (All Teams)"),
        x_label: count_label.to_string(),
        y_label: POINTS_PER_GAME_LABEL.to_string(),
        points: rows
            .iter()
            .map(|r| ScatterPoint {
                team: r.posteam.clone(),
                season: r.season,
                x: f64::from(r.split_games),
                y: r.points_per_game,
            })
            .collect(),
        highlight,
    }
}

// ---------------------------------------------------------------------------
// The whole dashboard
// ---------------------------------------------------------------------------

/// Scatter order, top to bottom, below the bar sections.
pub const SCATTER_ORDER: [Split; 3] = [Split::Thursday, Split::International, Split::Away];

/// Everything drawn for one set of parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Indices of the selected team/season rows.
    pub selected: Vec<usize>,
    pub bars: Vec<(Split, BarSection)>,
    pub scatters: Vec<ScatterChartSpec>,
}

impl DashboardView {
    pub fn build(table: &GameTable, selection: &Selection, metric: Metric) -> Self {
        let selected = selected_indices(table, selection);
        let bars = Split::ALL
            .into_iter()
            .map(|split| (split, bar_section(table, &selected, split, metric, &selection.team)))
            .collect();
        let scatters = SCATTER_ORDER
            .into_iter()
            .map(|split| scatter_chart(table, split, selection))
            .collect();
        log::debug!(
            "Built view for {} {} / {metric}: {} rows selected",
            selection.team,
            selection.season,
            selected.len()
        );
        DashboardView {
            selected,
            bars,
            scatters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::preprocess::preprocess;
    use crate::data::testing::fixture_table;

    fn sel(team: &str, season: i64) -> Selection {
        Selection {
            team: team.to_string(),
            season,
        }
    }

    #[test]
    fn bar_chart_covers_all_selected_rows_coloured_by_flag() {
        let table = preprocess(&fixture_table());
        let idx = selected_indices(&table, &sel("KC", 2019));
        let BarSection::Chart(spec) =
            bar_section(&table, &idx, Split::International, Metric::PassingYards, "KC")
        else {
            panic!("expected a chart");
        };
        assert_eq!(spec.title, "KC – Passing Yards in International Games");
        assert_eq!(spec.y_label, "Passing Yards");
        assert_eq!(spec.x_label, "Game ID");
        assert_eq!(spec.bars.len(), 4);
        assert_eq!(spec.bars.iter().filter(|b| b.flagged).count(), 1);
        assert_eq!(spec.bars[0].game_id, "2019_01_KC_JAX");
        assert_eq!(spec.bars[0].value, 378.0);
    }

    #[test]
    fn empty_split_falls_back_to_message() {
        let table = preprocess(&fixture_table());
        let idx = selected_indices(&table, &sel("KC", 2022));
        assert_eq!(
            bar_section(&table, &idx, Split::International, Metric::PassingYards, "KC"),
            BarSection::NoData("No international games found for this team and season.")
        );
    }

    #[test]
    fn empty_selection_gives_every_bar_section_a_message() {
        let table = preprocess(&fixture_table());
        let view = DashboardView::build(&table, &sel("HOU", 2019), Metric::RushingYards);
        assert!(view.selected.is_empty());
        for (split, section) in &view.bars {
            assert_eq!(section, &BarSection::NoData(split.empty_message()));
        }
        assert!(view.scatters.iter().all(|s| s.highlight.is_none()));
    }

    #[test]
    fn points_per_game_is_refused_for_bars() {
        let table = preprocess(&fixture_table());
        let idx = selected_indices(&table, &sel("KC", 2019));
        assert_eq!(
            bar_section(&table, &idx, Split::Away, Metric::PointsPerGame, "KC"),
            BarSection::NotRowLevel(NOT_ROW_LEVEL_MESSAGE)
        );
    }

    #[test]
    fn rows_of_the_same_game_are_summed() {
        let mut a = crate::data::testing::game("g1", 2019, "KC", "KC", "DEN", 20.0, 10.0);
        a.pass_attempts = Some(10.0);
        a.is_thursday = true;
        let mut b = a.clone();
        b.pass_attempts = None;
        let mut c = a.clone();
        c.pass_attempts = Some(5.0);
        c.is_thursday = false;
        let table = preprocess(&GameTable::from_records(vec![a, b, c]));
        let BarSection::Chart(spec) =
            bar_section(&table, &[0, 1, 2], Split::Thursday, Metric::PassAttempts, "KC")
        else {
            panic!("expected a chart");
        };
        assert_eq!(spec.bars.len(), 1);
        assert_eq!(spec.bars[0].value, 15.0);
        assert!(spec.bars[0].flagged);
    }

    #[test]
    fn scatter_highlights_the_selection() {
        let table = preprocess(&fixture_table());
        let spec = scatter_chart(&table, Split::Away, &sel("KC", 2019));
        assert_eq!(spec.title, "Points per Game vs. Away Games (All Teams)");
        assert_eq!(spec.heading, "Points per Game vs. Away Games (League-wide)");
        assert_eq!(spec.points.len(), 8);
        let marker = spec.highlight.expect("KC 2019 should be highlighted");
        assert_eq!(marker.text, "KC 2019");
        assert_eq!(marker.x, 3.0);
        assert_eq!(marker.y, 29.25);
    }

    #[test]
    fn view_keeps_fixed_section_order() {
        let table = preprocess(&fixture_table());
        let view = DashboardView::build(&table, &sel("KC", 2019), Metric::PassAttempts);
        let bar_order: Vec<Split> = view.bars.iter().map(|(s, _)| *s).collect();
        assert_eq!(bar_order, Split::ALL.to_vec());
        let titles: Vec<&str> = view.scatters.iter().map(|s| s.x_label.as_str()).collect();
        assert_eq!(titles, vec!["Thursday Night Games", "International Games", "Away Games"]);
    }
}
