use std::collections::BTreeMap;

use super::model::{GameRecord, GameTable, Split};

/// League-wide summary of one (team, season) group.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub posteam: String,
    pub season: i64,
    /// Mean of `points_scored` over the group's rows.
    pub points_per_game: f64,
    /// Which split `split_games` counts; names the count column.
    pub split: Split,
    /// Sum of the split flag over the group's rows.
    pub split_games: u32,
}

/// Flag summed for the league-wide view. The away view counts
/// `is_away_game` rather than `is_away`.
fn aggregate_flag(record: &GameRecord, split: Split) -> bool {
    match split {
        Split::International => record.is_international,
        Split::Thursday => record.is_thursday,
        Split::Away => record.is_away_game,
    }
}

#[derive(Default)]
struct Accumulator {
    points: f64,
    rows: u32,
    flagged: u32,
}

/// Group the whole table by (team, season), one row per distinct pair,
/// ordered by team then season.
pub fn aggregate_by_team_season(table: &GameTable, split: Split) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<(&str, i64), Accumulator> = BTreeMap::new();
    for r in &table.records {
        let Some(team) = r.posteam.as_deref() else {
            continue;
        };
        let acc = groups.entry((team, r.season)).or_default();
        acc.points += r.points_scored;
        acc.rows += 1;
        acc.flagged += u32::from(aggregate_flag(r, split));
    }

    groups
        .into_iter()
        .map(|((team, season), acc)| AggregateRow {
            posteam: team.to_string(),
            season,
            points_per_game: acc.points / f64::from(acc.rows),
            split,
            split_games: acc.flagged,
        })
        .collect()
}

/// The aggregate row of the selected team and season, if present.
pub fn highlight<'a>(rows: &'a [AggregateRow], team: &str, season: i64) -> Option<&'a AggregateRow> {
    rows.iter().find(|r| r.posteam == team && r.season == season)
}
