use super::model::{GameRecord, GameTable};
use crate::config::EXCLUDED_SEASONS;

/// Drop the excluded seasons and attach the derived columns.
///
/// Takes the loaded table by reference and returns a new one; the input is
/// left untouched. Running it on its own output changes nothing.
pub fn preprocess(table: &GameTable) -> GameTable {
    let kept = exclude_seasons(&table.records, &EXCLUDED_SEASONS);
    let derived = derive_columns(kept);

    let disagreements = derived
        .iter()
        .filter(|r| (r.is_away == 1) != r.is_away_game)
        .count();
    if disagreements > 0 {
        log::warn!(
            "{disagreements} rows where posteam is neither home_team nor away_team; \
             is_away and is_away_game disagree"
        );
    }

    log::debug!(
        "Preprocessed {} rows into {} ({} seasons excluded)",
        table.len(),
        derived.len(),
        EXCLUDED_SEASONS.len()
    );
    GameTable::from_records(derived)
}

/// Rows whose season is not in `excluded`, in source order.
pub fn exclude_seasons(records: &[GameRecord], excluded: &[i64]) -> Vec<GameRecord> {
    records
        .iter()
        .filter(|r| !excluded.contains(&r.season))
        .cloned()
        .collect()
}

/// Attach `is_away`, `points_scored` and `is_away_game` to every row.
///
/// Each column is its own predicate over the whole table. `is_away` and
/// `is_away_game` are computed independently from `away_team` and
/// `home_team` respectively.
pub fn derive_columns(mut records: Vec<GameRecord>) -> Vec<GameRecord> {
    let is_away: Vec<u8> = records
        .iter()
        .map(|r| u8::from(r.posteam.as_deref() == Some(r.away_team.as_str())))
        .collect();
    let points_scored: Vec<f64> = records
        .iter()
        .map(|r| {
            if r.posteam.as_deref() == Some(r.home_team.as_str()) {
                r.home_score
            } else {
                r.away_score
            }
        })
        .collect();
    let is_away_game: Vec<bool> = records
        .iter()
        .map(|r| r.posteam.as_deref() != Some(r.home_team.as_str()))
        .collect();

    for (i, r) in records.iter_mut().enumerate() {
        r.is_away = is_away[i];
        r.points_scored = points_scored[i];
        r.is_away_game = is_away_game[i];
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{fixture_table, game};

    #[test]
    fn excluded_seasons_are_gone() {
        let table = fixture_table();
        let out = preprocess(&table);
        assert!(out.records.iter().all(|r| r.season != 2020 && r.season != 2021));
        assert!(!out.seasons.contains(&2020));
        assert!(!out.seasons.contains(&2021));
        assert_eq!(out.len(), table.len() - 4);
        // BUF only plays in 2021.
        assert!(!out.teams.contains("BUF"));
    }

    #[test]
    fn both_pandemic_seasons_are_excluded() {
        let records = vec![
            game("a", 2019, "KC", "KC", "DEN", 1.0, 0.0),
            game("b", 2020, "KC", "KC", "DEN", 1.0, 0.0),
            game("c", 2021, "KC", "KC", "DEN", 1.0, 0.0),
            game("d", 2022, "KC", "KC", "DEN", 1.0, 0.0),
        ];
        let kept = exclude_seasons(&records, &EXCLUDED_SEASONS);
        let ids: Vec<&str> = kept.iter().map(|r| r.game_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn input_table_is_left_untouched() {
        let table = fixture_table();
        let before = table.records.clone();
        let _ = preprocess(&table);
        assert_eq!(table.records, before);
        assert!(table.records.iter().all(|r| r.points_scored == 0.0));
    }

    #[test]
    fn away_flags_agree_with_team_columns() {
        let out = preprocess(&fixture_table());
        for r in &out.records {
            assert_eq!(r.is_away == 1, r.posteam.as_deref() == Some(r.away_team.as_str()));
            assert_eq!(r.is_away_game, r.posteam.as_deref() != Some(r.home_team.as_str()));
            assert_eq!(r.is_away == 1, r.is_away_game, "row {r:?}");
        }
    }

    #[test]
    fn points_scored_follows_home_or_away() {
        let out = preprocess(&fixture_table());
        for r in &out.records {
            let expected = if r.posteam.as_deref() == Some(r.home_team.as_str()) {
                r.home_score
            } else {
                r.away_score
            };
            assert_eq!(r.points_scored, expected);
        }
        let kc_at_jax = &out.records[0];
        assert_eq!(kc_at_jax.points_scored, 40.0);
        assert_eq!(kc_at_jax.is_away, 1);
        let jax_home = &out.records[1];
        assert_eq!(jax_home.points_scored, 26.0);
        assert_eq!(jax_home.is_away, 0);
    }

    #[test]
    fn neutral_posteam_makes_the_two_away_columns_diverge() {
        let rows = derive_columns(vec![game("g", 2019, "XXX", "KC", "DEN", 10.0, 7.0)]);
        assert_eq!(rows[0].is_away, 0);
        assert!(rows[0].is_away_game);
        assert_eq!(rows[0].points_scored, 7.0);
    }

    #[test]
    fn preprocessing_is_idempotent() {
        let once = preprocess(&fixture_table());
        let twice = preprocess(&once);
        assert_eq!(once.records, twice.records);
        assert_eq!(once.teams, twice.teams);
        assert_eq!(once.seasons, twice.seasons);
    }
}
