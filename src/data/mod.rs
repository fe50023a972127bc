/// Data layer: core types, loading, preprocessing, selection, aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → GameTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ preprocess  │  drop 2020/2021, derive is_away / points_scored / is_away_game
///   └────────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌───────────┐
///   │  filter   │          │ aggregate  │  (team, season) → mean points, split count
///   └──────────┘          └───────────┘
///   team + season rows,
///   split subsets
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod preprocess;

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;

    use super::model::{GameRecord, GameTable};

    /// A bare row with no flags and no metrics.
    pub fn game(
        game_id: &str,
        season: i64,
        posteam: &str,
        home_team: &str,
        away_team: &str,
        home_score: f64,
        away_score: f64,
    ) -> GameRecord {
        GameRecord {
            game_id: game_id.to_string(),
            season,
            posteam: Some(posteam.to_string()),
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            is_international: false,
            is_thursday: false,
            home_score,
            away_score,
            pass_attempts: None,
            passing_yards: None,
            rushing_yards: None,
            is_away: 0,
            points_scored: 0.0,
            is_away_game: false,
        }
    }

    /// The checked-in fixture, loaded but not preprocessed.
    pub fn fixture_table() -> GameTable {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("tests");
        path.push("fixtures");
        path.push("games.csv");
        super::loader::load_file(&path).expect("fixture should load")
    }
}
