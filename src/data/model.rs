use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::MetricError;

// ---------------------------------------------------------------------------
// GameRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One team's row for a game, as read from the source file.
///
/// The derived columns (`is_away`, `points_scored`, `is_away_game`) are zero
/// until [`crate::data::preprocess::preprocess`] fills them in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    pub season: i64,
    /// Offensive team. Rows without one are dropped by the loader.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub posteam: Option<String>,
    pub home_team: String,
    pub away_team: String,
    #[serde(deserialize_with = "flag")]
    pub is_international: bool,
    #[serde(deserialize_with = "flag")]
    pub is_thursday: bool,
    pub home_score: f64,
    pub away_score: f64,
    #[serde(default, deserialize_with = "optional_number")]
    pub pass_attempts: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub passing_yards: Option<f64>,
    #[serde(default, deserialize_with = "optional_number")]
    pub rushing_yards: Option<f64>,

    // -- derived --
    #[serde(skip)]
    pub is_away: u8,
    #[serde(skip)]
    pub points_scored: f64,
    #[serde(skip)]
    pub is_away_game: bool,
}

impl GameRecord {
    /// Offensive team code; empty only for rows the loader would have dropped.
    pub fn team(&self) -> &str {
        self.posteam.as_deref().unwrap_or("")
    }

    /// Whether this row carries the given split flag.
    pub fn in_split(&self, split: Split) -> bool {
        match split {
            Split::International => self.is_international,
            Split::Thursday => self.is_thursday,
            Split::Away => self.is_away == 1,
        }
    }
}

// -- serde helpers shared by the CSV and JSON loaders --

/// Parse a 0/1 style flag. Accepts integers, floats, booleans and their
/// string spellings; an empty cell counts as unset.
pub fn parse_flag(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.is_empty() {
        return Some(false);
    }
    if s.eq_ignore_ascii_case("true") {
        return Some(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Some(false);
    }
    s.parse::<f64>().ok().map(|v| v != 0.0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Number(f64),
    Text(String),
}

fn flag<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    match Option::<FlagRepr>::deserialize(de)? {
        None => Ok(false),
        Some(FlagRepr::Bool(b)) => Ok(b),
        Some(FlagRepr::Number(n)) => Ok(n != 0.0),
        Some(FlagRepr::Text(s)) => parse_flag(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("'{s}' is not a 0/1 flag"))),
    }
}

fn empty_as_none<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    let s = Option::<String>::deserialize(de)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Number(f64),
    Text(String),
}

fn optional_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    match Option::<NumberRepr>::deserialize(de)? {
        None => Ok(None),
        Some(NumberRepr::Number(n)) => Ok(Some(n)),
        Some(NumberRepr::Text(s)) if s.trim().is_empty() || s.trim() == "NA" => Ok(None),
        Some(NumberRepr::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("'{s}' is not a number"))),
    }
}

// ---------------------------------------------------------------------------
// GameTable – the full dataset
// ---------------------------------------------------------------------------

/// All rows plus the distinct values the selectors are populated from.
#[derive(Debug, Clone, Default)]
pub struct GameTable {
    pub records: Vec<GameRecord>,
    /// Distinct teams, alphabetical.
    pub teams: BTreeSet<String>,
    /// Distinct seasons, ascending.
    pub seasons: BTreeSet<i64>,
}

impl GameTable {
    /// Build the distinct-value indices from the records.
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let mut teams = BTreeSet::new();
        let mut seasons = BTreeSet::new();
        for r in &records {
            if let Some(team) = &r.posteam {
                teams.insert(team.clone());
            }
            seasons.insert(r.season);
        }
        GameTable {
            records,
            teams,
            seasons,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Metric – the fixed list offered by the metric selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    #[default]
    PassAttempts,
    PassingYards,
    RushingYards,
    PointsPerGame,
}

impl Metric {
    /// Selector order.
    pub const ALL: [Metric; 4] = [
        Metric::PassAttempts,
        Metric::PassingYards,
        Metric::RushingYards,
        Metric::PointsPerGame,
    ];

    /// Raw identifier as it appears in the source data.
    pub fn id(self) -> &'static str {
        match self {
            Metric::PassAttempts => "pass_attempts",
            Metric::PassingYards => "passing_yards",
            Metric::RushingYards => "rushing_yards",
            Metric::PointsPerGame => "points per game",
        }
    }

    /// Human-readable label: underscores to spaces, every word capitalised.
    pub fn label(self) -> String {
        title_case(&self.id().replace('_', " "))
    }

    /// Value of this metric for one row. `Ok(None)` means the cell is empty.
    pub fn row_value(self, record: &GameRecord) -> Result<Option<f64>, MetricError> {
        match self {
            Metric::PassAttempts => Ok(record.pass_attempts),
            Metric::PassingYards => Ok(record.passing_yards),
            Metric::RushingYards => Ok(record.rushing_yards),
            Metric::PointsPerGame => Err(MetricError::NotRowLevel(self.id())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Split – situational game categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    International,
    Thursday,
    Away,
}

impl Split {
    /// Display order of the bar sections.
    pub const ALL: [Split; 3] = [Split::International, Split::Thursday, Split::Away];

    /// Name of the flag column used for colouring the bar chart.
    pub fn flag_column(self) -> &'static str {
        match self {
            Split::International => "is_international",
            Split::Thursday => "is_thursday",
            Split::Away => "is_away",
        }
    }

    pub fn section_heading(self) -> &'static str {
        match self {
            Split::International => "International Games",
            Split::Thursday => "Thursday Night Games",
            Split::Away => "Away Games",
        }
    }

    /// Suffix of the bar chart title, after the metric label.
    pub fn title_suffix(self) -> &'static str {
        match self {
            Split::International => "in International Games",
            Split::Thursday => "on Thursday Night",
            Split::Away => "in Away Games",
        }
    }

    /// Shown instead of the bar chart when the split subset is empty.
    pub fn empty_message(self) -> &'static str {
        match self {
            Split::International => "No international games found for this team and season.",
            Split::Thursday => "No Thursday Night games found for this team and season.",
            Split::Away => "No away games found for this team and season.",
        }
    }

    /// Name of the count column in the league-wide aggregate.
    pub fn count_column(self) -> &'static str {
        match self {
            Split::International => "intl_games",
            Split::Thursday => "thursday_games",
            Split::Away => "away_games",
        }
    }

    /// Axis label of the count in the league-wide scatter.
    pub fn count_label(self) -> &'static str {
        match self {
            Split::International => "International Games",
            Split::Thursday => "Thursday Night Games",
            Split::Away => "Away Games",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_labels_are_title_cased() {
        assert_eq!(Metric::PassAttempts.label(), "Pass Attempts");
        assert_eq!(Metric::PassingYards.label(), "Passing Yards");
        assert_eq!(Metric::RushingYards.label(), "Rushing Yards");
        assert_eq!(Metric::PointsPerGame.label(), "Points Per Game");
    }

    #[test]
    fn metric_list_is_fixed_and_ordered() {
        let ids: Vec<&str> = Metric::ALL.iter().map(|m| m.id()).collect();
        assert_eq!(
            ids,
            vec!["pass_attempts", "passing_yards", "rushing_yards", "points per game"]
        );
        assert_eq!(Metric::default(), Metric::PassAttempts);
    }

    #[test]
    fn points_per_game_has_no_row_value() {
        let record = GameRecord {
            game_id: "g".into(),
            season: 2019,
            posteam: Some("KC".into()),
            home_team: "KC".into(),
            away_team: "DEN".into(),
            is_international: false,
            is_thursday: false,
            home_score: 24.0,
            away_score: 10.0,
            pass_attempts: Some(30.0),
            passing_yards: None,
            rushing_yards: Some(88.0),
            is_away: 0,
            points_scored: 0.0,
            is_away_game: false,
        };
        assert_eq!(Metric::PassAttempts.row_value(&record), Ok(Some(30.0)));
        assert_eq!(Metric::PassingYards.row_value(&record), Ok(None));
        assert!(matches!(
            Metric::PointsPerGame.row_value(&record),
            Err(MetricError::NotRowLevel(_))
        ));
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("1.0"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("False"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn table_indexes_distinct_teams_and_seasons() {
        let mk = |team: Option<&str>, season| GameRecord {
            game_id: "g".into(),
            season,
            posteam: team.map(str::to_string),
            home_team: "A".into(),
            away_team: "B".into(),
            is_international: false,
            is_thursday: false,
            home_score: 0.0,
            away_score: 0.0,
            pass_attempts: None,
            passing_yards: None,
            rushing_yards: None,
            is_away: 0,
            points_scored: 0.0,
            is_away_game: false,
        };
        let table = GameTable::from_records(vec![
            mk(Some("NYG"), 2019),
            mk(Some("BUF"), 2015),
            mk(Some("NYG"), 2015),
            mk(None, 2023),
        ]);
        assert_eq!(
            table.teams.iter().cloned().collect::<Vec<_>>(),
            vec!["BUF".to_string(), "NYG".to_string()]
        );
        assert_eq!(table.seasons.iter().copied().collect::<Vec<_>>(), vec![2015, 2019, 2023]);
    }
}
