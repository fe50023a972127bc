use super::model::{GameRecord, GameTable, Split};

// ---------------------------------------------------------------------------
// Selection: the three sidebar parameters
// ---------------------------------------------------------------------------

/// Team and season chosen in the sidebar. The metric only picks the plotted
/// column and plays no part in filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub team: String,
    pub season: i64,
}

impl Selection {
    /// First team alphabetically and the earliest season, if the table has any.
    pub fn first_of(table: &GameTable) -> Option<Selection> {
        Some(Selection {
            team: table.teams.first()?.clone(),
            season: *table.seasons.first()?,
        })
    }
}

/// Return indices of rows matching the selected team and season, in source order.
pub fn selected_indices(table: &GameTable, selection: &Selection) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.season == selection.season && r.team() == selection.team)
        .map(|(i, _)| i)
        .collect()
}

/// The rows behind `indices`.
pub fn rows<'a>(table: &'a GameTable, indices: &[usize]) -> Vec<&'a GameRecord> {
    indices.iter().map(|&i| &table.records[i]).collect()
}

/// Subset of already selected rows carrying the split flag.
pub fn split_indices(table: &GameTable, selected: &[usize], split: Split) -> Vec<usize> {
    selected
        .iter()
        .copied()
        .filter(|&i| table.records[i].in_split(split))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::preprocess::preprocess;
    use crate::data::testing::fixture_table;

    fn kc(season: i64) -> Selection {
        Selection {
            team: "KC".to_string(),
            season,
        }
    }

    #[test]
    fn selects_only_matching_team_and_season_in_order() {
        let table = preprocess(&fixture_table());
        let idx = selected_indices(&table, &kc(2019));
        assert_eq!(idx.len(), 4);
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
        for r in rows(&table, &idx) {
            assert_eq!(r.team(), "KC");
            assert_eq!(r.season, 2019);
        }
    }

    #[test]
    fn unknown_pair_selects_nothing() {
        let table = preprocess(&fixture_table());
        let sel = Selection {
            team: "HOU".to_string(),
            season: 2019,
        };
        assert!(selected_indices(&table, &sel).is_empty());
    }

    #[test]
    fn split_subsets_follow_their_flags() {
        let table = preprocess(&fixture_table());
        let idx = selected_indices(&table, &kc(2019));
        assert_eq!(split_indices(&table, &idx, Split::International).len(), 1);
        assert_eq!(split_indices(&table, &idx, Split::Thursday).len(), 1);
        assert_eq!(split_indices(&table, &idx, Split::Away).len(), 3);

        let idx = selected_indices(&table, &kc(2022));
        assert!(split_indices(&table, &idx, Split::International).is_empty());
    }

    #[test]
    fn default_selection_is_first_team_and_season() {
        let table = preprocess(&fixture_table());
        assert_eq!(
            Selection::first_of(&table),
            Some(Selection {
                team: "DEN".to_string(),
                season: 2019
            })
        );
        assert_eq!(Selection::first_of(&GameTable::default()), None);
    }
}
