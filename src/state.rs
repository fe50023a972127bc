use std::path::{Path, PathBuf};

use crate::chart::DashboardView;
use crate::color::TeamColors;
use crate::config::{NO_FILE_MESSAGE, NO_ROWS_LEFT_MESSAGE};
use crate::data::filter::Selection;
use crate::data::loader::load_file;
use crate::data::model::{GameTable, Metric};
use crate::data::preprocess::preprocess;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Preprocessed table (None until a file loads).
    pub table: Option<GameTable>,

    /// File the table came from.
    pub source: Option<PathBuf>,

    /// Sidebar team and season.
    pub selection: Option<Selection>,

    /// Sidebar metric.
    pub metric: Metric,

    /// Charts for the current parameters, rebuilt on every change.
    pub view: Option<DashboardView>,

    /// One colour per team for the league-wide scatters.
    pub team_colors: TeamColors,

    /// Load failure shown instead of the dashboard.
    pub status_message: Option<String>,
}

/// What the central panel shows instead of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder<'a> {
    /// The last load failed.
    LoadFailed(&'a str),
    /// A file loaded but every row was dropped by preprocessing.
    NoRowsLeft,
    /// Nothing loaded yet.
    NoFile,
}

impl Placeholder<'_> {
    pub fn message(&self) -> &str {
        match self {
            Placeholder::LoadFailed(msg) => msg,
            Placeholder::NoRowsLeft => NO_ROWS_LEFT_MESSAGE,
            Placeholder::NoFile => NO_FILE_MESSAGE,
        }
    }
}

impl AppState {
    /// `None` when there is a dashboard to draw.
    pub fn placeholder(&self) -> Option<Placeholder<'_>> {
        if let Some(msg) = &self.status_message {
            return Some(Placeholder::LoadFailed(msg));
        }
        match (&self.table, &self.view) {
            (Some(table), _) if table.is_empty() => Some(Placeholder::NoRowsLeft),
            (Some(_), Some(_)) => None,
            _ => Some(Placeholder::NoFile),
        }
    }

    /// Load and preprocess `path`. On failure the previous table, if any, is dropped.
    pub fn load(&mut self, path: &Path) {
        match load_file(path) {
            Ok(raw) => {
                log::info!(
                    "Loaded {} rows, {} teams, seasons {:?} from {}",
                    raw.len(),
                    raw.teams.len(),
                    raw.seasons,
                    path.display()
                );
                self.set_table(preprocess(&raw), path.to_path_buf());
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, e: DashboardError) {
        log::error!("{e}");
        self.table = None;
        self.view = None;
        self.selection = None;
        self.source = None;
        self.status_message = Some(format!("Error: {e}"));
    }

    /// Ingest a preprocessed table and reset the sidebar to its first values.
    pub fn set_table(&mut self, table: GameTable, source: PathBuf) {
        if table.is_empty() {
            log::warn!("{} has no rows left after preprocessing", source.display());
        }
        self.team_colors = TeamColors::new(&table.teams);
        self.selection = Selection::first_of(&table);
        self.metric = Metric::default();
        self.table = Some(table);
        self.source = Some(source);
        self.status_message = None;
        self.rebuild();
    }

    /// Recompute every chart from scratch.
    pub fn rebuild(&mut self) {
        self.view = match (&self.table, &self.selection) {
            (Some(table), Some(selection)) => {
                Some(DashboardView::build(table, selection, self.metric))
            }
            _ => None,
        };
    }

    pub fn set_team(&mut self, team: String) {
        if let Some(sel) = &mut self.selection {
            if sel.team != team {
                sel.team = team;
                self.rebuild();
            }
        }
    }

    pub fn set_season(&mut self, season: i64) {
        if let Some(sel) = &mut self.selection {
            if sel.season != season {
                sel.season = season;
                self.rebuild();
            }
        }
    }

    pub fn set_metric(&mut self, metric: Metric) {
        if self.metric != metric {
            self.metric = metric;
            self.rebuild();
        }
    }
}
