// src/config.rs

// Data
pub const DEFAULT_DATA_PATH: &str = "NFL2014_2024.csv";
pub const EXCLUDED_SEASONS: [i64; 2] = [2020, 2021];

// Window
pub const APP_NAME: &str = "NFL Splits – International, Thursday & Away";
pub const WINDOW_SIZE: [f32; 2] = [1280.0, 900.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [720.0, 480.0];

// Charts
pub const BAR_CHART_HEIGHT: f32 = 300.0;
pub const SCATTER_CHART_HEIGHT: f32 = 360.0;
pub const HIGHLIGHT_RADIUS: f32 = 9.0;
pub const POINT_RADIUS: f32 = 3.5;

// Text shown verbatim
pub const DASHBOARD_TITLE: &str =
    "NFL Analysis on International, Thursday Night, and Away Games (2014–2024)";
pub const SIDEBAR_NOTE: &str = "International Data Begins in 2005 and there are 14 Thursday night \
     teams a season (some teams can get multiple and some can get none)";
pub const HIGHLIGHT_NAME: &str = "Selected Team";
pub const POINTS_PER_GAME_LABEL: &str = "Points per Game";
pub const GAME_ID_LABEL: &str = "Game ID";
pub const NO_FILE_MESSAGE: &str = "Open a file to view games  (File → Open…)";
pub const NO_ROWS_LEFT_MESSAGE: &str =
    "No rows left after excluding the 2020 and 2021 seasons. Open another file (File → Open…)";
pub const NOT_ROW_LEVEL_MESSAGE: &str =
    "Points per game is a league-wide aggregate; pick a row-level metric for this chart.";
