use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the dashboard from rendering.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source file is missing, unreadable, or lacks required columns.
    #[error("data unavailable at {}: {source:#}", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

/// A metric that cannot be read from a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("'{0}' has no row-level value")]
    NotRowLevel(&'static str),
}
