use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CuratorError>;

/// Failures of the outer surfaces. Parsing itself never fails.
#[derive(Debug, Error)]
pub enum CuratorError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no article with id {0} in the payload")]
    ArticleNotInPayload(usize),
    #[error("no saved article with id {0}")]
    ArticleNotFound(i64),
    #[error("no search at history index {0}")]
    HistoryIndex(usize),
    #[error("summary is empty")]
    EmptySummary,
}
