use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("missing metric `{name}` in training history")]
    MissingMetric { name: String },

    #[error("metric `{name}` has {found} epochs, expected {expected}")]
    MismatchedLength {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("training history has no epochs")]
    EmptyHistory,

    #[error("plot error: {0}")]
    Plot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}
