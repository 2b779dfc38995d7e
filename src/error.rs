use thiserror;

/// The Result type for slide48.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("io error")]
    StdIOError(#[from] std::io::Error),

    #[error("log error")]
    LogError(#[from] log::SetLoggerError),

    #[error("stats file error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{source:?}")]
    TuiError {
        #[from]
        source: crate::tui::error::TuiError,
    },

    #[error("invalid direction code {0}, expected 0 (up), 1 (right), 2 (down) or 3 (left)")]
    InvalidDirection(u8),
}
