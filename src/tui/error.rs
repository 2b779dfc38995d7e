use thiserror;

/// The Result type for the terminal layer.
pub(crate) type Result<T> = std::result::Result<T, TuiError>;

pub struct TuiError {
    bt: std::backtrace::Backtrace,
    pub(crate) inner: InnerError,
}

impl std::fmt::Debug for TuiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0:?}\n{1}", self.inner, self.bt)
    }
}

impl std::fmt::Display for TuiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}", self.inner)
    }
}

impl std::error::Error for TuiError {}

impl From<std::io::Error> for TuiError {
    fn from(inner: std::io::Error) -> TuiError {
        InnerError::StdIOError(inner).into()
    }
}

impl From<InnerError> for TuiError {
    fn from(inner: InnerError) -> Self {
        Self {
            bt: std::backtrace::Backtrace::capture(),
            inner,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum InnerError {
    #[error("out of bounds x - {0}")]
    OutOfBoundsX(usize),

    #[error("out of bounds y - {0}")]
    OutOfBoundsY(usize),

    #[error("io error")]
    StdIOError(#[from] std::io::Error),
}
