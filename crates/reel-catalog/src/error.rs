use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned HTTP {0}")]
    Status(u16),

    #[error("lookup cancelled")]
    Cancelled,
}

impl LookupError {
    /// Cancellation is an expected outcome of superseded queries, never a
    /// user-visible error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LookupError::Cancelled)
    }
}
