use shared::domain::Cif;
use thiserror::Error;

/// Failure taxonomy for directory operations.
///
/// `Transport` is a request that never completed; `Api` is a completed
/// request the service rejected; `NotFound` is the single-record case of
/// a rejection the callers care to distinguish.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("no company with CIF {0}")]
    NotFound(Cif),
    #[error("directory rejected the request ({status}): {detail}")]
    Api { status: u16, detail: String },
    #[error("invalid directory base url '{0}'")]
    InvalidBaseUrl(String),
}

impl DirectoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
