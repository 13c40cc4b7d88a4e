use serde::{Deserialize, Serialize};

/// Error payload shape the directory service returns on non-2xx responses,
/// e.g. `{"detail": "Company not found"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
