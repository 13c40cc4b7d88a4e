use std::fmt;

use serde::{Deserialize, Serialize};

/// Textual company identifier. The remote directory treats it as globally
/// unique; clients never enforce uniqueness themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cif(pub String);

impl Cif {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cif {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A company record as the directory service stores and serves it.
/// Clients hold transient copies only; there is no local persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub company_name: String,
    pub cif: Cif,
    pub ebitda_2023: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebitda_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cif_source: Option<String>,
}

impl Company {
    /// One-line list-entry text. The provenance fields are submitted on
    /// creation but never rendered.
    pub fn summary(&self) -> String {
        format!(
            "{} (CIF: {}) - EBITDA 2023: {}",
            self.company_name, self.cif, self.ebitda_2023
        )
    }
}
