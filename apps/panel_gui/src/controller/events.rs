//! Events flowing from the directory worker back to the panel UI.

use client_core::DirectoryError;
use shared::domain::{Cif, Company};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    CompaniesLoaded(Vec<Company>),
    CompanyCreated(Cif),
    CompanyDeleted(Cif),
    SearchResolved { cif: Cif, company: Option<Company> },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Api,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Startup,
    FetchCompanies,
    CreateCompany,
    DeleteCompany,
    General,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Api => "Directory",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    /// The worker owns the typed transport errors, so categorization is a
    /// direct mapping rather than message sniffing.
    pub fn from_directory(context: UiErrorContext, err: &DirectoryError) -> Self {
        let category = match err {
            DirectoryError::Transport(_) => UiErrorCategory::Transport,
            DirectoryError::NotFound(_) | DirectoryError::Api { .. } => UiErrorCategory::Api,
            DirectoryError::InvalidBaseUrl(_) => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
