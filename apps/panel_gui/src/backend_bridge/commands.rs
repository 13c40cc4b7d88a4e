//! Intents queued from the panel UI to the directory worker.

use shared::domain::{Cif, Company};

#[derive(Debug)]
pub enum PanelCommand {
    FetchCompanies,
    CreateCompany { company: Company },
    SearchCompany { cif: Cif },
    DeleteCompany { cif: Cif },
}
