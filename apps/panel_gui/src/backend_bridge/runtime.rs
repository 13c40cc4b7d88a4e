//! Worker thread owning the HTTP directory client.
//!
//! Commands are processed strictly sequentially: one `recv`, one awaited
//! request, one event back to the UI. There is no cancellation and no
//! timeout beyond transport defaults.

use std::thread;

use client_core::{CompanyDirectory, HttpCompanyDirectory};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info};

use crate::backend_bridge::commands::PanelCommand;
use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<PanelCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorCategory::Unknown,
                    UiErrorContext::Startup,
                    format!("failed to build worker runtime: {err}"),
                )));
                error!("failed to build worker runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match HttpCompanyDirectory::new(&settings.server_url) {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_directory(
                        UiErrorContext::Startup,
                        &err,
                    )));
                    error!("worker startup failed: {err}");
                    return;
                }
            };
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Directory worker ready ({})",
                settings.server_url
            )));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    PanelCommand::FetchCompanies => {
                        info!("worker: fetch_companies");
                        match client.list_companies().await {
                            Ok(companies) => {
                                let _ = ui_tx.try_send(UiEvent::CompaniesLoaded(companies));
                            }
                            Err(err) => {
                                error!("worker: fetch_companies failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_directory(
                                    UiErrorContext::FetchCompanies,
                                    &err,
                                )));
                            }
                        }
                    }
                    PanelCommand::CreateCompany { company } => {
                        info!(cif = company.cif.as_str(), "worker: create_company");
                        match client.create_company(&company).await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::CompanyCreated(company.cif));
                            }
                            Err(err) => {
                                error!(
                                    cif = company.cif.as_str(),
                                    "worker: create_company failed: {err}"
                                );
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_directory(
                                    UiErrorContext::CreateCompany,
                                    &err,
                                )));
                            }
                        }
                    }
                    PanelCommand::SearchCompany { cif } => {
                        info!(cif = cif.as_str(), "worker: search_company");
                        // The panel shows every search failure as a miss;
                        // transport detail goes to the log only.
                        let company = match client.get_company(&cif).await {
                            Ok(company) => Some(company),
                            Err(err) => {
                                if !err.is_not_found() {
                                    error!(
                                        cif = cif.as_str(),
                                        "worker: search_company failed: {err}"
                                    );
                                }
                                None
                            }
                        };
                        let _ = ui_tx.try_send(UiEvent::SearchResolved { cif, company });
                    }
                    PanelCommand::DeleteCompany { cif } => {
                        info!(cif = cif.as_str(), "worker: delete_company");
                        match client.delete_company(&cif).await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::CompanyDeleted(cif));
                            }
                            Err(err) => {
                                error!(
                                    cif = cif.as_str(),
                                    "worker: delete_company failed: {err}"
                                );
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_directory(
                                    UiErrorContext::DeleteCompany,
                                    &err,
                                )));
                            }
                        }
                    }
                }
            }
        });
    });
}
