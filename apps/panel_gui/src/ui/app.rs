//! Company panel shell: explicit UI state, event reducer, and rendering.

use crossbeam_channel::{Receiver, Sender};
use shared::domain::{Cif, Company};

use crate::backend_bridge::commands::PanelCommand;
use crate::config::Settings;
use crate::controller::events::{err_label, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_panel_command;

const SEARCH_MISS_TEXT: &str = "Company not found.";

/// Draft of the add-company form. All fields are kept as text so the user
/// can type freely; conversion happens on submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyDraft {
    pub company_name: String,
    pub cif: String,
    pub ebitda_2023: String,
    pub ebitda_source: String,
    pub cif_source: String,
}

impl CompanyDraft {
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Local stand-in for the browser's native form constraints: required
    /// name/cif and a numeric EBITDA. A draft that fails here never
    /// reaches the wire.
    fn to_company(&self) -> Result<Company, String> {
        let company_name = self.company_name.trim();
        if company_name.is_empty() {
            return Err("Company name is required".to_string());
        }
        let cif = self.cif.trim();
        if cif.is_empty() {
            return Err("CIF is required".to_string());
        }
        let ebitda_2023 = parse_ebitda(&self.ebitda_2023)?;
        Ok(Company {
            company_name: company_name.to_string(),
            cif: Cif::new(cif),
            ebitda_2023,
            ebitda_source: optional(&self.ebitda_source),
            cif_source: optional(&self.cif_source),
        })
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_ebitda(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("EBITDA 2023 is required".to_string());
    }
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("EBITDA 2023 must be a number, got '{raw}'"))?;
    if !value.is_finite() {
        return Err("EBITDA 2023 must be a finite number".to_string());
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    NotAsked,
    Found(Company),
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

pub struct CompanyPanelApp {
    cmd_tx: Sender<PanelCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,

    // Panel visibility state machine: Hidden <-> Shown. The search result
    // area is independent and always present.
    panel_visible: bool,
    companies: Vec<Company>,
    draft: CompanyDraft,
    search_cif: String,
    last_search: SearchOutcome,
    pending_delete: Option<Cif>,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl CompanyPanelApp {
    pub fn new(settings: Settings, cmd_tx: Sender<PanelCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url: settings.server_url,
            panel_visible: false,
            companies: Vec::new(),
            draft: CompanyDraft::default(),
            search_cif: String::new(),
            last_search: SearchOutcome::NotAsked,
            pending_delete: None,
            status: "Starting directory worker...".to_string(),
            status_banner: None,
        }
    }

    fn dispatch(&mut self, cmd: PanelCommand) {
        dispatch_panel_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::CompaniesLoaded(companies) => {
                    // Wholesale replacement of the rendered list; no diffing.
                    self.companies = companies;
                    self.panel_visible = true;
                    self.status = format!("Loaded {} companies", self.companies.len());
                    self.status_banner = None;
                }
                UiEvent::CompanyCreated(cif) => {
                    self.status = format!("Company {cif} added successfully!");
                    self.status_banner = None;
                    self.draft.clear();
                    self.dispatch(PanelCommand::FetchCompanies);
                }
                UiEvent::CompanyDeleted(cif) => {
                    self.status = format!("Company {cif} deleted successfully!");
                    self.status_banner = None;
                    self.dispatch(PanelCommand::FetchCompanies);
                }
                UiEvent::SearchResolved { cif, company } => {
                    self.last_search = match company {
                        Some(company) => SearchOutcome::Found(company),
                        None => SearchOutcome::Missing,
                    };
                    self.status = match &self.last_search {
                        SearchOutcome::Found(_) => format!("Found company {cif}"),
                        _ => format!("No company with CIF {cif}"),
                    };
                }
                UiEvent::Error(err) => {
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                    if matches!(
                        err.context(),
                        UiErrorContext::Startup
                            | UiErrorContext::FetchCompanies
                            | UiErrorContext::CreateCompany
                            | UiErrorContext::DeleteCompany
                    ) {
                        self.status_banner = Some(StatusBanner {
                            severity: StatusBannerSeverity::Error,
                            message: self.status.clone(),
                        });
                    }
                }
            }
        }
    }

    fn submit_new_company(&mut self) {
        match self.draft.to_company() {
            Ok(company) => self.dispatch(PanelCommand::CreateCompany { company }),
            Err(message) => {
                self.status = format!("Validation error: {message}");
            }
        }
    }

    fn submit_search(&mut self) {
        let cif = self.search_cif.trim();
        if cif.is_empty() {
            self.status = "Enter a CIF to search".to_string();
            return;
        }
        let cif = Cif::new(cif);
        self.dispatch(PanelCommand::SearchCompany { cif });
    }

    fn confirm_delete(&mut self) {
        if let Some(cif) = self.pending_delete.take() {
            self.dispatch(PanelCommand::DeleteCompany { cif });
        }
    }

    fn decline_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Local flip only; the cached list stays so Show is instant again
    /// after a fresh fetch.
    fn hide_panel(&mut self) {
        self.panel_visible = false;
    }

    fn show_status_banner(&self, ui: &mut egui::Ui) {
        if let Some(banner) = &self.status_banner {
            let color = match banner.severity {
                StatusBannerSeverity::Error => ui.visuals().error_fg_color,
            };
            egui::Frame::NONE
                .fill(color.gamma_multiply(0.12))
                .corner_radius(6.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.colored_label(color, &banner.message);
                });
            ui.add_space(6.0);
        }
    }

    fn show_add_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Add a company");
        egui::Grid::new("add_company_form")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Company name");
                ui.add(
                    egui::TextEdit::singleline(&mut self.draft.company_name).hint_text("Acme"),
                );
                ui.end_row();

                ui.label("CIF");
                ui.add(egui::TextEdit::singleline(&mut self.draft.cif).hint_text("A123"));
                ui.end_row();

                ui.label("EBITDA 2023");
                ui.add(
                    egui::TextEdit::singleline(&mut self.draft.ebitda_2023).hint_text("42.5"),
                );
                ui.end_row();

                ui.label("EBITDA source");
                ui.text_edit_singleline(&mut self.draft.ebitda_source);
                ui.end_row();

                ui.label("CIF source");
                ui.text_edit_singleline(&mut self.draft.cif_source);
                ui.end_row();
            });
        ui.add_space(4.0);
        if ui.button("Add Company").clicked() {
            self.submit_new_company();
        }
    }

    fn show_search_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Search by CIF");
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_cif).hint_text("CIF to look up"),
            );
            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Search").clicked() || enter_pressed {
                self.submit_search();
            }
        });
        match &self.last_search {
            SearchOutcome::NotAsked => {
                ui.weak("No search yet.");
            }
            SearchOutcome::Found(company) => {
                ui.label(format!("Company Name: {}", company.company_name));
                ui.label(format!("CIF: {}", company.cif));
                ui.label(format!("EBITDA 2023: {}", company.ebitda_2023));
            }
            SearchOutcome::Missing => {
                ui.label(SEARCH_MISS_TEXT);
            }
        }
    }

    fn show_companies_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Companies");
        if !self.panel_visible {
            if ui.button("Show All Companies").clicked() {
                self.dispatch(PanelCommand::FetchCompanies);
            }
            return;
        }

        if ui.button("Hide Companies").clicked() {
            self.hide_panel();
            return;
        }

        let mut delete_request: Option<Cif> = None;
        egui::ScrollArea::vertical()
            .max_height(260.0)
            .show(ui, |ui| {
                if self.companies.is_empty() {
                    ui.weak("The directory has no companies.");
                }
                for company in &self.companies {
                    ui.horizontal(|ui| {
                        ui.label(company.summary());
                        if ui.small_button("Delete").clicked() {
                            delete_request = Some(company.cif.clone());
                        }
                    });
                }
            });
        if let Some(cif) = delete_request {
            self.pending_delete = Some(cif);
        }
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(cif) = self.pending_delete.clone() else {
            return;
        };
        egui::Window::new("Confirm deletion")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!(
                    "Are you sure you want to delete company {cif}?"
                ));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        self.confirm_delete();
                    }
                    if ui.button("Cancel").clicked() {
                        self.decline_delete();
                    }
                });
            });
    }
}

impl eframe::App for CompanyPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Company Panel");
                ui.weak(&self.server_url);
                ui.separator();
                ui.small(&self.status);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            self.show_add_form(ui);
            ui.add_space(8.0);
            ui.separator();
            self.show_search_form(ui);
            ui.add_space(8.0);
            ui.separator();
            self.show_companies_panel(ui);
        });

        self.show_delete_confirmation(ctx);

        // Worker events arrive on a channel, not through egui input, so
        // keep repainting while something may still be in flight.
        ctx.request_repaint_after(std::time::Duration::from_millis(150));
    }
}
