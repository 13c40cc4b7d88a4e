//! Command dispatch from panel widgets to the worker queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::PanelCommand;

pub fn dispatch_panel_command(
    cmd_tx: &Sender<PanelCommand>,
    cmd: PanelCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        PanelCommand::FetchCompanies => "fetch_companies",
        PanelCommand::CreateCompany { .. } => "create_company",
        PanelCommand::SearchCompany { .. } => "search_company",
        PanelCommand::DeleteCompany { .. } => "delete_company",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->worker command"),
        Err(TrySendError::Full(_)) => {
            *status = "Command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Directory worker disconnected (possible startup failure); restart the app"
                    .to_string();
        }
    }
}
