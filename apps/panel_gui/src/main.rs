use clap::Parser;
use crossbeam_channel::bounded;
use egui::ViewportBuilder;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use backend_bridge::commands::PanelCommand;
use controller::events::UiEvent;

#[derive(Parser, Debug)]
#[command(name = "panel_gui", about = "Company panel over the EBITDA directory service")]
struct Args {
    /// Base URL of the company directory service; overrides file and env config.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    let (cmd_tx, cmd_rx) = bounded::<PanelCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(settings.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Company Panel")
            .with_inner_size([760.0, 680.0])
            .with_min_inner_size([560.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Company Panel",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ui::app::CompanyPanelApp::new(
                settings, cmd_tx, ui_rx,
            )))
        }),
    )
}
