mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;

#[derive(Parser, Debug)]
#[command(name = "contact-desk", about = "Desktop contact manager")]
struct Args {
    /// Base URL of the contact API server.
    #[arg(long, default_value = "http://localhost:3000")]
    server_url: String,

    /// tracing env-filter directive, e.g. `info` or `contact_core=debug`.
    #[arg(long, default_value = "info")]
    log_filter: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter.as_str())
        .init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::spawn(args.server_url, cmd_rx, ui_tx);

    // Initial listing; the worker answers with ContactsLoaded once ready.
    let _ = cmd_tx.try_send(BackendCommand::FetchContacts);

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Contact Desk",
        options,
        Box::new(move |_cc| Ok(Box::new(ui::ContactDeskApp::new(cmd_tx, ui_rx)))),
    )
}
