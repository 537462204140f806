use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime};
use clap::Parser;
use client_core::{
    FailurePolicy, GreetingBackend, HttpBackendClient, SubmissionController, UnavailableBackend,
};
use controller::events::{UiError, UiErrorContext, UiEvent};
use crossbeam_channel::bounded;
use eframe::egui;
use ui::{GreeterApp, GuiForm};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8443")]
    server_url: String,
    /// Write failures into the greeting area instead of keeping the previous greeting.
    #[arg(long)]
    show_errors: bool,
}

/// Falls back to a backend that fails every call, so the window still opens
/// and reports the configuration problem.
fn connect_backend(server_url: &str) -> (Arc<dyn GreetingBackend>, Option<UiError>) {
    match HttpBackendClient::new(server_url) {
        Ok(client) => {
            tracing::info!(server_url = client.server_url(), "using greeter backend");
            (Arc::new(client), None)
        }
        Err(err) => {
            tracing::error!("{err:#}");
            let message = format!("{err:#}");
            (
                Arc::new(UnavailableBackend::new(message.clone())),
                Some(UiError::from_message(UiErrorContext::BackendStartup, message)),
            )
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Greeter")
            .with_inner_size([480.0, 220.0])
            .with_min_inner_size([360.0, 180.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Greeter",
        options,
        Box::new(move |cc| {
            let form = Arc::new(GuiForm::new(cc.egui_ctx.clone()));
            let (backend, startup_error) = connect_backend(&args.server_url);
            let failure_policy = if args.show_errors {
                FailurePolicy::ShowError
            } else {
                FailurePolicy::KeepOutput
            };
            let controller = Arc::new(
                SubmissionController::new(backend, form.clone())
                    .with_failure_policy(failure_policy),
            );
            runtime::launch(cmd_rx, ui_tx, controller);

            let status = startup_error
                .map(|err| err.status_line())
                .unwrap_or_default();
            Ok(Box::new(GreeterApp::new(form, cmd_tx, ui_rx, status)))
        }),
    )
}
