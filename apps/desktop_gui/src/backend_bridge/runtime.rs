//! Runtime bridge between UI command queue and the submission controller.

use std::{sync::Arc, thread};

use client_core::{SubmissionController, SubmitAction, SubmitOutcome};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Each submit action becomes one task on
/// the worker's tokio runtime.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    controller: Arc<SubmissionController>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Submit => {
                    let controller = controller.clone();
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        let mut action = SubmitAction::new();
                        let event = match controller.on_submit(&mut action).await {
                            Ok(SubmitOutcome::Rendered(_)) => UiEvent::SubmissionCompleted,
                            Ok(SubmitOutcome::Refused) => UiEvent::SubmissionRefused,
                            Err(err) => {
                                tracing::warn!(error = %err, "submission failed");
                                UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Submit,
                                    err.to_string(),
                                ))
                            }
                        };
                        let _ = ui_tx.try_send(event);
                    });
                }
            }
        }
        tracing::debug!("ui command queue closed; backend worker exiting");
    });
}
