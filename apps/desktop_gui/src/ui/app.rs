//! App shell: the name field, the submit button and the greeting output.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};
use crate::ui::form::GuiForm;

pub struct GreeterApp {
    form: Arc<GuiForm>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
}

impl GreeterApp {
    pub fn new(
        form: Arc<GuiForm>,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        status: String,
    ) -> Self {
        Self {
            form,
            cmd_tx,
            ui_rx,
            status,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::SubmissionCompleted => self.status.clear(),
                UiEvent::SubmissionRefused => {
                    tracing::debug!("submit refused while a call was pending");
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
                    self.status = err.status_line();
                }
            }
        }
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(12.0);
            ui.heading("Greeter");
            ui.add_space(8.0);

            let mut submit = false;
            {
                let mut model = self.form.lock();
                let busy = model.busy;
                ui.horizontal(|ui| {
                    ui.label("Enter your name:");
                    let field = ui.text_edit_singleline(&mut model.name);
                    if field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = !busy;
                    }
                    if ui
                        .add_enabled(!busy, egui::Button::new("Click Me!"))
                        .clicked()
                    {
                        submit = true;
                    }
                    if busy {
                        ui.spinner();
                    }
                });
                ui.add_space(8.0);
                ui.label(egui::RichText::new(model.greeting.as_str()).strong());
            }

            if submit {
                dispatch_backend_command(&self.cmd_tx, BackendCommand::Submit, &mut self.status);
            }

            if !self.status.is_empty() {
                ui.separator();
                ui.colored_label(ui.visuals().warn_fg_color, self.status.as_str());
            }
        });
    }
}

impl eframe::App for GreeterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_form(ctx);

        if self.form.lock().busy {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
