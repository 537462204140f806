//! Form elements shared between the egui thread and the backend worker.

use std::sync::{Mutex, MutexGuard, PoisonError};

use client_core::SubmissionView;

#[derive(Debug, Default)]
pub struct FormModel {
    pub name: String,
    pub busy: bool,
    pub greeting: String,
}

/// egui-side [`SubmissionView`]. The frame draws from [`FormModel`]; every
/// write from the controller requests a repaint.
pub struct GuiForm {
    model: Mutex<FormModel>,
    ctx: egui::Context,
}

impl GuiForm {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            model: Mutex::new(FormModel::default()),
            ctx,
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, FormModel> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SubmissionView for GuiForm {
    fn input_value(&self) -> String {
        self.lock().name.clone()
    }

    fn set_busy(&self, busy: bool) {
        self.lock().busy = busy;
        self.ctx.request_repaint();
    }

    fn set_result_text(&self, text: &str) {
        self.lock().greeting = text.to_string();
        self.ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use client_core::{SubmissionController, SubmitAction, UnavailableBackend};

    #[test]
    fn view_writes_land_in_model() {
        let form = GuiForm::new(egui::Context::default());
        form.lock().name = "Alice".to_string();

        assert_eq!(form.input_value(), "Alice");
        form.set_busy(true);
        assert!(form.lock().busy);
        form.set_result_text("Hello, Alice!");
        form.set_busy(false);

        let model = form.lock();
        assert!(!model.busy);
        assert_eq!(model.greeting, "Hello, Alice!");
    }

    #[test]
    fn failed_submission_leaves_button_enabled() {
        let form = Arc::new(GuiForm::new(egui::Context::default()));
        let controller = SubmissionController::new(
            Arc::new(UnavailableBackend::new("offline")),
            form.clone(),
        );
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");

        let mut action = SubmitAction::new();
        let result = runtime.block_on(controller.on_submit(&mut action));

        assert!(result.is_err());
        assert!(!form.lock().busy);
        assert!(form.lock().greeting.is_empty());
    }
}
