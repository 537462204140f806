//! Element seam between the controller and whatever renders the form.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::{
    controller::{SubmissionController, SubmitAction, SubmitOutcome},
    error::SubmitError,
};

/// The three elements the controller touches: the name input, the submit
/// control and the output element.
///
/// `set_busy` runs while the controller holds its state lock and must not call
/// back into the controller. `input_value` and `set_result_text` run outside it.
pub trait SubmissionView: Send + Sync {
    fn input_value(&self) -> String;
    fn set_busy(&self, busy: bool);
    fn set_result_text(&self, text: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormElements {
    pub input: String,
    pub disabled: bool,
    pub result_text: String,
}

/// In-memory form for hosts without a rendering surface.
///
/// Also acts as the host: [`HeadlessForm::dispatch_submit`] refuses submit
/// actions while the control is disabled.
#[derive(Debug, Default)]
pub struct HeadlessForm {
    elements: Mutex<FormElements>,
}

impl HeadlessForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: impl Into<String>) -> Self {
        let form = Self::new();
        form.set_input(input);
        form
    }

    pub fn set_input(&self, input: impl Into<String>) {
        self.lock().input = input.into();
    }

    pub fn is_disabled(&self) -> bool {
        self.lock().disabled
    }

    pub fn result_text(&self) -> String {
        self.lock().result_text.clone()
    }

    pub fn snapshot(&self) -> FormElements {
        self.lock().clone()
    }

    pub async fn dispatch_submit(
        &self,
        controller: &SubmissionController,
    ) -> Result<SubmitOutcome, SubmitError> {
        if self.is_disabled() {
            debug!("submit control is disabled; action not dispatched");
            return Ok(SubmitOutcome::Refused);
        }
        let mut action = SubmitAction::new();
        controller.on_submit(&mut action).await
    }

    fn lock(&self) -> MutexGuard<'_, FormElements> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SubmissionView for HeadlessForm {
    fn input_value(&self) -> String {
        self.lock().input.clone()
    }

    fn set_busy(&self, busy: bool) {
        self.lock().disabled = busy;
    }

    fn set_result_text(&self, text: &str) {
        self.lock().result_text = text.to_string();
    }
}
