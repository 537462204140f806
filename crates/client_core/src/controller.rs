//! Submission controller: binds a form's submit action to one remote call and
//! renders its result.
//!
//! A cycle runs `Idle -> Pending -> Idle`. The submit control's disabled flag
//! is a projection of that state and is written through [`SubmissionView`]
//! only, while the state lock is held. Returning to `Idle` is tied to a drop
//! guard, so the control is re-enabled on success, on failure and when the
//! host drops an in-flight cycle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::{error::SubmitError, view::SubmissionView, GreetingBackend};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionState {
    /// Control enabled, no request outstanding.
    #[default]
    Idle,
    /// Control disabled, exactly one request outstanding.
    Pending,
}

impl InteractionState {
    pub fn is_pending(self) -> bool {
        self == InteractionState::Pending
    }
}

/// The host's submit action. The controller always suppresses its default
/// behavior before doing anything else.
#[derive(Debug, Default)]
pub struct SubmitAction {
    default_prevented: bool,
}

impl SubmitAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Text captured from the input at the moment of submission, untrimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEvent {
    text: String,
}

impl SubmissionEvent {
    fn capture(view: &dyn SubmissionView) -> Self {
        Self {
            text: view.input_value(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// What the output element shows after a failed call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Leave the previous result in place.
    #[default]
    KeepOutput,
    /// Replace the output with `Error: <message>`.
    ShowError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The call resolved and its text was written to the output element.
    Rendered(String),
    /// Not dispatched: a cycle was already pending.
    Refused,
}

pub struct SubmissionController {
    backend: Arc<dyn GreetingBackend>,
    view: Arc<dyn SubmissionView>,
    state: Mutex<InteractionState>,
    failure_policy: FailurePolicy,
}

impl SubmissionController {
    pub fn new(backend: Arc<dyn GreetingBackend>, view: Arc<dyn SubmissionView>) -> Self {
        Self {
            backend,
            view,
            state: Mutex::new(InteractionState::Idle),
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn state(&self) -> InteractionState {
        *self.lock_state()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Handles one submit action.
    ///
    /// The default action is suppressed first, unconditionally. A submission
    /// that arrives while another cycle is pending is refused without calling
    /// the backend. Otherwise the control is disabled,
    /// the backend is called with the raw input text, the control is
    /// re-enabled and then the result is written to the output element.
    pub async fn on_submit(
        &self,
        action: &mut SubmitAction,
    ) -> Result<SubmitOutcome, SubmitError> {
        action.prevent_default();

        let Some((event, pending)) = self.begin() else {
            debug!("submit refused: a call is already pending");
            return Ok(SubmitOutcome::Refused);
        };

        debug!(text_len = event.text().len(), "dispatching remote call");
        let result = self.backend.greet(event.text()).await;
        drop(pending);

        match result {
            Ok(greeting) => {
                self.view.set_result_text(&greeting);
                info!(result_len = greeting.len(), "submission rendered");
                Ok(SubmitOutcome::Rendered(greeting))
            }
            Err(source) => {
                warn!(error = %format!("{source:#}"), "remote call failed");
                if self.failure_policy == FailurePolicy::ShowError {
                    self.view.set_result_text(&format!("Error: {source:#}"));
                }
                Err(SubmitError::RemoteCallFailure { source })
            }
        }
    }

    fn begin(&self) -> Option<(SubmissionEvent, PendingGuard<'_>)> {
        if self.state().is_pending() {
            return None;
        }
        let event = SubmissionEvent::capture(self.view.as_ref());

        let mut state = self.lock_state();
        if state.is_pending() {
            return None;
        }
        *state = InteractionState::Pending;
        self.view.set_busy(true);
        drop(state);

        Some((event, PendingGuard { controller: self }))
    }

    fn lock_state(&self) -> MutexGuard<'_, InteractionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Restores `Idle` and re-enables the control when dropped.
struct PendingGuard<'a> {
    controller: &'a SubmissionController,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.controller.lock_state();
        *state = InteractionState::Idle;
        self.controller.view.set_busy(false);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
