//! Client side of the greeter: the submission controller, the element seam it
//! drives, and the HTTP client for the backend actor.

use anyhow::{anyhow, Result};
use async_trait::async_trait;

pub mod controller;
pub mod error;
pub mod transport;
pub mod view;

pub use controller::{
    FailurePolicy, InteractionState, SubmissionController, SubmissionEvent, SubmitAction,
    SubmitOutcome,
};
pub use error::SubmitError;
pub use transport::HttpBackendClient;
pub use view::{FormElements, HeadlessForm, SubmissionView};

/// The remote actor method the controller calls: one string in, one string out.
#[async_trait]
pub trait GreetingBackend: Send + Sync {
    async fn greet(&self, name: &str) -> Result<String>;
}

/// Stand-in used when no backend could be configured. Every call fails with `reason`.
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl GreetingBackend for UnavailableBackend {
    async fn greet(&self, _name: &str) -> Result<String> {
        Err(anyhow!("backend unavailable: {}", self.reason))
    }
}
