//! UI/backend events and error modeling for the greeter window.

pub enum UiEvent {
    SubmissionCompleted,
    SubmissionRefused,
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Remote,
    Configuration,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if http_error_status(&message).is_some() {
            UiErrorCategory::Remote
        } else if message_lower.contains("invalid server url")
            || message_lower.contains("must use http")
            || message_lower.contains("backend unavailable")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("error sending request")
            || message_lower.contains("connection")
            || message_lower.contains("timed out")
            || message_lower.contains("dns")
            || message_lower.contains("network")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line text for the status bar.
    pub fn status_line(&self) -> String {
        match self.category {
            UiErrorCategory::Configuration => {
                format!("Configuration error: {}", self.message)
            }
            UiErrorCategory::Transport => {
                "Server unreachable; check --server-url and that the server is running.".to_string()
            }
            UiErrorCategory::Remote => format!("Server error: {}", self.message),
            UiErrorCategory::Unknown => format!("Request failed: {}", self.message),
        }
    }
}

/// Status code of a non-2xx reply, read from the `"<code> <reason>"` head that
/// the HTTP client puts on those errors. The head is followed by `:` and the
/// server's message, or ends the text when the body was empty.
fn http_error_status(message: &str) -> Option<u16> {
    let rest = message
        .strip_prefix("remote call failed: ")
        .unwrap_or(message);
    let (code, reason) = rest.split_once(' ')?;
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let code: u16 = code.parse().ok()?;
    if !(400..600).contains(&code) {
        return None;
    }
    let reason = reason.split_once(':').map_or(reason, |(reason, _)| reason);
    let well_formed = reason.starts_with(|c: char| c.is_ascii_uppercase())
        && reason
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '-' || c == '\'');
    well_formed.then_some(code)
}
