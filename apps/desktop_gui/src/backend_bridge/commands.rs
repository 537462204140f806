//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    /// The form's submit action: button click or Enter in the name field.
    Submit,
}
