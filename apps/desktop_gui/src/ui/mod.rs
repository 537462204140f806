//! UI layer: the app shell and the egui-backed form elements.

pub mod app;
pub mod form;

pub use app::GreeterApp;
pub use form::GuiForm;
