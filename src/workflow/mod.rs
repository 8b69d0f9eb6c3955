//! Multi-step interactions started from the menu

mod form;
mod package_open;

pub use form::PackageForm;
pub use package_open::PackageOpenWorkflow;
