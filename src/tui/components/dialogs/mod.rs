//! Modal dialogs drawn over the main screen
//!
//! [`DialogService`] owns the single open session; sessions implement
//! [`DialogSession`] and report a [`DialogOutcome`] when the user is done.

pub mod package_select;
pub mod service;
pub mod types;

pub use package_select::PackageSelectDialog;
pub use service::DialogService;
pub use types::*;
