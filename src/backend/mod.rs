//! HTTP access to the ucc backend

mod client;
mod errors;
mod types;

pub use client::{Backend, HttpBackend};
pub use errors::{BackendError, BackendResult};
pub use types::WordNode;
