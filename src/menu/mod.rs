//! Menu actions, links and the dispatcher that routes between them

mod action;
mod dispatcher;
mod link;

pub use action::MenuAction;
pub use dispatcher::{DispatchOutcome, LinkOutcome, MenuDispatcher};
pub use link::{action_fragment, MenuLink};
