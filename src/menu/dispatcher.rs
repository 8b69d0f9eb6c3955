//! Routes menu links to the handlers registered for their actions
//!
//! The dispatcher is owned by the application and torn down with it. Handlers
//! are keyed by [`MenuAction`], so a fragment naming no known action can only
//! ever be a no-op at dispatch time.

use std::collections::HashMap;
use tracing::{debug, warn};

use super::{action_fragment, MenuAction};

/// Zero-argument handler invoked when an action is dispatched
pub type MenuHandler = Box<dyn FnMut() + Send>;

/// Result of dispatching an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler for this action ran once
    Handled(MenuAction),

    /// No handler ran for this name
    Unregistered(String),
}

/// Result of following a menu link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The link carried a fragment; default navigation was suppressed
    Dispatched(DispatchOutcome),

    /// The link had no fragment; default navigation proceeds to this href
    Navigate(String),
}

impl LinkOutcome {
    pub fn prevents_default(&self) -> bool {
        matches!(self, LinkOutcome::Dispatched(_))
    }
}

#[derive(Default)]
pub struct MenuDispatcher {
    handlers: HashMap<MenuAction, MenuHandler>,
}

impl MenuDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the handler for `action`. Returns true when a previous
    /// handler was replaced.
    pub fn register<F>(&mut self, action: MenuAction, handler: F) -> bool
    where
        F: FnMut() + Send + 'static,
    {
        debug!("Registering handler for {}", action);
        self.handlers.insert(action, Box::new(handler)).is_some()
    }

    pub fn is_registered(&self, action: MenuAction) -> bool {
        self.handlers.contains_key(&action)
    }

    pub fn registered_actions(&self) -> Vec<MenuAction> {
        MenuAction::ALL
            .into_iter()
            .filter(|action| self.is_registered(*action))
            .collect()
    }

    /// Invoke the handler registered for `action`, if any
    pub fn dispatch(&mut self, action: MenuAction) -> DispatchOutcome {
        match self.handlers.get_mut(&action) {
            Some(handler) => {
                debug!("Dispatching {}", action);
                handler();
                DispatchOutcome::Handled(action)
            }
            None => {
                warn!("No handler registered for {}", action);
                DispatchOutcome::Unregistered(action.name().to_string())
            }
        }
    }

    /// Dispatch by action name as it appears in a link fragment
    pub fn dispatch_fragment(&mut self, name: &str) -> DispatchOutcome {
        match name.parse::<MenuAction>() {
            Ok(action) => self.dispatch(action),
            Err(e) => {
                warn!("{}", e);
                DispatchOutcome::Unregistered(name.to_string())
            }
        }
    }

    /// Follow a menu link. Links with a `#` dispatch their fragment and never
    /// navigate, whether or not a handler exists.
    pub fn follow_link(&mut self, href: &str) -> LinkOutcome {
        match action_fragment(href) {
            Some(name) => LinkOutcome::Dispatched(self.dispatch_fragment(name)),
            None => {
                debug!("Link {} has no action fragment", href);
                LinkOutcome::Navigate(href.to_string())
            }
        }
    }

    /// Drop every handler, releasing whatever they captured
    pub fn teardown(&mut self) {
        debug!("Tearing down {} menu handlers", self.handlers.len());
        self.handlers.clear();
    }
}

impl std::fmt::Debug for MenuDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuDispatcher")
            .field("actions", &self.registered_actions())
            .finish()
    }
}
