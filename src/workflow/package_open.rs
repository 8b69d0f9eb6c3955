use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

use super::PackageForm;
use crate::backend::{Backend, BackendResult};
use crate::tui::Event;

/// Handler behind the `open-package` menu action
///
/// Fetches the package names in the background and posts the finished form
/// back to the UI as [`Event::PackagesLoaded`]. Only one fetch runs at a time.
#[derive(Clone)]
pub struct PackageOpenWorkflow {
    backend: Arc<dyn Backend>,
    events: mpsc::UnboundedSender<Event>,
    in_flight: Arc<AtomicBool>,
}

impl PackageOpenWorkflow {
    pub fn new(backend: Arc<dyn Backend>, events: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            backend,
            events,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Start fetching. Returns false if a fetch is already running.
    pub fn start(&self) -> bool {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("Package list fetch already in flight");
            return false;
        }

        let backend = self.backend.clone();
        let events = self.events.clone();
        let in_flight = self.in_flight.clone();

        tokio::spawn(async move {
            let result = Self::load(backend.as_ref()).await;
            in_flight.store(false, Ordering::SeqCst);
            if events.send(Event::PackagesLoaded(result)).is_err() {
                debug!("UI closed before the package list arrived");
            }
        });

        true
    }

    /// Fetch the package names and build the selection form
    pub async fn load(backend: &dyn Backend) -> BackendResult<PackageForm> {
        match backend.fetch_packages().await {
            Ok(names) => {
                debug!("Building package form with {} options", names.len());
                Ok(PackageForm::from_names(names))
            }
            Err(e) => {
                error!("Failed to fetch package list: {}", e);
                Err(e)
            }
        }
    }
}
