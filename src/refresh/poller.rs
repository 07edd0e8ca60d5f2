//! Per-family polling loops
//!
//! Each resource family (solutions, environments) gets its own
//! self-rescheduling loop: run the family's fetch sequence, sleep, re-check
//! the refresh flag. The flag in the store is the only stop condition and
//! has exactly two writers, `start()` (true) and `stop()` (false), so a stop
//! can never be overwritten by a racing iteration. `stop()` is cooperative
//! and never aborts an iteration in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::SolutionsApi;
use crate::constants::REFRESH_TIMEOUT;
use crate::refresh::{
    FetchError, RefreshFamily, fetch_environments, fetch_solutions, fetch_ui_services,
};
use crate::session::SessionEvent;
use crate::store::SolutionsStore;

/// Polling loop for one resource family.
pub struct RefreshLoop {
    family: RefreshFamily,
    api: Arc<dyn SolutionsApi>,
    store: SolutionsStore,
    interval: Duration,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl RefreshLoop {
    pub fn new(
        family: RefreshFamily,
        api: Arc<dyn SolutionsApi>,
        store: SolutionsStore,
        event_tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            family,
            api,
            store,
            interval: REFRESH_TIMEOUT,
            event_tx,
        }
    }

    /// Override the delay between iterations.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start polling. A no-op while the family is already refreshing.
    pub fn start(&self) {
        if self.store.is_refreshing(self.family) {
            debug!("{} refresh already running", self.family);
            return;
        }
        self.store.set_refreshing(self.family, true);

        let family = self.family;
        let api = Arc::clone(&self.api);
        let store = self.store.clone();
        let interval = self.interval;
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            run_refresh_loop(family, api, store, interval, event_tx).await;
        });
    }

    /// Ask the loop to stop.
    ///
    /// Only clears the flag: the iteration in flight (fetches and the
    /// inter-iteration sleep) always runs to completion, and no new
    /// iteration starts once the flag is observed false.
    pub fn stop(&self) {
        self.store.set_refreshing(self.family, false);
    }
}

async fn run_refresh_loop(
    family: RefreshFamily,
    api: Arc<dyn SolutionsApi>,
    store: SolutionsStore,
    interval: Duration,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
) {
    loop {
        if let Err(err) = run_fetch_sequence(family, api.as_ref(), &store).await {
            warn!("{family} refresh loop stopped: {err}");
            // The store keeps its last-good lists and no error state; the
            // stop event is the only signal consumers get.
            let _ = event_tx.send(SessionEvent::RefreshStopped {
                family,
                error: err.to_string(),
            });
            return;
        }

        tokio::time::sleep(interval).await;
        if !store.is_refreshing(family) {
            debug!("{family} refresh loop stopped");
            return;
        }
    }
}

/// One iteration's fetches, strictly in order.
///
/// The solutions family loads services first: the catalog cross-references
/// the service list just written to the store. A failed fetch short-circuits
/// the rest of the sequence.
pub async fn run_fetch_sequence(
    family: RefreshFamily,
    api: &dyn SolutionsApi,
    store: &SolutionsStore,
) -> Result<(), FetchError> {
    match family {
        RefreshFamily::Solutions => {
            fetch_ui_services(api, store).await?;
            fetch_solutions(api, store).await
        }
        RefreshFamily::Environments => fetch_environments(api, store).await,
    }
}
