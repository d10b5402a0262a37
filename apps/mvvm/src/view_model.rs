use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use client_core::{fetch_users, ApiService};
use crossbeam_channel::{unbounded, Receiver, Sender};
use shared::endpoint::Endpoint;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, info};

use crate::controller::events::ViewModelEvent;

/// Owns the fetch trigger for the users screen.
///
/// At most one fetch is in flight: starting a new one aborts the previous
/// task, and dropping the view-model aborts whatever is still running.
pub struct UsersViewModel {
    api: Arc<dyn ApiService>,
    endpoint: Endpoint,
    base_url: String,
    runtime: Handle,
    events_tx: Sender<ViewModelEvent>,
    events_rx: Option<Receiver<ViewModelEvent>>,
    generation: Arc<AtomicU64>,
    in_flight: Option<JoinHandle<()>>,
}

impl UsersViewModel {
    pub fn new(
        api: Arc<dyn ApiService>,
        endpoint: Endpoint,
        base_url: impl Into<String>,
        runtime: Handle,
    ) -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            api,
            endpoint,
            base_url: base_url.into(),
            runtime,
            events_tx,
            events_rx: Some(events_rx),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: None,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Hands out the event stream. There is a single subscriber; later calls
    /// return `None`.
    pub fn subscribe(&mut self) -> Option<Receiver<ViewModelEvent>> {
        self.events_rx.take()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, event: &ViewModelEvent) -> bool {
        event.generation() == self.current_generation()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Starts a fetch and returns its generation.
    pub fn fetch_users(&mut self) -> u64 {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                debug!(endpoint = %self.endpoint, "superseding in-flight fetch");
            }
            previous.abort();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let api = Arc::clone(&self.api);
        let endpoint = self.endpoint;
        let base_url = self.base_url.clone();
        let latest = Arc::clone(&self.generation);
        let events_tx = self.events_tx.clone();

        info!(endpoint = %endpoint, generation, "fetching users");
        self.in_flight = Some(self.runtime.spawn(async move {
            let event = match fetch_users(api.as_ref(), endpoint, &base_url).await {
                Ok(users) => ViewModelEvent::UsersLoaded { generation, users },
                Err(error) => ViewModelEvent::FetchFailed { generation, error },
            };
            if latest.load(Ordering::SeqCst) != generation {
                debug!(generation, "dropping result of superseded fetch");
                return;
            }
            if events_tx.send(event).is_err() {
                debug!(generation, "no subscriber for fetch result");
            }
        }));
        generation
    }

    /// Aborts the in-flight fetch; anything it already published is stale.
    pub fn cancel(&mut self) {
        if let Some(task) = self.in_flight.take() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            task.abort();
        }
    }
}

impl Drop for UsersViewModel {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "tests/view_model_tests.rs"]
mod tests;
