//! The controller owns both the fetch trigger and the stored list.

use std::{io::Write, sync::Arc};

use client_core::{fetch_users, ApiService};
use crossbeam_channel::{bounded, Receiver};
use list_screen::ListScreen;
use shared::{domain::User, endpoint::Endpoint, error::FetchError};
use tokio::runtime::Handle;
use tracing::debug;

pub type FetchResult = Result<Vec<User>, FetchError>;

/// Completion-callback wrapper around the injected [`ApiService`].
///
/// Work runs on the network runtime; the callback is invoked there too.
#[derive(Clone)]
pub struct ApiManager {
    runtime: Handle,
    api: Arc<dyn ApiService>,
    base_url: String,
}

impl ApiManager {
    pub fn new(runtime: Handle, api: Arc<dyn ApiService>, base_url: impl Into<String>) -> Self {
        Self {
            runtime,
            api,
            base_url: base_url.into(),
        }
    }

    pub fn fetch_users<F>(&self, completion: F)
    where
        F: FnOnce(FetchResult) + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let base_url = self.base_url.clone();
        self.runtime.spawn(async move {
            let result = fetch_users(api.as_ref(), Endpoint::UsersFetch, &base_url).await;
            completion(result);
        });
    }
}

/// Work posted back to the UI thread.
pub enum MainEvent {
    UsersFetched(FetchResult),
}

pub struct UsersTableController<W: Write> {
    api: ApiManager,
    screen: ListScreen<W>,
    /// Reply queue of the outstanding fetch. Its only sender lives in the
    /// completion callback, so the queue closes if the fetch dies silently.
    pending: Option<Receiver<MainEvent>>,
}

impl<W: Write> UsersTableController<W> {
    pub fn new(api: ApiManager, screen: ListScreen<W>) -> Self {
        Self {
            api,
            screen,
            pending: None,
        }
    }

    pub fn screen(&self) -> &ListScreen<W> {
        &self.screen
    }

    pub fn view_did_load(&mut self) {
        self.fetch_users();
    }

    fn fetch_users(&mut self) {
        if !self.screen.begin_fetch() {
            return;
        }
        let (main_tx, main_rx) = bounded(1);
        self.pending = Some(main_rx);
        self.api.fetch_users(move |result| {
            if main_tx.send(MainEvent::UsersFetched(result)).is_err() {
                debug!("controller gone before fetch completed");
            }
        });
    }

    pub fn handle(&mut self, event: MainEvent) {
        match event {
            MainEvent::UsersFetched(Ok(users)) => self.screen.apply_users(users),
            MainEvent::UsersFetched(Err(err)) => self.screen.apply_failure(err),
        }
    }

    /// Drains UI-thread work until no fetch is outstanding.
    pub fn run_until_settled(&mut self) {
        while let Some(main_rx) = self.pending.take() {
            match main_rx.recv() {
                Ok(event) => self.handle(event),
                Err(_) => self.screen.apply_failure(FetchError::Transport(
                    "fetch ended without delivering a result".into(),
                )),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
