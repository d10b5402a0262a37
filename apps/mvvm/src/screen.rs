//! The users screen: subscribes to the view-model once and applies its events
//! on the UI thread.

use std::{io::Write, time::Duration};

use crossbeam_channel::{never, select, Receiver};
use list_screen::{FailureMode, ListScreen, ScreenState};
use tracing::{debug, info};

use crate::{
    controller::{commands::ScreenCommand, events::ViewModelEvent},
    view_model::UsersViewModel,
};

const IDLE_TICK: Duration = Duration::from_millis(100);

pub struct UsersTableScreen<W: Write> {
    view_model: UsersViewModel,
    screen: ListScreen<W>,
    events: Receiver<ViewModelEvent>,
}

impl<W: Write> UsersTableScreen<W> {
    /// Returns `None` if the view-model already has a subscriber.
    pub fn new(mut view_model: UsersViewModel, title: &str, sink: W) -> Option<Self> {
        let events = view_model.subscribe()?;
        Some(Self {
            view_model,
            screen: ListScreen::new(title, FailureMode::Recoverable, sink),
            events,
        })
    }

    pub fn screen(&self) -> &ListScreen<W> {
        &self.screen
    }

    pub fn view_model(&self) -> &UsersViewModel {
        &self.view_model
    }

    pub fn view_did_load(&mut self) {
        self.reload_tapped();
    }

    pub fn reload_tapped(&mut self) {
        if self.view_model.is_fetching() {
            info!("reload requested while a fetch is outstanding");
        }
        if self.screen.begin_fetch() {
            self.view_model.fetch_users();
        }
    }

    /// Applies one view-model event. Returns `true` if the event changed the
    /// screen.
    pub fn handle_event(&mut self, event: ViewModelEvent) -> bool {
        if !self.view_model.is_current(&event) {
            debug!(
                generation = event.generation(),
                current = self.view_model.current_generation(),
                "ignoring stale view-model event"
            );
            return false;
        }
        match event {
            ViewModelEvent::UsersLoaded { users, .. } => {
                info!(endpoint = %self.view_model.endpoint(), count = users.len(), "users loaded");
                self.screen.apply_users(users);
            }
            ViewModelEvent::FetchFailed { error, .. } => self.screen.apply_failure(error),
        }
        true
    }

    /// UI loop. Runs until `Quit`, or until input is exhausted and no fetch
    /// is outstanding. With `once`, commands are not read at all.
    pub fn run(&mut self, commands: Receiver<ScreenCommand>, once: bool) {
        let closed = never();
        let events = self.events.clone();
        let mut input_closed = once;
        loop {
            if input_closed && !self.awaiting_result(&events) {
                break;
            }
            let input = if input_closed { &closed } else { &commands };
            select! {
                recv(input) -> cmd => match cmd {
                    Ok(ScreenCommand::Reload) => self.reload_tapped(),
                    Ok(ScreenCommand::Quit) => break,
                    Err(_) => {
                        debug!("command input closed; finishing outstanding fetch");
                        input_closed = true;
                    }
                },
                recv(events) -> event => match event {
                    Ok(event) => {
                        self.handle_event(event);
                    }
                    Err(_) => break,
                },
                default(IDLE_TICK) => {}
            }
        }
    }

    fn awaiting_result(&self, events: &Receiver<ViewModelEvent>) -> bool {
        self.screen.state() == ScreenState::Fetching
            && (self.view_model.is_fetching() || !events.is_empty())
    }
}

#[cfg(test)]
#[path = "tests/screen_tests.rs"]
mod tests;
