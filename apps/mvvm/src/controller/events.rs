//! Events published by the view-model to its subscriber.

use shared::{domain::User, error::FetchError};

/// Every event carries the generation of the fetch that produced it so the
/// screen can drop results from superseded fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewModelEvent {
    UsersLoaded { generation: u64, users: Vec<User> },
    FetchFailed { generation: u64, error: FetchError },
}

impl ViewModelEvent {
    pub fn generation(&self) -> u64 {
        match self {
            ViewModelEvent::UsersLoaded { generation, .. }
            | ViewModelEvent::FetchFailed { generation, .. } => *generation,
        }
    }
}
