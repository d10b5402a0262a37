//! Controller layer: view-model events and screen commands.

pub mod commands;
pub mod events;
