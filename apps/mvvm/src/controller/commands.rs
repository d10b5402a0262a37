//! Commands queued from the terminal to the screen loop.

use std::{
    io::{self, BufRead},
    thread,
};

use crossbeam_channel::{bounded, Receiver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    Reload,
    Quit,
}

pub fn parse_command(line: &str) -> Option<ScreenCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "reload" => Some(ScreenCommand::Reload),
        "q" | "quit" | "exit" => Some(ScreenCommand::Quit),
        _ => None,
    }
}

/// Reads commands from `input` on a dedicated thread. The channel closes when
/// input hits EOF.
pub fn spawn_command_reader<R>(input: R) -> Receiver<ScreenCommand>
where
    R: BufRead + Send + 'static,
{
    let (cmd_tx, cmd_rx) = bounded(16);
    thread::spawn(move || {
        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    tracing::warn!("stopped reading commands: {err}");
                    break;
                }
            };
            match parse_command(&line) {
                Some(cmd) => {
                    if cmd_tx.send(cmd).is_err() || cmd == ScreenCommand::Quit {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => tracing::info!(input = %line.trim(), "unknown command; use r(eload) or q(uit)"),
            }
        }
    });
    cmd_rx
}

pub fn spawn_stdin_reader() -> Receiver<ScreenCommand> {
    spawn_command_reader(io::BufReader::new(io::stdin()))
}

#[cfg(test)]
#[path = "../tests/commands_tests.rs"]
mod tests;
