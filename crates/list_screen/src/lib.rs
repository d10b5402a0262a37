//! Terminal list screen shared by both presentation variants.
//!
//! The screen owns the stored user list and redraws into its sink every time
//! presentation state changes.

use std::io::{self, Write};

use shared::{domain::User, error::FetchError};
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    Fetching,
    Populated,
    FetchFailed,
}

/// Whether a failed fetch can be followed by another one on the same screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// The screen has to be recreated to try again.
    Terminal,
    Recoverable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
}

pub struct ListScreen<W: Write> {
    title: String,
    users: Vec<User>,
    state: ScreenState,
    failure_mode: FailureMode,
    last_error: Option<FetchError>,
    sink: W,
}

impl<W: Write> ListScreen<W> {
    pub fn new(title: impl Into<String>, failure_mode: FailureMode, sink: W) -> Self {
        Self {
            title: title.into(),
            users: Vec::new(),
            state: ScreenState::Idle,
            failure_mode,
            last_error: None,
            sink,
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn row_count(&self) -> usize {
        self.users.len()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.users.get(index).map(|user| Row {
            title: &user.name,
            subtitle: &user.email,
        })
    }

    pub fn can_fetch(&self) -> bool {
        !(self.state == ScreenState::FetchFailed && self.failure_mode == FailureMode::Terminal)
    }

    /// Moves to `Fetching`. Returns `false` if the screen is stuck in a
    /// terminal failure.
    pub fn begin_fetch(&mut self) -> bool {
        if !self.can_fetch() {
            warn!(screen = %self.title, "fetch requested after terminal failure; ignoring");
            return false;
        }
        self.state = ScreenState::Fetching;
        self.redraw();
        true
    }

    /// Replaces the stored list wholesale.
    pub fn apply_users(&mut self, users: Vec<User>) {
        self.users = users;
        self.state = ScreenState::Populated;
        self.last_error = None;
        self.redraw();
    }

    /// Records a failure. The stored list is left as it was.
    pub fn apply_failure(&mut self, err: FetchError) {
        error!(screen = %self.title, error = %err, "fetch failed");
        self.state = ScreenState::FetchFailed;
        self.last_error = Some(err);
        self.redraw();
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "== {} ({}) ==", self.title, self.row_count())?;
        match self.state {
            ScreenState::Idle => writeln!(out, "   [idle]")?,
            ScreenState::Fetching => writeln!(out, "   [loading...]")?,
            ScreenState::FetchFailed => match self.failure_mode {
                FailureMode::Recoverable => writeln!(out, "   [fetch failed; reload to retry]")?,
                FailureMode::Terminal => writeln!(out, "   [fetch failed]")?,
            },
            ScreenState::Populated if self.users.is_empty() => writeln!(out, "   (no rows)")?,
            ScreenState::Populated => {}
        }
        for (index, user) in self.users.iter().enumerate() {
            writeln!(out, "{:>3}. {}", index + 1, user.name)?;
            writeln!(out, "     {}", user.email)?;
        }
        out.flush()
    }

    fn redraw(&mut self) {
        let mut frame = Vec::new();
        let result = self
            .render(&mut frame)
            .and_then(|()| self.sink.write_all(&frame))
            .and_then(|()| self.sink.flush());
        if let Err(err) = result {
            warn!(screen = %self.title, "redraw failed: {err}");
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
