// session.rs

use crate::cursor::Cursor;
use crate::history::HistoryList;
use crate::index::{recompute, MatchSet};

/// Receives "state changed, please redraw" from a session.
pub trait RenderSink {
    fn request_render(&mut self);
}

impl RenderSink for () {
    fn request_render(&mut self) {}
}

/// A pending-redraw bit the host drains once per input event.
#[derive(Debug, Default)]
pub struct RenderFlag {
    pending: bool,
}

impl RenderFlag {
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl RenderSink for RenderFlag {
    fn request_render(&mut self) {
        self.pending = true;
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(String),
    Cancelled,
}

impl Outcome {
    pub fn into_text(self) -> Option<String> {
        match self {
            Outcome::Accepted(text) => Some(text),
            Outcome::Cancelled => None,
        }
    }
}

/// What a surface needs to draw the search prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View<'a> {
    pub query: &'a str,
    pub current: Option<&'a str>,
    /// One-based position and match count, `(0, 0)` when nothing matches.
    pub counter: (usize, usize),
}

/// One reverse-i-search invocation over a fixed history snapshot.
///
/// The session only exists while searching; `accept` and `cancel` consume it.
pub struct Session<'h, S: RenderSink = ()> {
    history: &'h HistoryList,
    query: String,
    matches: MatchSet,
    cursor: Cursor,
    sink: S,
}

impl<'h> Session<'h, ()> {
    pub fn new(history: &'h HistoryList) -> Self {
        Self::with_sink(history, ())
    }
}

impl<'h, S: RenderSink> Session<'h, S> {
    pub fn with_sink(history: &'h HistoryList, sink: S) -> Self {
        Self {
            history,
            query: String::new(),
            matches: recompute(history, ""),
            cursor: Cursor::default(),
            sink,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.edit(query);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn pointer(&self) -> usize {
        self.cursor.get()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Replaces the query and restarts the search at the newest match.
    pub fn edit(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.matches = recompute(self.history, &self.query);
        self.cursor.reset();
        self.cursor.clamp(self.matches.len());
        self.sink.request_render();
    }

    pub fn cycle_older(&mut self) {
        self.cursor.cycle_older(self.matches.len());
        self.sink.request_render();
    }

    pub fn cycle_newer(&mut self) {
        self.cursor.cycle_newer(self.matches.len());
        self.sink.request_render();
    }

    pub fn current_match(&self) -> Option<&'h str> {
        let index = self.matches.get(self.cursor.get())?;
        self.history.get(index)
    }

    pub fn view(&self) -> View<'_> {
        let counter = if self.matches.is_empty() {
            (0, 0)
        } else {
            (self.cursor.get() + 1, self.matches.len())
        };
        View {
            query: &self.query,
            current: self.current_match(),
            counter,
        }
    }

    /// Resolves to the selected entry, or the raw query on a failing search.
    pub fn accept(self) -> Outcome {
        match self.current_match() {
            Some(entry) => Outcome::Accepted(entry.to_string()),
            None => Outcome::Accepted(self.query),
        }
    }

    pub fn cancel(self) -> Outcome {
        Outcome::Cancelled
    }
}
