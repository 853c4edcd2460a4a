// repl.rs

use crate::config::Config;
use crate::error::Result;
use crate::history::{HistoryList, HistorySource, MemoryHistory};
use crate::picker;
use crate::terminal::Tty;
use crate::util::writeln_ignore_broken_pipe;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{
    Cmd, ConditionalEventHandler, Editor, Event, EventContext, EventHandler, KeyEvent, Movement,
    RepeatCount,
};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

pub const EMPTY_HISTORY: &str = "No prompt history yet for reverse search.";

pub type SharedHistory = Arc<Mutex<Vec<String>>>;

/// Snapshot of everything entered so far.
fn snapshot(history: &SharedHistory) -> HistoryList {
    let entries = history.lock().map(|h| h.clone()).unwrap_or_default();
    MemoryHistory(entries).load().unwrap_or_default()
}

/// The editor holds the terminal in raw mode, so carriage returns are explicit.
fn notify_empty<W: Write>(out: W) -> std::io::Result<()> {
    writeln_ignore_broken_pipe(out, format!("\r\n{EMPTY_HISTORY}\r"))
}

/// Ctrl+R: runs a reverse search and swaps the edit line for the result.
struct ReverseSearch {
    history: SharedHistory,
}

impl ReverseSearch {
    fn keep(ctx: &EventContext) -> Cmd {
        // Replacing the line with itself forces a repaint after our frame.
        Cmd::Replace(Movement::WholeLine, Some(ctx.line().to_string()))
    }
}

impl ConditionalEventHandler for ReverseSearch {
    fn handle(&self, _evt: &Event, _n: RepeatCount, _positive: bool, ctx: &EventContext) -> Option<Cmd> {
        let history = snapshot(&self.history);
        if history.is_empty() {
            if let Err(e) = notify_empty(std::io::stdout()) {
                warn!(error = %e, "could not show the empty-history notice");
            }
            return Some(Self::keep(ctx));
        }
        let outcome = Tty::open().and_then(|mut tty| picker::run(&history, &mut tty, ""));
        match outcome.map(|o| o.into_text()) {
            Ok(Some(text)) => Some(Cmd::Replace(Movement::WholeLine, Some(text))),
            Ok(None) => Some(Self::keep(ctx)),
            Err(e) => {
                warn!(error = %e, "reverse search failed");
                Some(Self::keep(ctx))
            }
        }
    }
}

fn load_histfile(path: &Path, history: &SharedHistory) {
    match crate::history::FileHistory::new(path).load() {
        Ok(list) => {
            if let Ok(mut hist) = history.lock() {
                hist.extend(list.iter().map(str::to_string));
            }
        }
        Err(e) => warn!(path = %path.display(), error = %e, "could not read history file"),
    }
}

fn append_histfile(path: &Path, line: &str) {
    let file = std::fs::OpenOptions::new().create(true).append(true).open(path);
    let result = file.and_then(|mut f| writeln!(f, "{}", line));
    if let Err(e) = result {
        warn!(path = %path.display(), error = %e, "could not append to history file");
    }
}

/// Handles the two builtins. Returns an exit code when the REPL should stop.
fn run_builtin(line: &str, history: &SharedHistory) -> Option<Option<i32>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["exit"] => Some(Some(0)),
        ["exit", code] => Some(Some(code.parse().unwrap_or(255))),
        ["history", rest @ ..] => {
            let hist = history.lock().map(|h| h.clone()).unwrap_or_default();
            let start = match rest {
                [n] => n.parse::<usize>().map(|n| hist.len().saturating_sub(n)).unwrap_or(0),
                _ => 0,
            };
            for (i, cmd) in hist.iter().enumerate().skip(start) {
                let _ = writeln_ignore_broken_pipe(std::io::stdout(), format!("{:>5}  {}", i + 1, cmd));
            }
            Some(None)
        }
        _ => None,
    }
}

pub fn start_repl(config: &Config) -> Result<i32> {
    let mut rl: Editor<(), DefaultHistory> = Editor::new()?;
    let history: SharedHistory = Arc::new(Mutex::new(Vec::new()));
    if let Some(path) = &config.histfile {
        load_histfile(path, &history);
        for entry in history.lock().map(|h| h.clone()).unwrap_or_default() {
            let _ = rl.add_history_entry(entry);
        }
    }
    rl.bind_sequence(
        KeyEvent::ctrl('R'),
        EventHandler::Conditional(Box::new(ReverseSearch {
            history: Arc::clone(&history),
        })),
    );

    loop {
        match rl.readline("$ ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);
                if let Ok(mut hist) = history.lock() {
                    hist.push(trimmed.to_string());
                }
                if let Some(path) = &config.histfile {
                    append_histfile(path, trimmed);
                }
                match run_builtin(trimmed, &history) {
                    Some(Some(code)) => return Ok(code),
                    Some(None) => {}
                    None => {
                        let _ = writeln_ignore_broken_pipe(std::io::stdout(), trimmed);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                debug!("repl closed");
                return Ok(0);
            }
            Err(err) => return Err(err.into()),
        }
    }
}
