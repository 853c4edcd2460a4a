// history.rs

use crate::error::{Result, SearchError};
use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// An immutable snapshot of prior entries, oldest first.
///
/// Entries that are empty after trimming are dropped on construction, so
/// every stored entry is non-empty. Duplicates keep their own positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryList {
    entries: Vec<String>,
}

impl HistoryList {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }
    pub fn get(&self, n: usize) -> Option<&str> {
        self.entries.get(n).map(String::as_str)
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(String::as_str)
    }
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }
}

impl<S: Into<String>> FromIterator<S> for HistoryList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(Into::<String>::into)
            .filter(|e| !e.trim().is_empty())
            .collect();
        Self { entries }
    }
}

impl From<Vec<String>> for HistoryList {
    fn from(entries: Vec<String>) -> Self {
        entries.into_iter().collect()
    }
}

/// Supplies the ordered entries a search session runs over.
pub trait HistorySource {
    fn load(&self) -> Result<HistoryList>;
}

/// In-process history, e.g. the lines entered into the REPL so far.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory(pub Vec<String>);

impl HistorySource for MemoryHistory {
    fn load(&self) -> Result<HistoryList> {
        Ok(self.0.iter().cloned().collect())
    }
}

/// A plain history file with one entry per line, as written to `HISTFILE`.
#[derive(Debug, Clone)]
pub struct FileHistory {
    path: PathBuf,
}

impl FileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySource for FileHistory {
    fn load(&self) -> Result<HistoryList> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "history file missing, starting empty");
                return Ok(HistoryList::new());
            }
            Err(e) => return Err(e.into()),
        };
        let reader = BufReader::new(file);
        let mut lines = Vec::new();
        for (i, raw) in reader.split(b'\n').enumerate() {
            let mut raw = raw?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            match String::from_utf8(raw) {
                Ok(line) => lines.push(line),
                Err(_) => debug!(line = i + 1, "skipping history line that is not UTF-8"),
            }
        }
        let list: HistoryList = lines.into_iter().collect();
        debug!(path = %self.path.display(), entries = list.len(), "loaded history file");
        Ok(list)
    }
}

/// A JSON-lines log of an agent conversation.
///
/// User prompts and shell executions become entries; shell executions are
/// prefixed with `!`, or `!!` when they were kept out of the agent context.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
}

#[derive(Deserialize)]
struct LogEntry {
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    message: Value,
}

#[derive(Deserialize)]
#[serde(tag = "role")]
enum Message {
    #[serde(rename = "user")]
    User {
        #[serde(default)]
        content: Value,
    },
    #[serde(rename = "bashExecution")]
    BashExecution {
        #[serde(default)]
        command: Value,
        #[serde(default, rename = "excludeFromContext")]
        exclude_from_context: Value,
    },
    #[serde(other)]
    Other,
}

impl SessionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn entry_from_line(&self, raw: &str, line: usize) -> Result<Option<String>> {
        let entry: LogEntry =
            serde_json::from_str(raw).map_err(|source| SearchError::SessionLog {
                path: self.path.clone(),
                line,
                source,
            })?;
        if entry.kind != "message" {
            return Ok(None);
        }
        let message = match serde_json::from_value::<Message>(entry.message) {
            Ok(m) => m,
            Err(e) => {
                trace!(line, error = %e, "skipping unrecognised message");
                return Ok(None);
            }
        };
        Ok(match message {
            Message::User { content } => {
                let text = extract_text(&content);
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            Message::BashExecution {
                command: Value::String(command),
                exclude_from_context,
            } => {
                let prefix = if truthy(&exclude_from_context) { "!!" } else { "!" };
                Some(format!("{prefix}{command}"))
            }
            Message::BashExecution { .. } | Message::Other => None,
        })
    }
}

impl HistorySource for SessionLog {
    fn load(&self) -> Result<HistoryList> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut entries = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Some(entry) = self.entry_from_line(&line, i + 1)? {
                entries.push(entry);
            }
        }
        let list: HistoryList = entries.into_iter().collect();
        debug!(path = %self.path.display(), entries = list.len(), "loaded session log");
        Ok(list)
    }
}

/// Loose truthiness for flags written by loosely typed producers.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Message content is either a bare string or a list of typed blocks.
fn extract_text(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|b| b.get("text").and_then(Value::as_str))
            .join("\n"),
        _ => String::new(),
    }
}
