// error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the history adapters and the terminal surface.
///
/// The search core itself (index, cursor, session) has no failure modes.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}:{line}: malformed session log entry: {source}", path.display())]
    SessionLog {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("no controlling terminal available")]
    NoTty,
}

pub type Result<T> = std::result::Result<T, SearchError>;
