// lib.rs

pub mod config;
pub mod cursor;
pub mod error;
pub mod history;
pub mod index;
pub mod keys;
pub mod line;
pub mod picker;
pub mod render;
pub mod repl;
pub mod session;
pub mod terminal;
pub mod util;

pub use error::{Result, SearchError};
pub use history::{FileHistory, HistoryList, HistorySource, MemoryHistory, SessionLog};
pub use index::{recompute, MatchSet};
pub use session::{Outcome, RenderFlag, RenderSink, Session, View};
