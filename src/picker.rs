// picker.rs

use crate::error::Result;
use crate::history::HistoryList;
use crate::keys::Binding;
use crate::line::LineBuffer;
use crate::render::render;
use crate::session::{Outcome, RenderFlag, Session};
use crate::terminal::Surface;
use tracing::{debug, info};

/// Drives one reverse-i-search over `surface` until the user accepts or
/// cancels. The frame is cleared before returning.
pub fn run<S: Surface>(history: &HistoryList, surface: &mut S, query: &str) -> Result<Outcome> {
    info!(entries = history.len(), "reverse search started");
    let mut line = LineBuffer::with_text(query);
    let mut session = Session::with_sink(history, RenderFlag::default()).with_query(line.text());
    session.sink_mut().take();
    surface.draw(&render(&session.view(), &line, surface.width()))?;

    let outcome = 'search: loop {
        let mut moved = false;
        for key in surface.read_keys()? {
            match Binding::of(key) {
                Binding::Older => session.cycle_older(),
                Binding::Newer => session.cycle_newer(),
                Binding::Accept => break 'search session.accept(),
                Binding::Cancel => break 'search session.cancel(),
                Binding::Redraw => moved = true,
                Binding::Edit(key) => {
                    let before = line.clone();
                    if !line.apply(key) {
                        debug!(?key, "ignoring unbound key");
                        continue;
                    }
                    if line.text() != before.text() {
                        session.edit(line.text());
                    } else if line.cursor() != before.cursor() {
                        moved = true;
                    }
                }
            }
        }
        if session.sink_mut().take() || moved {
            surface.draw(&render(&session.view(), &line, surface.width()))?;
        }
    };

    surface.clear()?;
    match &outcome {
        Outcome::Accepted(text) => info!(len = text.len(), "reverse search accepted"),
        Outcome::Cancelled => info!("reverse search cancelled"),
    }
    Ok(outcome)
}
