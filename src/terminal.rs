// terminal.rs

use crate::error::{Result, SearchError};
use crate::keys::Key;
use crate::render::Frame;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, ClearType};
use crossterm::{cursor, queue};
use std::fs::{File, OpenOptions};
use std::io::Write;
use tracing::{debug, warn};

const DEFAULT_WIDTH: usize = 80;

/// Where a search session reads keys from and draws its frame.
pub trait Surface {
    /// Blocks until at least one key is available.
    fn read_keys(&mut self) -> Result<Vec<Key>>;
    fn draw(&mut self, frame: &Frame) -> Result<()>;
    /// Removes the last drawn frame, leaving the cursor where drawing began.
    fn clear(&mut self) -> Result<()>;
    fn width(&self) -> usize;
}

/// Restores the previous terminal mode when dropped.
struct RawMode;

impl RawMode {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to restore terminal mode");
        }
    }
}

/// The controlling terminal. Frames go to `/dev/tty` so stdout stays free
/// for the accepted text.
pub struct Tty {
    _raw: RawMode,
    out: File,
    /// Rows below the first frame row that the cursor sits on.
    row: usize,
    drawn: bool,
}

impl Tty {
    pub fn open() -> Result<Self> {
        let out = OpenOptions::new()
            .write(true)
            .open("/dev/tty")
            .map_err(|e| {
                debug!(error = %e, "cannot open /dev/tty");
                SearchError::NoTty
            })?;
        Ok(Self {
            _raw: RawMode::enter()?,
            out,
            row: 0,
            drawn: false,
        })
    }

    /// Moves back to the first frame row and wipes everything below.
    fn rewind(&mut self) -> Result<()> {
        if self.row > 0 {
            queue!(self.out, cursor::MoveUp(self.row as u16))?;
        }
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::FromCursorDown)
        )?;
        Ok(())
    }
}

impl Surface for Tty {
    fn read_keys(&mut self) -> Result<Vec<Key>> {
        loop {
            match event::read()? {
                Event::Key(ev) if ev.kind == KeyEventKind::Press => return Ok(vec![Key::from(ev)]),
                Event::Resize(..) => return Ok(vec![Key::Resize]),
                _ => continue,
            }
        }
    }

    fn draw(&mut self, frame: &Frame) -> Result<()> {
        if self.drawn {
            self.rewind()?;
        } else {
            // Start below whatever line the host left the cursor on.
            self.out.write_all(b"\r\n")?;
        }
        self.out.write_all(frame.painted().join("\r\n").as_bytes())?;
        let last = frame.lines.len().saturating_sub(1);
        let (row, col) = frame.cursor;
        if last > row {
            queue!(self.out, cursor::MoveUp((last - row) as u16))?;
        }
        queue!(self.out, cursor::MoveToColumn(col as u16))?;
        self.out.flush()?;
        self.row = row;
        self.drawn = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if !self.drawn {
            return Ok(());
        }
        self.rewind()?;
        queue!(self.out, cursor::MoveUp(1))?;
        self.out.flush()?;
        self.row = 0;
        self.drawn = false;
        Ok(())
    }

    fn width(&self) -> usize {
        match terminal::size() {
            Ok((cols, _)) if cols > 0 => cols as usize,
            _ => DEFAULT_WIDTH,
        }
    }
}
