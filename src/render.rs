// render.rs

use crate::keys::HELP;
use crate::line::LineBuffer;
use crate::session::View;
use colored::Colorize;
use itertools::Itertools;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PROMPT: &str = "> ";
const ELLIPSIS: char = '…';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Style {
    Accent,
    Bold,
    Text,
    Warning,
    Dim,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    fn new(text: impl Into<String>, style: Style) -> Self {
        Self { text: text.into(), style }
    }

    fn paint(&self) -> String {
        let t = self.text.as_str();
        match self.style {
            Style::Accent => t.cyan().to_string(),
            Style::Bold => t.bold().to_string(),
            Style::Text => t.to_string(),
            Style::Warning => t.yellow().to_string(),
            Style::Dim => t.dimmed().to_string(),
        }
    }
}

pub type Line = Vec<Span>;

/// Three lines ready to draw plus where the terminal cursor belongs.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Frame {
    pub lines: Vec<Line>,
    /// `(row, column)` within the frame.
    pub cursor: (usize, usize),
}

impl Frame {
    pub fn plain(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.iter().map(|s| s.text.as_str()).collect())
            .collect()
    }

    pub fn painted(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.iter().map(Span::paint).collect())
            .collect()
    }
}

/// Collapses every whitespace run to one space so entries fit on one line.
pub fn single_line_preview(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Control chars would break the frame apart; show them as spaces.
fn printable(text: &str) -> String {
    text.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Cuts a line to `width` terminal cells, marking the cut with an ellipsis.
pub fn truncate_to_width(line: Line, width: usize) -> Line {
    let total: usize = line.iter().map(|s| s.text.width()).sum();
    if total <= width {
        return line;
    }
    let mut budget = width.saturating_sub(1);
    let mut out = Vec::new();
    for span in line {
        let w = span.text.width();
        if w <= budget {
            budget -= w;
            out.push(span);
            continue;
        }
        let mut text = String::new();
        for c in span.text.chars() {
            let cw = char_width(c);
            if cw > budget {
                break;
            }
            budget -= cw;
            text.push(c);
        }
        out.push(Span::new(text, span.style));
        break;
    }
    if width > 0 {
        let style = out.last().map(|s: &Span| s.style).unwrap_or(Style::Text);
        out.push(Span::new(ELLIPSIS, style));
    }
    out
}

fn header(view: &View<'_>) -> Line {
    let preview = match view.current {
        Some(entry) => Span::new(single_line_preview(entry), Style::Text),
        None => Span::new("failing search", Style::Warning),
    };
    let (pos, len) = view.counter;
    vec![
        Span::new("(reverse-i-search)`", Style::Accent),
        Span::new(printable(view.query), Style::Bold),
        Span::new("': ", Style::Accent),
        preview,
        Span::new(format!(" [{pos}/{len}]"), Style::Dim),
    ]
}

/// Edit line scrolled so the cursor stays visible. Returns the cursor column.
fn input_line(line: &LineBuffer, width: usize) -> (Line, usize) {
    let room = width.saturating_sub(PROMPT.width() + 1).max(1);
    let chars: Vec<char> = line.text().chars().collect();
    let cursor = line.cursor().min(chars.len());
    let cells = |from: usize| chars[from..cursor].iter().copied().map(char_width).sum::<usize>();

    let mut skip = 0;
    while skip < cursor && cells(skip) > room {
        skip += 1;
    }
    let mut used = 0;
    let visible: String = chars[skip..]
        .iter()
        .copied()
        .take_while(|&c| {
            used += char_width(c);
            used <= room
        })
        .collect();
    let column = PROMPT.width() + cells(skip);
    (
        vec![Span::new(PROMPT, Style::Text), Span::new(printable(&visible), Style::Text)],
        column,
    )
}

fn help() -> Line {
    let text = HELP
        .iter()
        .map(|(keys, action)| format!("{keys} {action}"))
        .join(" • ");
    vec![Span::new(text, Style::Dim)]
}

pub fn render(view: &View<'_>, line: &LineBuffer, width: usize) -> Frame {
    let (input, column) = input_line(line, width);
    Frame {
        lines: vec![
            truncate_to_width(header(view), width),
            input,
            truncate_to_width(help(), width),
        ],
        cursor: (1, column),
    }
}
