//! Scrollback feed read by the display.
//!
//! Every entered line, printed value and error ends up here in order. The
//! transcript keeps a bounded number of lines and discards the oldest first;
//! [`Transcript::total`] counts every line ever appended so a pull-based
//! reader can tell which lines are new since its last render.

use std::collections::VecDeque;
use std::fmt;

/// Which prompt a line was entered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptKind {
    /// Start of a new statement.
    #[default]
    Fresh,
    /// Continuing an incomplete statement.
    Continuation,
}

impl PromptKind {
    /// Prompt text shown before the line.
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Fresh => "> ",
            Self::Continuation => ">> ",
        }
    }
}

/// A line as the user entered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Prompt active when the line was entered.
    pub prompt_kind: PromptKind,
    /// The line exactly as typed.
    pub text: String,
}

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    /// An entered line.
    Input(HistoryEntry),
    /// Text printed by the interpreter.
    Output(String),
    /// A syntax, runtime or print error.
    Error(String),
}

impl fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(entry) => write!(f, "{}{}", entry.prompt_kind.prompt(), entry.text),
            Self::Output(text) | Self::Error(text) => f.write_str(text),
        }
    }
}

/// Bounded, append-only line feed.
#[derive(Debug, Clone)]
pub struct Transcript {
    lines: VecDeque<TranscriptLine>,
    limit: usize,
    total: usize,
}

impl Transcript {
    /// Creates a transcript retaining at most `limit` lines (at least one).
    pub fn new(limit: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            limit: limit.max(1),
            total: 0,
        }
    }

    /// Appends a line, dropping the oldest if the limit is exceeded.
    pub fn push(&mut self, line: TranscriptLine) {
        self.lines.push_back(line);
        self.total += 1;
        while self.lines.len() > self.limit {
            self.lines.pop_front();
        }
    }

    /// Appends an entered line.
    pub fn push_input(&mut self, prompt_kind: PromptKind, text: &str) {
        self.push(TranscriptLine::Input(HistoryEntry {
            prompt_kind,
            text: text.to_owned(),
        }));
    }

    /// Appends printed output.
    pub fn push_output(&mut self, text: impl Into<String>) {
        self.push(TranscriptLine::Output(text.into()));
    }

    /// Appends an error message.
    pub fn push_error(&mut self, text: impl Into<String>) {
        self.push(TranscriptLine::Error(text.into()));
    }

    /// Retained lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &TranscriptLine> {
        self.lines.iter()
    }

    /// Retained lines appended after the first `seen` lines ever appended.
    ///
    /// Lines already discarded by the limit are skipped.
    pub fn since(&self, seen: usize) -> impl Iterator<Item = &TranscriptLine> {
        let new = self.total.saturating_sub(seen).min(self.lines.len());
        self.lines.iter().skip(self.lines.len() - new)
    }

    /// Entered lines still retained, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.lines.iter().filter_map(|line| match line {
            TranscriptLine::Input(entry) => Some(entry),
            _ => None,
        })
    }

    /// Number of lines ever appended, including discarded ones.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of retained lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no line is retained.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_drops_oldest() {
        let mut transcript = Transcript::new(2);
        transcript.push_output("one");
        transcript.push_output("two");
        transcript.push_output("three");
        let kept: Vec<String> = transcript.lines().map(ToString::to_string).collect();
        assert_eq!(kept, ["two", "three"]);
        assert_eq!(transcript.total(), 3);
    }

    #[test]
    fn since_returns_new_lines() {
        let mut transcript = Transcript::new(8);
        transcript.push_output("a");
        let seen = transcript.total();
        transcript.push_output("b");
        transcript.push_error("c");
        let new: Vec<String> = transcript.since(seen).map(ToString::to_string).collect();
        assert_eq!(new, ["b", "c"]);
        assert_eq!(transcript.since(transcript.total()).count(), 0);
    }

    #[test]
    fn since_skips_discarded_lines() {
        let mut transcript = Transcript::new(1);
        transcript.push_output("a");
        transcript.push_output("b");
        transcript.push_output("c");
        let new: Vec<String> = transcript.since(0).map(ToString::to_string).collect();
        assert_eq!(new, ["c"]);
    }

    #[test]
    fn input_lines_render_with_prompt() {
        let mut transcript = Transcript::new(4);
        transcript.push_input(PromptKind::Fresh, "if x then");
        transcript.push_input(PromptKind::Continuation, "end");
        let rendered: Vec<String> = transcript.lines().map(ToString::to_string).collect();
        assert_eq!(rendered, ["> if x then", ">> end"]);
        assert_eq!(transcript.history().count(), 2);
    }

    #[test]
    fn zero_limit_keeps_one_line() {
        let mut transcript = Transcript::new(0);
        transcript.push_output("x");
        assert_eq!(transcript.len(), 1);
    }
}
