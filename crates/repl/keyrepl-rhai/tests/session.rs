//! Drives the Rhai service through the statement accumulator.

use keyrepl_repl::{PromptKind, StatementAccumulator, Transcript, TranscriptLine, Verdict};
use keyrepl_rhai::RhaiInterpreter;

struct Session {
    acc: StatementAccumulator,
    rhai: RhaiInterpreter,
    transcript: Transcript,
}

impl Session {
    fn new() -> Self {
        Self {
            acc: StatementAccumulator::new("=stdin"),
            rhai: RhaiInterpreter::default(),
            transcript: Transcript::new(256),
        }
    }

    fn submit(&mut self, line: &str) -> Verdict {
        self.acc.submit(line, &mut self.rhai, &mut self.transcript)
    }

    fn outputs(&self) -> Vec<&str> {
        self.transcript
            .lines()
            .filter_map(|line| match line {
                TranscriptLine::Output(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn errors(&self) -> Vec<&str> {
        self.transcript
            .lines()
            .filter_map(|line| match line {
                TranscriptLine::Error(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn expression_value_is_printed() {
    let mut session = Session::new();
    assert_eq!(session.submit("40 + 2"), Verdict::Executed);
    assert_eq!(session.outputs(), ["42"]);
    assert_eq!(session.acc.mode(), PromptKind::Fresh);
}

#[test]
fn bindings_persist_between_lines() {
    let mut session = Session::new();
    assert_eq!(session.submit("let x = 6;"), Verdict::Executed);
    assert!(session.outputs().is_empty());
    assert_eq!(session.submit("x * 7"), Verdict::Executed);
    assert_eq!(session.outputs(), ["42"]);
}

#[test]
fn open_block_continues() {
    let mut session = Session::new();
    assert_eq!(session.submit("if true {"), Verdict::Incomplete);
    assert_eq!(session.acc.mode(), PromptKind::Continuation);
    assert_eq!(session.submit("print(1);"), Verdict::Incomplete);
    assert_eq!(session.submit("}"), Verdict::Executed);
    assert_eq!(session.outputs(), ["1"]);
    assert_eq!(session.acc.mode(), PromptKind::Fresh);
}

#[test]
fn syntax_error_runs_nothing() {
    let mut session = Session::new();
    assert_eq!(session.submit("let = 5"), Verdict::SyntaxError);
    assert!(session.outputs().is_empty());
    assert_eq!(session.errors().len(), 1);
    assert!(session.errors()[0].starts_with("=stdin: "));
    assert_eq!(session.acc.mode(), PromptKind::Fresh);
}

#[test]
fn runtime_error_surfaces() {
    let mut session = Session::new();
    assert_eq!(session.submit("undefined_fn()"), Verdict::RuntimeError);
    assert_eq!(session.errors().len(), 1);
    assert!(session.errors()[0].contains("undefined_fn"));
}

#[test]
fn functions_persist_between_lines() {
    let mut session = Session::new();
    assert_eq!(session.submit("fn double(x) { x * 2 }"), Verdict::Executed);
    assert_eq!(session.submit("double(21)"), Verdict::Executed);
    assert_eq!(session.outputs(), ["42"]);
}

#[test]
fn print_and_value_both_appear() {
    let mut session = Session::new();
    assert_eq!(session.submit("print(\"hi\"); 3"), Verdict::Executed);
    assert_eq!(session.outputs(), ["hi", "3"]);
}

#[test]
fn error_after_partial_block_resets() {
    let mut session = Session::new();
    assert_eq!(session.submit("if true {"), Verdict::Incomplete);
    assert_eq!(session.submit("let = 1; }"), Verdict::SyntaxError);
    assert!(session.errors()[0].contains(">   2 | let = 1; }"));
    assert_eq!(session.acc.mode(), PromptKind::Fresh);
    assert_eq!(session.submit("1 + 1"), Verdict::Executed);
    assert_eq!(session.outputs(), ["2"]);
}

#[test]
fn stray_token_at_line_end_is_syntax_error() {
    let mut session = Session::new();
    assert_eq!(session.submit("let x = 1 2"), Verdict::SyntaxError);
    assert_eq!(session.acc.mode(), PromptKind::Fresh);
    assert_eq!(session.submit("foo(1 2"), Verdict::SyntaxError);
    assert_eq!(session.acc.mode(), PromptKind::Fresh);
    assert_eq!(session.errors().len(), 2);
}
