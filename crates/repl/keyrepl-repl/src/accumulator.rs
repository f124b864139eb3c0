//! Incremental statement accumulation.
//!
//! Lines are collected until the interpreter accepts them as a complete
//! chunk. Each submission re-joins every pending line and compiles the whole
//! block from scratch; the interpreter's verdict decides what happens next:
//!
//! | verdict        | pending lines              | result              |
//! |----------------|----------------------------|---------------------|
//! | loaded         | cleared                    | executed            |
//! | incomplete     | kept, prompt continues     | wait for more input |
//! | syntax error   | cleared                    | error reported      |
//!
//! A single line that fails as a statement is retried as an expression, so
//! typing `2 + 2` prints `4`.

use tracing::debug;

use crate::interp::{Interpreter, LoadMode, LoadOutcome};
use crate::transcript::{PromptKind, Transcript};

/// What a submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Empty line; nothing recorded, interpreter not called.
    Ignored,
    /// The block needs more lines.
    Incomplete,
    /// A program ran to completion.
    Executed,
    /// The block was malformed and has been discarded.
    SyntaxError,
    /// A program was loaded but failed while running.
    RuntimeError,
}

/// Collects lines of a multi-line statement and submits them to an
/// interpreter.
///
/// The prompt mode is derived from the pending lines, so the mode and the
/// lines are always reset together.
#[derive(Debug, Clone)]
pub struct StatementAccumulator {
    pending: Vec<String>,
    chunk_name: String,
}

impl StatementAccumulator {
    /// Creates an empty accumulator whose chunks are named `chunk_name`.
    pub fn new(chunk_name: impl Into<String>) -> Self {
        Self {
            pending: Vec::new(),
            chunk_name: chunk_name.into(),
        }
    }

    /// Prompt to show for the next line.
    pub fn mode(&self) -> PromptKind {
        if self.pending.is_empty() {
            PromptKind::Fresh
        } else {
            PromptKind::Continuation
        }
    }

    /// Lines entered but not yet executed, oldest first.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Discards pending lines.
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Submits one entered line.
    ///
    /// The line and everything the interpreter prints or reports are
    /// appended to `transcript`.
    pub fn submit<I: Interpreter>(
        &mut self,
        line: &str,
        interp: &mut I,
        transcript: &mut Transcript,
    ) -> Verdict {
        if line.is_empty() {
            return Verdict::Ignored;
        }

        transcript.push_input(self.mode(), line);
        self.pending.push(line.to_owned());

        let source = self.pending.join("\n");
        match interp.load(&source, &self.chunk_name, LoadMode::Statements) {
            LoadOutcome::Incomplete => {
                debug!(lines = self.pending.len(), "statement incomplete");
                Verdict::Incomplete
            }
            LoadOutcome::Loaded(program) => {
                self.pending.clear();
                execute(interp, program, transcript)
            }
            LoadOutcome::SyntaxError(message) => {
                let pending = std::mem::take(&mut self.pending);
                if let [only] = pending.as_slice() {
                    self.retry_as_expression(only, message, interp, transcript)
                } else {
                    debug!(lines = pending.len(), %message, "syntax error in block");
                    transcript.push_error(interp.traceback(&message));
                    Verdict::SyntaxError
                }
            }
        }
    }

    /// Retries a lone line as an expression so its value gets printed.
    ///
    /// If the retry fails too, the statement error is reported.
    fn retry_as_expression<I: Interpreter>(
        &self,
        line: &str,
        statement_error: String,
        interp: &mut I,
        transcript: &mut Transcript,
    ) -> Verdict {
        match interp.load(line, &self.chunk_name, LoadMode::Expression) {
            LoadOutcome::Loaded(program) => execute(interp, program, transcript),
            LoadOutcome::Incomplete | LoadOutcome::SyntaxError(_) => {
                debug!(message = %statement_error, "syntax error");
                transcript.push_error(statement_error);
                Verdict::SyntaxError
            }
        }
    }
}

/// Runs a loaded program and prints whatever it returns.
fn execute<I: Interpreter>(interp: &mut I, program: I::Program, transcript: &mut Transcript) -> Verdict {
    let result = interp.call(program);
    drain_output(interp, transcript);

    match result {
        Ok(values) => {
            for value in &values {
                if let Err(message) = interp.print(value) {
                    tracing::warn!(%message, "printing a result failed");
                    transcript.push_error(format!("error calling 'print' ({message})"));
                }
                drain_output(interp, transcript);
            }
            Verdict::Executed
        }
        Err(message) => {
            debug!(%message, "runtime error");
            transcript.push_error(message);
            Verdict::RuntimeError
        }
    }
}

fn drain_output<I: Interpreter>(interp: &mut I, transcript: &mut Transcript) {
    for text in interp.take_output() {
        transcript.push_output(text);
    }
}
