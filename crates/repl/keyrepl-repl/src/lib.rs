//! Console core for keyrepl.
//!
//! Ties the keyboard layer in [`keyrepl_hid`] to a scripting interpreter:
//! typed lines are collected by the [`StatementAccumulator`] until the
//! interpreter accepts them as a complete chunk, then executed, with every
//! input, result and error recorded in the [`Transcript`].
//!
//! The interpreter itself sits behind the [`Interpreter`] trait so the core
//! stays independent of any particular engine.

#![warn(missing_docs)]

pub mod accumulator;
pub mod config;
pub mod console;
pub mod interp;
pub mod pointer;
pub mod transcript;

pub use accumulator::{StatementAccumulator, Verdict};
pub use config::{ConfigError, DisplayConfig, InterpreterConfig, ReplConfig, SessionConfig};
pub use console::{Console, LINE_CAPACITY};
pub use interp::{Interpreter, LoadMode, LoadOutcome};
pub use pointer::{Bounds, KeyCursor, Point, Pointer};
pub use transcript::{HistoryEntry, PromptKind, Transcript, TranscriptLine};
