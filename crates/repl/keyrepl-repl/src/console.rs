//! The console: all per-session input state behind one owner.
//!
//! The transport calls [`Console::on_report`] for every keyboard report and
//! [`Console::on_pointer_delta`] for every mouse report; the frame loop calls
//! [`Console::tick`] once per frame after rendering. Nothing here blocks,
//! and there is exactly one writer, so no locking is involved.
//!
//! Key handling per report:
//! 1. reconcile the rollover tracker against the report
//! 2. for each key that just went down: type its glyph, erase on
//!    Backspace, submit the line on Enter
//!
//! Press edges are consumed at the end of the frame by [`Console::tick`], so
//! a key held across reports types a single character.

use keyrepl_hid::report::MAX_KEYS;
use keyrepl_hid::{BootReport, Key, LineBuffer, ModifierMask, RolloverTracker};
use tracing::{debug, trace};

use crate::accumulator::{StatementAccumulator, Verdict};
use crate::config::ReplConfig;
use crate::interp::Interpreter;
use crate::pointer::{Bounds, KeyCursor, Pointer};
use crate::transcript::{PromptKind, Transcript};

/// Maximum length of the edit line.
pub const LINE_CAPACITY: usize = 256;

/// Interactive console state.
#[derive(Debug)]
pub struct Console<I> {
    keys: RolloverTracker,
    line: LineBuffer<LINE_CAPACITY>,
    accumulator: StatementAccumulator,
    transcript: Transcript,
    pointer: Pointer,
    key_cursor: KeyCursor,
    bounds: Bounds,
    interp: I,
}

impl<I: Interpreter> Console<I> {
    /// Creates a console around `interp`.
    pub fn new(interp: I, config: &ReplConfig) -> Self {
        let bounds = config.display.bounds();
        Self {
            keys: RolloverTracker::new(),
            line: LineBuffer::new(),
            accumulator: StatementAccumulator::new(config.session.chunk_name.clone()),
            transcript: Transcript::new(config.session.transcript_limit),
            pointer: Pointer::new(bounds),
            key_cursor: KeyCursor::new(bounds),
            bounds,
            interp,
        }
    }

    /// Handles one keyboard report from the transport.
    ///
    /// ErrorRollOver reports are dropped without touching key state, and
    /// error usages in a partly filled report never take a rollover slot.
    pub fn on_report(&mut self, report: &BootReport) {
        if report.is_phantom() {
            trace!("phantom report ignored");
            return;
        }
        let mut codes = [0u8; MAX_KEYS];
        for (slot, code) in codes.iter_mut().zip(report.pressed()) {
            *slot = code;
        }
        let len = report.pressed().count();
        self.on_raw_report(&codes[..len], report.modifiers);
    }

    /// Handles a raw set of held usage ids and the modifier mask.
    pub fn on_raw_report(&mut self, codes: &[u8], modifiers: ModifierMask) {
        self.keys.reconcile(codes, modifiers);

        let shifted = modifiers.shifted();
        let pressed: Vec<u8> = self.keys.pressed_codes().collect();
        for code in pressed {
            match Key::from_code(code) {
                Some(Key::Enter) => self.enter(),
                Some(Key::Backspace) => {
                    self.line.pop();
                }
                Some(key) => {
                    if let Some(ch) = key.glyph(shifted) {
                        if !self.line.push(ch) {
                            trace!(?ch, "line full, character dropped");
                        }
                    }
                }
                None => trace!(code, "unmapped key"),
            }
        }
    }

    /// Handles one mouse report.
    pub fn on_pointer_delta(&mut self, dx: i8, dy: i8, buttons: u8, wheel: i8) {
        self.pointer.apply(dx, dy, buttons, wheel, self.bounds);
    }

    /// Ends a frame: steps the key cursor for held arrows, then consumes
    /// this frame's press edges.
    pub fn tick(&mut self) {
        self.key_cursor.step(&self.keys, self.bounds);
        self.keys.end_tick();
    }

    /// Submits a line directly, bypassing the keyboard.
    pub fn submit_line(&mut self, text: &str) -> Verdict {
        let verdict = self
            .accumulator
            .submit(text, &mut self.interp, &mut self.transcript);
        debug!(?verdict, "line submitted");
        verdict
    }

    /// Enter: submit the edit line, then clear it whatever the outcome.
    fn enter(&mut self) {
        let text = self.line.as_str().to_owned();
        self.submit_line(&text);
        self.line.clear();
    }

    /// Prompt for the edit line.
    pub fn prompt(&self) -> PromptKind {
        self.accumulator.mode()
    }

    /// Text currently being edited.
    pub fn line(&self) -> &str {
        self.line.as_str()
    }

    /// Scrollback feed.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Key rollover state.
    pub fn keys(&self) -> &RolloverTracker {
        &self.keys
    }

    /// Mouse pointer.
    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Arrow-key cursor.
    pub fn key_cursor(&self) -> &KeyCursor {
        &self.key_cursor
    }

    /// The interpreter.
    pub fn interpreter(&self) -> &I {
        &self.interp
    }
}
