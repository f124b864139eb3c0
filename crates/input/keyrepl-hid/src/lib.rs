//! Keyboard input layer for the keyrepl console.
//!
//! This crate turns raw HID boot-protocol keyboard reports into key states
//! and typed characters:
//!
//! - [`keycode`]: HID usage ids, modifier bits and the US layout table
//! - [`report`]: boot report decoding and phantom-report detection
//! - [`rollover`]: the fixed-slot key rollover tracker
//! - [`line`]: the bounded line buffer characters are typed into
//!
//! Everything here is `no_std` and allocation-free so it can run on the
//! device side of the transport as well as on the host.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod keycode;
pub mod line;
pub mod report;
pub mod rollover;

pub use keycode::{Key, ModifierMask};
pub use line::LineBuffer;
pub use report::{BootReport, ReportError};
pub use rollover::{KeySlot, KeyState, RolloverTracker, StateMask};
