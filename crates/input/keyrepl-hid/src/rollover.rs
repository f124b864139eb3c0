//! Key rollover tracking.
//!
//! A [`RolloverTracker`] owns a fixed array of [`KeySlot`]s pairing a raw
//! usage id with its [`KeyState`]. Every incoming report is reconciled
//! against the array so that each physical key-down edge shows up as
//! [`KeyState::Pressed`] exactly once, stays [`KeyState::Held`] while the key
//! remains in the reports, and is visible as [`KeyState::Released`] for one
//! report before its slot is freed.
//!
//! Slot indices carry no meaning; all queries are keyed by usage id.

use crate::keycode::{Key, ModifierMask};
use crate::report::MAX_KEYS;

bitflags::bitflags! {
    /// Set of key states, used for state-mask queries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StateMask: u8 {
        /// Key went down on the current report.
        const PRESSED  = 1 << 0;
        /// Key went up; the slot is freed on the next report.
        const RELEASED = 1 << 1;
        /// Key has been down for more than one tick.
        const HELD     = 1 << 2;
    }
}

/// Per-slot key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    /// Slot is empty.
    #[default]
    Idle,
    /// Key-down edge not yet consumed.
    Pressed,
    /// Key is down and its press edge has been consumed.
    Held,
    /// Key left the report; observable for exactly one reconcile.
    Released,
}

impl KeyState {
    /// Returns the mask bit for this state (empty for [`KeyState::Idle`]).
    pub const fn mask(self) -> StateMask {
        match self {
            Self::Idle => StateMask::empty(),
            Self::Pressed => StateMask::PRESSED,
            Self::Held => StateMask::HELD,
            Self::Released => StateMask::RELEASED,
        }
    }
}

/// One rollover slot: which key, and what it is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySlot {
    /// Raw usage id, 0 when the slot is empty.
    pub code: u8,
    /// State of the key in this slot.
    pub state: KeyState,
}

impl KeySlot {
    const EMPTY: Self = Self {
        code: 0,
        state: KeyState::Idle,
    };

    /// Returns `true` if the slot holds a key.
    pub const fn is_occupied(&self) -> bool {
        self.code != 0
    }
}

/// Fixed-capacity set of currently tracked keys.
#[derive(Debug, Clone)]
pub struct RolloverTracker {
    slots: [KeySlot; MAX_KEYS],
    modifiers: ModifierMask,
}

impl Default for RolloverTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RolloverTracker {
    /// Creates a tracker with every slot empty.
    pub const fn new() -> Self {
        Self {
            slots: [KeySlot::EMPTY; MAX_KEYS],
            modifiers: ModifierMask::empty(),
        }
    }

    /// Reconciles the slot array against a new report.
    ///
    /// `raw_codes` holds the usage ids present in the report (zeros are
    /// ignored, at most [`MAX_KEYS`] are looked at). Steps run in a fixed
    /// order: slots released on the previous report are freed, slots whose
    /// key is missing from this report are marked released, keys already
    /// tracked become held, and new keys claim the first free slot as
    /// pressed. A new key with no free slot is dropped for this report.
    pub fn reconcile(&mut self, raw_codes: &[u8], modifiers: ModifierMask) {
        let raw_codes = &raw_codes[..raw_codes.len().min(MAX_KEYS)];
        self.modifiers = modifiers;

        // 1. Free slots released on the previous report.
        for slot in &mut self.slots {
            if slot.state == KeyState::Released {
                *slot = KeySlot::EMPTY;
            }
        }

        // 2. Occupied slots whose key left the report are released.
        for slot in &mut self.slots {
            if slot.is_occupied() && !raw_codes.contains(&slot.code) {
                tracing::trace!(code = slot.code, "key released");
                slot.state = KeyState::Released;
            }
        }

        for (i, &code) in raw_codes.iter().enumerate() {
            // Repeats within one report are the same key.
            if code == 0 || raw_codes[..i].contains(&code) {
                continue;
            }

            if let Some(slot) = self.slots.iter_mut().find(|slot| slot.code == code) {
                // 3. Already tracked: held.
                slot.state = KeyState::Held;
            } else if let Some(slot) = self.slots.iter_mut().find(|slot| !slot.is_occupied()) {
                // 4. New key: claim the first free slot.
                tracing::trace!(code, "key pressed");
                *slot = KeySlot {
                    code,
                    state: KeyState::Pressed,
                };
            } else {
                tracing::trace!(code, "no free rollover slot, key dropped");
            }
        }

        debug_assert!(self.check_invariants());
    }

    /// Downgrades every pressed slot to held.
    ///
    /// Must run once per frame after all consumers have read the press
    /// edges, so a key held across several frames is typed only once.
    pub fn end_tick(&mut self) {
        for slot in &mut self.slots {
            if slot.state == KeyState::Pressed {
                slot.state = KeyState::Held;
            }
        }
    }

    /// Returns the state of `code`, or [`KeyState::Idle`] if it is not
    /// tracked.
    pub fn state_of(&self, code: u8) -> KeyState {
        if code == 0 {
            return KeyState::Idle;
        }
        self.slots
            .iter()
            .find(|slot| slot.code == code)
            .map_or(KeyState::Idle, |slot| slot.state)
    }

    /// Returns `true` if `code` is tracked in any state contained in `mask`.
    pub fn state_any(&self, code: u8, mask: StateMask) -> bool {
        mask.intersects(self.state_of(code).mask())
    }

    /// Returns `true` on the one tick where `key` went down.
    pub fn is_pressed(&self, key: Key) -> bool {
        self.state_any(key.code(), StateMask::PRESSED)
    }

    /// Returns `true` while `key` is down, including the press tick.
    pub fn is_pressed_or_held(&self, key: Key) -> bool {
        self.state_any(key.code(), StateMask::PRESSED | StateMask::HELD)
    }

    /// Iterates the usage ids currently in [`KeyState::Pressed`], in slot
    /// order.
    pub fn pressed_codes(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots
            .iter()
            .filter(|slot| slot.state == KeyState::Pressed)
            .map(|slot| slot.code)
    }

    /// Modifier mask delivered with the last report.
    pub fn modifiers(&self) -> ModifierMask {
        self.modifiers
    }

    /// Read-only view of the slot array.
    pub fn slots(&self) -> &[KeySlot; MAX_KEYS] {
        &self.slots
    }

    /// Returns `true` if the slot invariants hold: empty slots are idle,
    /// occupied slots are not, and no code occupies two slots.
    pub fn check_invariants(&self) -> bool {
        self.slots.iter().enumerate().all(|(i, slot)| {
            let consistent = slot.is_occupied() == (slot.state != KeyState::Idle);
            let unique = !slot.is_occupied()
                || self.slots[i + 1..].iter().all(|other| other.code != slot.code);
            consistent && unique
        })
    }
}
