//! HID usage ids and the fixed US keyboard layout.
//!
//! [`Key`] names every usage the console reacts to. Raw report bytes are
//! mapped onto it with [`Key::from_code`]; glyph-producing keys resolve to
//! their unshifted or shifted character through [`Key::glyph`].

bitflags::bitflags! {
    /// Modifier byte of a HID boot keyboard report.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ModifierMask: u8 {
        /// Left Control.
        const LEFT_CTRL   = 1 << 0;
        /// Left Shift.
        const LEFT_SHIFT  = 1 << 1;
        /// Left Alt.
        const LEFT_ALT    = 1 << 2;
        /// Left Meta (GUI).
        const LEFT_META   = 1 << 3;
        /// Right Control.
        const RIGHT_CTRL  = 1 << 4;
        /// Right Shift.
        const RIGHT_SHIFT = 1 << 5;
        /// Right Alt.
        const RIGHT_ALT   = 1 << 6;
        /// Right Meta (GUI).
        const RIGHT_META  = 1 << 7;

        /// Either Shift key.
        const SHIFT = Self::LEFT_SHIFT.bits() | Self::RIGHT_SHIFT.bits();
        /// Either Control key.
        const CTRL = Self::LEFT_CTRL.bits() | Self::RIGHT_CTRL.bits();
    }
}

impl ModifierMask {
    /// Returns `true` if either Shift key is held.
    pub fn shifted(self) -> bool {
        self.intersects(Self::SHIFT)
    }
}

/// Keyboard keys by HID usage id (Keyboard/Keypad page 0x07).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Key {
    // Letters
    /// A key.
    A = 0x04,
    /// B key.
    B = 0x05,
    /// C key.
    C = 0x06,
    /// D key.
    D = 0x07,
    /// E key.
    E = 0x08,
    /// F key.
    F = 0x09,
    /// G key.
    G = 0x0A,
    /// H key.
    H = 0x0B,
    /// I key.
    I = 0x0C,
    /// J key.
    J = 0x0D,
    /// K key.
    K = 0x0E,
    /// L key.
    L = 0x0F,
    /// M key.
    M = 0x10,
    /// N key.
    N = 0x11,
    /// O key.
    O = 0x12,
    /// P key.
    P = 0x13,
    /// Q key.
    Q = 0x14,
    /// R key.
    R = 0x15,
    /// S key.
    S = 0x16,
    /// T key.
    T = 0x17,
    /// U key.
    U = 0x18,
    /// V key.
    V = 0x19,
    /// W key.
    W = 0x1A,
    /// X key.
    X = 0x1B,
    /// Y key.
    Y = 0x1C,
    /// Z key.
    Z = 0x1D,

    // Digits (HID orders them 1..9 then 0)
    /// 1 key.
    Num1 = 0x1E,
    /// 2 key.
    Num2 = 0x1F,
    /// 3 key.
    Num3 = 0x20,
    /// 4 key.
    Num4 = 0x21,
    /// 5 key.
    Num5 = 0x22,
    /// 6 key.
    Num6 = 0x23,
    /// 7 key.
    Num7 = 0x24,
    /// 8 key.
    Num8 = 0x25,
    /// 9 key.
    Num9 = 0x26,
    /// 0 key.
    Num0 = 0x27,

    // Control keys
    /// Enter/Return key.
    Enter = 0x28,
    /// Escape key.
    Escape = 0x29,
    /// Backspace key.
    Backspace = 0x2A,
    /// Tab key.
    Tab = 0x2B,
    /// Space bar.
    Space = 0x2C,

    // Punctuation
    /// Minus/Underscore key.
    Minus = 0x2D,
    /// Equals/Plus key.
    Equals = 0x2E,
    /// Left bracket key.
    LeftBracket = 0x2F,
    /// Right bracket key.
    RightBracket = 0x30,
    /// Backslash/Pipe key.
    Backslash = 0x31,
    /// Semicolon/Colon key.
    Semicolon = 0x33,
    /// Apostrophe/Quote key.
    Apostrophe = 0x34,
    /// Grave/Tilde key.
    Grave = 0x35,
    /// Comma/Less-than key.
    Comma = 0x36,
    /// Period/Greater-than key.
    Period = 0x37,
    /// Slash/Question key.
    Slash = 0x38,
    /// Caps Lock key.
    CapsLock = 0x39,

    // Function keys
    /// F1 key.
    F1 = 0x3A,
    /// F2 key.
    F2 = 0x3B,
    /// F3 key.
    F3 = 0x3C,
    /// F4 key.
    F4 = 0x3D,
    /// F5 key.
    F5 = 0x3E,
    /// F6 key.
    F6 = 0x3F,
    /// F7 key.
    F7 = 0x40,
    /// F8 key.
    F8 = 0x41,
    /// F9 key.
    F9 = 0x42,
    /// F10 key.
    F10 = 0x43,
    /// F11 key.
    F11 = 0x44,
    /// F12 key.
    F12 = 0x45,

    // Navigation
    /// Right arrow key.
    ArrowRight = 0x4F,
    /// Left arrow key.
    ArrowLeft = 0x50,
    /// Down arrow key.
    ArrowDown = 0x51,
    /// Up arrow key.
    ArrowUp = 0x52,
}

/// Letters in usage order; index 0 is [`Key::A`].
const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

/// Digits in usage order; index 0 is [`Key::Num1`].
const DIGITS: [Key; 10] = [
    Key::Num1, Key::Num2, Key::Num3, Key::Num4, Key::Num5,
    Key::Num6, Key::Num7, Key::Num8, Key::Num9, Key::Num0,
];

/// Unshifted glyphs of the letter and digit range, in usage order.
const PLAIN_GLYPHS: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz1234567890";

/// Shifted glyphs of the letter and digit range, in usage order.
const SHIFTED_GLYPHS: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ!@#$%^&*()";

impl Key {
    /// Returns the raw HID usage id.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Maps a raw HID usage id onto a named key.
    ///
    /// Returns `None` for the empty code (0), the error usages (1..=3) and
    /// any usage this layout does not name.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x04..=0x1D => Some(LETTERS[usize::from(code - 0x04)]),
            0x1E..=0x27 => Some(DIGITS[usize::from(code - 0x1E)]),
            0x28 => Some(Self::Enter),
            0x29 => Some(Self::Escape),
            0x2A => Some(Self::Backspace),
            0x2B => Some(Self::Tab),
            0x2C => Some(Self::Space),
            0x2D => Some(Self::Minus),
            0x2E => Some(Self::Equals),
            0x2F => Some(Self::LeftBracket),
            0x30 => Some(Self::RightBracket),
            0x31 => Some(Self::Backslash),
            0x33 => Some(Self::Semicolon),
            0x34 => Some(Self::Apostrophe),
            0x35 => Some(Self::Grave),
            0x36 => Some(Self::Comma),
            0x37 => Some(Self::Period),
            0x38 => Some(Self::Slash),
            0x39 => Some(Self::CapsLock),
            0x3A => Some(Self::F1),
            0x3B => Some(Self::F2),
            0x3C => Some(Self::F3),
            0x3D => Some(Self::F4),
            0x3E => Some(Self::F5),
            0x3F => Some(Self::F6),
            0x40 => Some(Self::F7),
            0x41 => Some(Self::F8),
            0x42 => Some(Self::F9),
            0x43 => Some(Self::F10),
            0x44 => Some(Self::F11),
            0x45 => Some(Self::F12),
            0x4F => Some(Self::ArrowRight),
            0x50 => Some(Self::ArrowLeft),
            0x51 => Some(Self::ArrowDown),
            0x52 => Some(Self::ArrowUp),
            _ => None,
        }
    }

    /// Translate the key to the character it types, accounting for shift.
    ///
    /// Returns `None` for keys that don't produce a character (control keys,
    /// function keys, arrows, etc.).
    pub fn glyph(self, shifted: bool) -> Option<char> {
        let code = self.code();
        if (Self::A.code()..=Self::Num0.code()).contains(&code) {
            let table = if shifted { SHIFTED_GLYPHS } else { PLAIN_GLYPHS };
            return Some(char::from(table[usize::from(code - Self::A.code())]));
        }

        let (plain, upper) = match self {
            Self::Space => (' ', ' '),
            Self::Minus => ('-', '_'),
            Self::Equals => ('=', '+'),
            Self::LeftBracket => ('[', '{'),
            Self::RightBracket => (']', '}'),
            Self::Backslash => ('\\', '|'),
            Self::Semicolon => (';', ':'),
            Self::Apostrophe => ('\'', '"'),
            Self::Grave => ('`', '~'),
            Self::Comma => (',', '<'),
            Self::Period => ('.', '>'),
            Self::Slash => ('/', '?'),
            _ => return None,
        };
        Some(if shifted { upper } else { plain })
    }
}

impl From<Key> for u8 {
    fn from(key: Key) -> Self {
        key.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_roundtrip() {
        for code in 0..=u8::MAX {
            if let Some(key) = Key::from_code(code) {
                assert_eq!(key.code(), code);
            }
        }
    }

    #[test]
    fn empty_and_error_codes_are_unmapped() {
        assert_eq!(Key::from_code(0), None);
        assert_eq!(Key::from_code(1), None);
        assert_eq!(Key::from_code(0x32), None);
    }

    #[test]
    fn letters_follow_shift() {
        assert_eq!(Key::A.glyph(false), Some('a'));
        assert_eq!(Key::A.glyph(true), Some('A'));
        assert_eq!(Key::Z.glyph(true), Some('Z'));
    }

    #[test]
    fn digits_and_symbols() {
        assert_eq!(Key::Num1.glyph(false), Some('1'));
        assert_eq!(Key::Num2.glyph(true), Some('@'));
        assert_eq!(Key::Num0.glyph(false), Some('0'));
        assert_eq!(Key::Num0.glyph(true), Some(')'));
    }

    #[test]
    fn punctuation_pairs() {
        assert_eq!(Key::Equals.glyph(true), Some('+'));
        assert_eq!(Key::LeftBracket.glyph(false), Some('['));
        assert_eq!(Key::Apostrophe.glyph(true), Some('"'));
        assert_eq!(Key::Space.glyph(true), Some(' '));
    }

    #[test]
    fn control_keys_have_no_glyph() {
        assert_eq!(Key::Enter.glyph(false), None);
        assert_eq!(Key::Backspace.glyph(true), None);
        assert_eq!(Key::ArrowUp.glyph(false), None);
        assert_eq!(Key::F5.glyph(false), None);
    }

    #[test]
    fn shift_mask() {
        assert!(ModifierMask::LEFT_SHIFT.shifted());
        assert!(ModifierMask::RIGHT_SHIFT.shifted());
        assert!(!(ModifierMask::LEFT_CTRL | ModifierMask::RIGHT_ALT).shifted());
        assert_eq!(ModifierMask::from_bits_truncate(0x22), ModifierMask::SHIFT);
    }
}
