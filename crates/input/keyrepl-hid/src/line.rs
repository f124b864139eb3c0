//! Bounded single-line edit buffer.
//!
//! The cursor always sits at the end of the line: characters are appended
//! and erased at the tail only.

use planck_noalloc::vec::ArrayVec;

/// ASCII line buffer holding at most `N` characters.
#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize> {
    bytes: ArrayVec<u8, N>,
}

impl<const N: usize> LineBuffer<N> {
    /// Maximum number of characters the buffer holds.
    pub const CAPACITY: usize = N;

    /// Creates an empty buffer.
    pub const fn new() -> Self {
        Self {
            bytes: ArrayVec::new(),
        }
    }

    /// Appends a character at the cursor.
    ///
    /// Returns `false` and leaves the buffer unchanged if the buffer is full
    /// or `ch` is not ASCII.
    pub fn push(&mut self, ch: char) -> bool {
        match u8::try_from(ch) {
            Ok(byte) if byte.is_ascii() => self.bytes.try_push(byte).is_ok(),
            _ => false,
        }
    }

    /// Erases the character before the cursor.
    ///
    /// Returns `None` on an empty buffer.
    pub fn pop(&mut self) -> Option<char> {
        self.bytes.pop().map(char::from)
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// The buffered text.
    pub fn as_str(&self) -> &str {
        // Only ASCII is ever pushed.
        core::str::from_utf8(self.bytes.as_slice()).unwrap_or_default()
    }

    /// Cursor position, always equal to [`len`](Self::len).
    pub fn cursor(&self) -> usize {
        self.bytes.len()
    }

    /// Number of buffered characters.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if no further character can be appended.
    pub fn is_full(&self) -> bool {
        self.bytes.len() == N
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop() {
        let mut line = LineBuffer::<8>::new();
        assert!(line.push('h'));
        assert!(line.push('i'));
        assert_eq!(line.as_str(), "hi");
        assert_eq!(line.cursor(), 2);
        assert_eq!(line.pop(), Some('i'));
        assert_eq!(line.as_str(), "h");
        assert_eq!(line.cursor(), line.len());
    }

    #[test]
    fn pop_on_empty_is_noop() {
        let mut line = LineBuffer::<8>::new();
        assert_eq!(line.pop(), None);
        assert!(line.is_empty());
        assert_eq!(line.cursor(), 0);
    }

    #[test]
    fn push_past_capacity_rejected() {
        let mut line = LineBuffer::<4>::new();
        for ch in "abcd".chars() {
            assert!(line.push(ch));
        }
        assert!(line.is_full());
        assert!(!line.push('e'));
        assert_eq!(line.as_str(), "abcd");
        assert_eq!(line.cursor(), 4);
    }

    #[test]
    fn non_ascii_rejected() {
        let mut line = LineBuffer::<4>::new();
        assert!(!line.push('£'));
        assert!(line.is_empty());
    }

    #[test]
    fn clear_resets_cursor() {
        let mut line = LineBuffer::<4>::new();
        line.push('x');
        line.clear();
        assert_eq!(line.as_str(), "");
        assert_eq!(line.cursor(), 0);
        assert_eq!(LineBuffer::<4>::CAPACITY, 4);
    }
}
