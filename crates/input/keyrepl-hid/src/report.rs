//! HID boot-protocol keyboard reports.

use core::fmt;

use crate::keycode::ModifierMask;

/// Maximum number of simultaneous keys in a boot report.
pub const MAX_KEYS: usize = 6;

/// Length in bytes of a boot-protocol keyboard report.
pub const REPORT_LEN: usize = 8;

/// Usage id the keyboard sends in every key slot when more keys are down
/// than the report can carry.
const ERROR_ROLL_OVER: u8 = 0x01;

/// First usage id naming a real key; 0x01..=0x03 are error codes.
const FIRST_KEY_USAGE: u8 = 0x04;

/// Errors that can occur while decoding a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    /// The buffer holds fewer than [`REPORT_LEN`] bytes.
    TooShort {
        /// Number of bytes actually received.
        len: usize,
    },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len } => {
                write!(f, "boot report too short: {len} bytes, need {REPORT_LEN}")
            }
        }
    }
}

impl core::error::Error for ReportError {}

/// Boot protocol keyboard report.
///
/// Layout:
/// - byte 0: modifier bits
/// - byte 1: reserved (OEM use)
/// - bytes 2..8: up to six usage ids, 0 for an unused slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootReport {
    /// Modifier keys held while the report was generated.
    pub modifiers: ModifierMask,
    /// Reserved byte, carried through untouched.
    pub reserved: u8,
    /// Pressed key usage ids.
    pub keys: [u8; MAX_KEYS],
}

impl BootReport {
    /// Builds a report from a modifier mask and up to six usage ids.
    ///
    /// Codes beyond the sixth are ignored.
    pub fn new(modifiers: ModifierMask, codes: &[u8]) -> Self {
        let mut keys = [0; MAX_KEYS];
        for (slot, code) in keys.iter_mut().zip(codes) {
            *slot = *code;
        }
        Self {
            modifiers,
            reserved: 0,
            keys,
        }
    }

    /// Decodes a report from raw transfer bytes.
    ///
    /// Bytes past [`REPORT_LEN`] are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TooShort`] if `bytes` holds fewer than
    /// [`REPORT_LEN`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReportError> {
        if bytes.len() < REPORT_LEN {
            return Err(ReportError::TooShort { len: bytes.len() });
        }
        let mut keys = [0; MAX_KEYS];
        keys.copy_from_slice(&bytes[2..REPORT_LEN]);
        Ok(Self {
            modifiers: ModifierMask::from_bits_retain(bytes[0]),
            reserved: bytes[1],
            keys,
        })
    }

    /// Returns `true` for an ErrorRollOver report.
    ///
    /// Such a report says nothing about which keys are down, so it must not
    /// be reconciled against the tracked key state.
    pub fn is_phantom(&self) -> bool {
        self.keys.iter().all(|&code| code == ERROR_ROLL_OVER)
    }

    /// Iterates the usage ids of keys held in this report, skipping empty
    /// slots and the ErrorRollOver, POSTFail and ErrorUndefined codes.
    pub fn pressed(&self) -> impl Iterator<Item = u8> + '_ {
        self.keys
            .iter()
            .copied()
            .filter(|&code| code >= FIRST_KEY_USAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_report() {
        let report = BootReport::from_bytes(&[0x02, 0x00, 0x04, 0x05, 0, 0, 0, 0]).unwrap();
        assert_eq!(report.modifiers, ModifierMask::LEFT_SHIFT);
        assert_eq!(report.keys, [0x04, 0x05, 0, 0, 0, 0]);
        assert_eq!(report.pressed().collect::<std::vec::Vec<_>>(), [0x04, 0x05]);
    }

    #[test]
    fn error_usages_not_pressed() {
        let report = BootReport::from_bytes(&[0, 0, 0x01, 0x04, 0x02, 0x03, 0x05, 0]).unwrap();
        assert!(!report.is_phantom());
        assert_eq!(report.pressed().collect::<std::vec::Vec<_>>(), [0x04, 0x05]);
    }

    #[test]
    fn trailing_bytes_ignored() {
        let report = BootReport::from_bytes(&[0, 0, 0x28, 0, 0, 0, 0, 0, 0xFF]).unwrap();
        assert_eq!(report.keys[0], 0x28);
    }

    #[test]
    fn short_report_rejected() {
        assert_eq!(
            BootReport::from_bytes(&[0, 0, 4]),
            Err(ReportError::TooShort { len: 3 })
        );
        assert_eq!(
            format!("{}", ReportError::TooShort { len: 3 }),
            "boot report too short: 3 bytes, need 8"
        );
    }

    #[test]
    fn phantom_report() {
        let report = BootReport::from_bytes(&[0, 0, 1, 1, 1, 1, 1, 1]).unwrap();
        assert!(report.is_phantom());
        assert_eq!(report.pressed().count(), 0);
        assert!(!BootReport::default().is_phantom());
    }

    #[test]
    fn new_truncates_to_six_keys() {
        let report = BootReport::new(ModifierMask::empty(), &[4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(report.keys, [4, 5, 6, 7, 8, 9]);
    }
}
