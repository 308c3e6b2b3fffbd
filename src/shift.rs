// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

//! Shift-state control: locking shifts (SO/SI) and single shifts (SS2/SS3).

/// Shift-Out, entering double-byte mode.
pub const SO: u8 = 0x0e;
/// Shift-In, returning to single-byte mode.
pub const SI: u8 = 0x0f;
/// Single-shift 2, selecting G2 for the next character.
pub const SS2: u8 = 0x8e;
/// Single-shift 3, selecting G3 for the next character.
pub const SS3: u8 = 0x8f;

/// The locking shift state of an EBCDIC DBCS stream.
/// Each decoder and encoder owns one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShiftState {
    #[default]
    SingleByte,
    DoubleByte,
}

impl ShiftState {
    pub fn is_double(self) -> bool {
        self == ShiftState::DoubleByte
    }

    /// Applies a decoded `SO` or `SI`.
    /// Returns false, leaving the state alone, if the stream is already in the target mode.
    pub fn apply(&mut self, byte: u8) -> bool {
        let target = match byte {
            SO => ShiftState::DoubleByte,
            SI => ShiftState::SingleByte,
            _ => return false,
        };
        if *self == target {
            return false;
        }
        *self = target;
        true
    }

    /// The shift byte to emit before a unit of the given width, if any,
    /// after which the state is `target(double)`.
    pub fn transition(self, double: bool) -> Option<u8> {
        match (self, double) {
            (ShiftState::SingleByte, true) => Some(SO),
            (ShiftState::DoubleByte, false) => Some(SI),
            _ => None,
        }
    }

    pub fn target(double: bool) -> ShiftState {
        if double { ShiftState::DoubleByte } else { ShiftState::SingleByte }
    }
}

/// A code set invoked by an EUC single shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SingleShift {
    G2,
    G3,
}

impl SingleShift {
    pub fn from_byte(byte: u8) -> Option<SingleShift> {
        match byte {
            SS2 => Some(SingleShift::G2),
            SS3 => Some(SingleShift::G3),
            _ => None,
        }
    }

    pub fn byte(self) -> u8 {
        match self {
            SingleShift::G2 => SS2,
            SingleShift::G3 => SS3,
        }
    }

    /// Bytes following the shift byte.
    pub fn trail_len(self) -> usize {
        match self {
            SingleShift::G2 => 1,
            SingleShift::G3 => 2,
        }
    }
}
