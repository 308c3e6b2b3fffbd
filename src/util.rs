// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

//! Internal utilities.

use crate::types::{CoderResult, Sink, Source};

#[inline]
pub fn is_high_surrogate(unit: u16) -> bool {
    (0xd800..=0xdbff).contains(&unit)
}

#[inline]
pub fn is_low_surrogate(unit: u16) -> bool {
    (0xdc00..=0xdfff).contains(&unit)
}

#[inline]
pub fn is_surrogate(unit: u16) -> bool {
    (0xd800..=0xdfff).contains(&unit)
}

/// Classifies the surrogate at the front of `src`.
///
/// A high surrogate at the end of input needs more input (`Underflow`).
/// A lone low surrogate, or a high surrogate not followed by a low one, is `Malformed(1)`.
/// A well-formed pair is a supplementary character, which double-byte tables
/// cannot represent, hence `Unmappable(2)`.
pub fn parse_surrogate<S: Source<Unit = u16>>(src: &S) -> CoderResult {
    match src.peek(0) {
        Some(high) if is_high_surrogate(high) => match src.peek(1) {
            None => CoderResult::Underflow,
            Some(low) if is_low_surrogate(low) => CoderResult::Unmappable(2),
            Some(_) => CoderResult::Malformed(1),
        },
        _ => CoderResult::Malformed(1),
    }
}

/// Up to three encoded bytes for one input unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; 3],
    len: u8,
}

impl Encoded {
    pub fn single(b: u8) -> Encoded {
        Encoded { bytes: [b, 0, 0], len: 1 }
    }

    pub fn double(hi: u8, lo: u8) -> Encoded {
        Encoded { bytes: [hi, lo, 0], len: 2 }
    }

    pub fn triple(prefix: u8, hi: u8, lo: u8) -> Encoded {
        Encoded { bytes: [prefix, hi, lo], len: 3 }
    }

    /// Splits a table value: a zero high byte means a single byte.
    pub fn from_table(value: u16) -> Encoded {
        match value >> 8 {
            0 => Encoded::single(value as u8),
            hi => Encoded::double(hi as u8, value as u8),
        }
    }

    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// Writes all bytes, or nothing when `dst` lacks room.
    pub fn write_to<D: Sink<Unit = u8>>(&self, dst: &mut D) -> bool {
        if dst.remaining() < self.len() {
            return false;
        }
        for &b in self.as_slice() {
            dst.put(b);
        }
        true
    }
}
