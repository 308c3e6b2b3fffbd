// This is a part of encoding-dbcs.
//
// Any copyright is dedicated to the Public Domain.
// https://creativecommons.org/publicdomain/zero/1.0/

//! Lookup structures shared by every decoder and encoder.

use crate::TableError;

/// The value decode tables hold for byte sequences without a mapping (U+FFFD).
pub const UNMAPPED_CHAR: u16 = 0xfffd;

/// A compact mapping from a 16-bit key to a 16-bit value.
///
/// The key is split into a coarse part (`key & mask1`), which after shifting right by `shift`
/// selects a block offset from `index1`, and a fine part (`key & mask2`) added to that offset.
/// The resulting payload position addresses `index2`, or `index2a` once it reaches `split`.
///
/// Decode tables are keyed by a byte pair (`lead << 8 | trail`) and yield a UTF-16 code unit,
/// with [`UNMAPPED_CHAR`] for holes.
/// Encode tables are keyed by a UTF-16 code unit and yield the encoded bytes (`hi << 8 | lo`),
/// with zero for holes; only U+0000 may legitimately map to zero.
///
/// Tables are immutable once built and can be shared freely between threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TwoLevelTable {
    index1: Box<[u32]>,
    index2: Box<[u16]>,
    index2a: Box<[u16]>,
    mask1: u16,
    mask2: u16,
    shift: u8,
    split: u32,
}

impl TwoLevelTable {
    /// Validates the table structure and wraps it.
    ///
    /// Every block reachable through `index1` must lie entirely inside the payload,
    /// so that `lookup` can never go out of bounds.
    pub fn new(
        index1: Vec<u32>,
        index2: Vec<u16>,
        index2a: Vec<u16>,
        mask1: u16,
        mask2: u16,
        shift: u8,
        split: u32,
    ) -> Result<TwoLevelTable, TableError> {
        if mask1 & mask2 != 0 {
            return Err(TableError::OverlappingMasks { mask1, mask2 });
        }
        if mask1 | mask2 != 0xffff {
            return Err(TableError::UncoveredKeyBits { mask1, mask2 });
        }
        if shift > 16 || u32::from(mask2) != (1u32 << shift) - 1 {
            return Err(TableError::ShiftMismatch { mask2, shift });
        }

        let blocks = (usize::from(mask1) >> shift) + 1;
        if index1.len() != blocks {
            return Err(TableError::Index1Length { expected: blocks, actual: index1.len() });
        }

        let split_at = split as usize;
        for (block, &offset) in index1.iter().enumerate() {
            let first = offset as usize;
            let last = first + usize::from(mask2);
            let in_index2 = first >= split_at || last.min(split_at - 1) < index2.len();
            let in_index2a = last < split_at || last - split_at < index2a.len();
            if !in_index2 || !in_index2a {
                return Err(TableError::BlockOutOfRange { block, offset });
            }
        }

        Ok(TwoLevelTable::from_parts(index1, index2, index2a, mask1, mask2, shift, split))
    }

    /// Wraps already-consistent parts. Callers guarantee what `new` would check.
    pub(crate) fn from_parts(
        index1: Vec<u32>,
        index2: Vec<u16>,
        index2a: Vec<u16>,
        mask1: u16,
        mask2: u16,
        shift: u8,
        split: u32,
    ) -> TwoLevelTable {
        TwoLevelTable {
            index1: index1.into_boxed_slice(),
            index2: index2.into_boxed_slice(),
            index2a: index2a.into_boxed_slice(),
            mask1,
            mask2,
            shift,
            split,
        }
    }

    /// Looks up the value for `key`.
    #[inline]
    pub fn lookup(&self, key: u16) -> u16 {
        let block = (u32::from(key & self.mask1) >> self.shift) as usize;
        let pos = self.index1[block] as usize + usize::from(key & self.mask2);
        let split = self.split as usize;
        if pos < split {
            self.index2[pos]
        } else {
            self.index2a[pos - split]
        }
    }

    pub fn index1(&self) -> &[u32] { &self.index1 }
    pub fn index2(&self) -> &[u16] { &self.index2 }
    pub fn index2a(&self) -> &[u16] { &self.index2a }
    pub fn mask1(&self) -> u16 { self.mask1 }
    pub fn mask2(&self) -> u16 { self.mask2 }
    pub fn shift(&self) -> u8 { self.shift }

    /// The payload position where `index2a` takes over from `index2`.
    pub fn split(&self) -> u32 { self.split }
}

/// A flat table from a byte to a UTF-16 code unit, [`UNMAPPED_CHAR`] for holes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleByteTable {
    chars: Box<[u16; 256]>,
}

impl SingleByteTable {
    pub fn new(chars: [u16; 256]) -> SingleByteTable {
        SingleByteTable { chars: Box::new(chars) }
    }

    /// Builds a table by calling `f` for every byte value.
    pub fn from_fn<F: FnMut(u8) -> u16>(mut f: F) -> SingleByteTable {
        let mut chars = [UNMAPPED_CHAR; 256];
        for (b, slot) in (0..=0xffu8).zip(chars.iter_mut()) {
            *slot = f(b);
        }
        SingleByteTable::new(chars)
    }

    #[inline]
    pub fn lookup(&self, byte: u8) -> u16 {
        self.chars[usize::from(byte)]
    }

    pub fn chars(&self) -> &[u16; 256] {
        &self.chars
    }
}
