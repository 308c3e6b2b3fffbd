// This is a part of encoding-dbcs.
//
// Any copyright is dedicated to the Public Domain.
// https://creativecommons.org/publicdomain/zero/1.0/

//! Index tables for [encoding-dbcs](../encoding_dbcs/index.html).
//!
//! The mapping data itself is not part of this crate.
//! Tables are either built in memory with [`TableBuilder`]
//! or decoded from a versioned binary asset with [`TableAsset::from_bytes`].
//! The only built-in table is the algorithmic JIS X 0201 in [`jis0201`].

use thiserror::Error;

pub use crate::asset::{Table, TableAsset, TableKind, MAGIC, VERSION};
pub use crate::builder::TableBuilder;
pub use crate::table::{SingleByteTable, TwoLevelTable, UNMAPPED_CHAR};

#[cfg(test)]
#[macro_use]
extern crate encoding_index_tests;

mod asset;
mod builder;
mod table;

/// JIS X 0201, the Roman and half-width Katakana sets.
pub mod jis0201;

/// Errors raised while validating or decoding an index table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("masks {mask1:#06x} and {mask2:#06x} overlap")]
    OverlappingMasks { mask1: u16, mask2: u16 },
    #[error("masks {mask1:#06x} and {mask2:#06x} do not cover all 16 key bits")]
    UncoveredKeyBits { mask1: u16, mask2: u16 },
    #[error("shift {shift} does not match the width of mask {mask2:#06x}")]
    ShiftMismatch { mask2: u16, shift: u8 },
    #[error("index1 has {actual} blocks, expected {expected}")]
    Index1Length { expected: usize, actual: usize },
    #[error("block {block} at offset {offset} runs past the end of the payload")]
    BlockOutOfRange { block: usize, offset: u32 },
    #[error("not a table asset")]
    BadMagic,
    #[error("unsupported table asset version {0}")]
    UnsupportedVersion(u16),
    #[error("unknown table kind {0}")]
    UnknownKind(u8),
    #[error("table asset truncated while reading {0}")]
    Truncated(&'static str),
    #[error("table asset id is not valid UTF-8")]
    InvalidId,
    #[error("{0} trailing bytes after table asset")]
    TrailingBytes(usize),
}
