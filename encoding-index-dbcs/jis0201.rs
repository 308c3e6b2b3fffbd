// This is a part of encoding-dbcs.
//
// Any copyright is dedicated to the Public Domain.
// https://creativecommons.org/publicdomain/zero/1.0/

use crate::builder::TableBuilder;
use crate::table::{SingleByteTable, TwoLevelTable, UNMAPPED_CHAR};

/// Returns the code unit for byte `code`, or U+FFFD for bytes outside JIS X 0201.
#[inline]
pub fn forward(code: u8) -> u16 {
    match code {
        0x5c => 0x00a5,
        0x7e => 0x203e,
        0x00..=0x7f => u16::from(code),
        0xa1..=0xdf => 0xff61 + u16::from(code - 0xa1),
        _ => UNMAPPED_CHAR,
    }
}

/// Returns the byte for code unit `code`, or 0 if it has none.
/// U+0000 legitimately maps to 0.
#[inline]
pub fn backward(code: u16) -> u8 {
    match code {
        0x00a5 => 0x5c,
        0x203e => 0x7e,
        0x005c | 0x007e => 0,
        0x0000..=0x007f => code as u8,
        0xff61..=0xff9f => (code - 0xff61) as u8 + 0xa1,
        _ => 0,
    }
}

pub fn decode_table() -> SingleByteTable {
    SingleByteTable::from_fn(forward)
}

/// An encode table whose results always have a zero high byte.
pub fn encode_table() -> TwoLevelTable {
    let mut builder = TableBuilder::new(6, 0);
    builder.extend((0..=0xffu8).filter_map(|b| {
        let ch = forward(b);
        if ch == UNMAPPED_CHAR { None } else { Some((ch, u16::from(b))) }
    }));
    builder.build()
}

#[cfg(test)]
single_byte_tests!(
    decode = super::forward,
    encode = super::backward
);
