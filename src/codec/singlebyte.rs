// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

//! Common codec implementation for single-byte encodings.

use std::sync::Arc;

use encoding_index_dbcs::{SingleByteTable, TwoLevelTable};

use crate::types::*;
use crate::util::{is_surrogate, parse_surrogate};

#[derive(Clone, Debug)]
pub struct SingleByteDecoder {
    table: Arc<SingleByteTable>,
}

impl SingleByteDecoder {
    pub fn new(table: Arc<SingleByteTable>) -> SingleByteDecoder {
        SingleByteDecoder { table }
    }
}

impl RawDecoder for SingleByteDecoder {
    fn decode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
            where S: Source<Unit = u8>, D: Sink<Unit = u16> {
        while let Some(b) = src.peek(0) {
            let ch = self.table.lookup(b);
            if ch == REPLACEMENT { return CoderResult::Unmappable(1); }
            if dst.remaining() < 1 { return CoderResult::Overflow; }
            dst.put(ch);
            src.advance(1);
        }
        CoderResult::Underflow
    }

    fn reset(&mut self) {}
}

/// Encodes through a two-level table whose values all fit in one byte.
#[derive(Clone, Debug)]
pub struct SingleByteEncoder {
    table: Arc<TwoLevelTable>,
}

impl SingleByteEncoder {
    pub fn new(table: Arc<TwoLevelTable>) -> SingleByteEncoder {
        SingleByteEncoder { table }
    }

    fn map(&self, unit: u16) -> Option<u8> {
        match self.table.lookup(unit) {
            0 if unit != 0 => None,
            value if value > 0xff => None,
            value => Some(value as u8),
        }
    }
}

impl RawEncoder for SingleByteEncoder {
    fn encode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
            where S: Source<Unit = u16>, D: Sink<Unit = u8> {
        while let Some(c) = src.peek(0) {
            if is_surrogate(c) { return parse_surrogate(src); }
            let b = match self.map(c) {
                Some(b) => b,
                None => return CoderResult::Unmappable(1),
            };
            if dst.remaining() < 1 { return CoderResult::Overflow; }
            dst.put(b);
            src.advance(1);
        }
        CoderResult::Underflow
    }

    fn flush<D: Sink<Unit = u8>>(&mut self, _dst: &mut D) -> CoderResult {
        CoderResult::Underflow
    }

    fn reset(&mut self) {}

    fn can_encode(&self, unit: u16) -> bool {
        !is_surrogate(unit) && self.map(unit).is_some()
    }
}
