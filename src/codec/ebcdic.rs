// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

//! IBM EBCDIC host code pages mixing single-byte and double-byte text with SO/SI.

use std::sync::Arc;

use encoding_index_dbcs::{SingleByteTable, TwoLevelTable};

use crate::shift::{ShiftState, SI, SO};
use crate::types::*;
use crate::util::{is_surrogate, parse_surrogate, Encoded};

/// Tables of one EBCDIC DBCS code page.
#[derive(Clone, Debug)]
pub struct EbcdicTables {
    /// Bytes in single-byte mode.
    pub single: Arc<SingleByteTable>,
    /// Byte pairs in double-byte mode.
    pub double: Arc<TwoLevelTable>,
    /// Code units to a single byte (zero high byte) or a byte pair.
    pub encode: Arc<TwoLevelTable>,
}

/// Both bytes of a double-byte pair lie in 41..FE. The pair 40 40 (ideographic space) is also valid.
fn is_valid_pair(b1: u8, b2: u8) -> bool {
    let in_range = |b: u8| (0x41..=0xfe).contains(&b);
    (in_range(b1) && in_range(b2)) || (b1 == 0x40 && b2 == 0x40)
}

#[derive(Clone, Debug)]
pub struct EbcdicDecoder {
    tables: EbcdicTables,
    state: ShiftState,
}

impl EbcdicDecoder {
    pub fn new(tables: EbcdicTables) -> EbcdicDecoder {
        EbcdicDecoder { tables, state: ShiftState::SingleByte }
    }

    pub fn state(&self) -> ShiftState { self.state }
}

impl RawDecoder for EbcdicDecoder {
    fn decode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
            where S: Source<Unit = u8>, D: Sink<Unit = u16> {
        while let Some(b1) = src.peek(0) {
            if b1 == SO || b1 == SI {
                if !self.state.apply(b1) { return CoderResult::Malformed(1); }
                src.advance(1);
                continue;
            }

            let (ch, len) = if self.state.is_double() {
                let b2 = match src.peek(1) {
                    Some(b2) => b2,
                    None => return CoderResult::Underflow,
                };
                if !is_valid_pair(b1, b2) { return CoderResult::Malformed(2); }
                (self.tables.double.lookup(u16::from(b1) << 8 | u16::from(b2)), 2)
            } else {
                (self.tables.single.lookup(b1), 1)
            };

            if ch == REPLACEMENT { return CoderResult::Unmappable(len); }
            if dst.remaining() < 1 { return CoderResult::Overflow; }
            dst.put(ch);
            src.advance(len);
        }
        CoderResult::Underflow
    }

    fn reset(&mut self) {
        self.state = ShiftState::SingleByte;
    }
}

#[derive(Clone, Debug)]
pub struct EbcdicEncoder {
    tables: EbcdicTables,
    state: ShiftState,
}

impl EbcdicEncoder {
    pub fn new(tables: EbcdicTables) -> EbcdicEncoder {
        EbcdicEncoder { tables, state: ShiftState::SingleByte }
    }

    pub fn state(&self) -> ShiftState { self.state }

    fn map(&self, unit: u16) -> Option<Encoded> {
        match self.tables.encode.lookup(unit) {
            0 if unit != 0 => None,
            value => Some(Encoded::from_table(value)),
        }
    }
}

impl RawEncoder for EbcdicEncoder {
    fn encode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
            where S: Source<Unit = u16>, D: Sink<Unit = u8> {
        while let Some(c) = src.peek(0) {
            if is_surrogate(c) { return parse_surrogate(src); }
            let encoded = match self.map(c) {
                Some(encoded) => encoded,
                None => return CoderResult::Unmappable(1),
            };

            // a shift byte stays written even if the payload then overflows;
            // the retry finds the state already switched.
            let double = encoded.len() == 2;
            if let Some(shift) = self.state.transition(double) {
                if dst.remaining() < 1 { return CoderResult::Overflow; }
                dst.put(shift);
                self.state = ShiftState::target(double);
            }
            if !encoded.write_to(dst) { return CoderResult::Overflow; }
            src.advance(1);
        }
        CoderResult::Underflow
    }

    fn flush<D: Sink<Unit = u8>>(&mut self, dst: &mut D) -> CoderResult {
        if self.state.is_double() {
            if dst.remaining() < 1 { return CoderResult::Overflow; }
            dst.put(SI);
            self.state = ShiftState::SingleByte;
        }
        CoderResult::Underflow
    }

    fn reset(&mut self) {
        self.state = ShiftState::SingleByte;
    }

    fn can_encode(&self, unit: u16) -> bool {
        !is_surrogate(unit) && self.map(unit).is_some()
    }
}
