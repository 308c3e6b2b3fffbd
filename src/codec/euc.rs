// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

//! EUC-style encodings with an optional single-byte G0 and one fixed two-byte G1.

use std::sync::Arc;

use encoding_index_dbcs::{SingleByteTable, TwoLevelTable};

use crate::shift::SingleShift;
use crate::types::*;
use crate::util::{is_surrogate, parse_surrogate, Encoded};

/// Tables of a fixed two-byte EUC encoding.
///
/// Both bytes of a G1 pair lie in `region`, and the pair itself is the table key.
/// Bytes below the region go through `g0` when present.
#[derive(Clone, Debug)]
pub struct EucTables {
    pub g0: Option<Arc<SingleByteTable>>,
    pub region: (u8, u8),
    pub decode: Arc<TwoLevelTable>,
    /// Code units to a G0 byte (zero high byte) or a G1 pair.
    pub encode: Arc<TwoLevelTable>,
}

impl EucTables {
    #[inline]
    fn in_region(&self, b: u8) -> bool {
        self.region.0 <= b && b <= self.region.1
    }

    /// Maps one BMP code unit that is not a surrogate.
    pub(crate) fn map(&self, unit: u16) -> Option<Encoded> {
        if unit >= 0xfffe {
            return None;
        }
        match self.encode.lookup(unit) {
            0 if unit != 0 => None,
            // SS2 and SS3 are never G0 bytes
            value if value >> 8 == 0 && SingleShift::from_byte(value as u8).is_some() => None,
            value if value >> 8 == 0 => self.g0.as_ref().map(|_| Encoded::single(value as u8)),
            value => Some(Encoded::from_table(value)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EucFixed2Decoder {
    tables: EucTables,
}

impl EucFixed2Decoder {
    pub fn new(tables: EucTables) -> EucFixed2Decoder {
        EucFixed2Decoder { tables }
    }
}

impl RawDecoder for EucFixed2Decoder {
    fn decode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
            where S: Source<Unit = u8>, D: Sink<Unit = u16> {
        let tables = &self.tables;
        while let Some(b1) = src.peek(0) {
            let (ch, len) = if SingleShift::from_byte(b1).is_some() {
                return CoderResult::Malformed(1);
            } else if tables.in_region(b1) {
                let b2 = match src.peek(1) {
                    Some(b2) => b2,
                    None => return CoderResult::Underflow,
                };
                if !tables.in_region(b2) { return CoderResult::Malformed(2); }
                (tables.decode.lookup(u16::from(b1) << 8 | u16::from(b2)), 2)
            } else {
                // a byte G0 leaves unmapped is outside every set
                match tables.g0 {
                    Some(ref g0) if b1 < tables.region.0 => match g0.lookup(b1) {
                        REPLACEMENT => return CoderResult::Malformed(1),
                        ch => (ch, 1),
                    },
                    _ => return CoderResult::Malformed(1),
                }
            };

            if ch == REPLACEMENT { return CoderResult::Unmappable(len); }
            if dst.remaining() < 1 { return CoderResult::Overflow; }
            dst.put(ch);
            src.advance(len);
        }
        CoderResult::Underflow
    }

    fn reset(&mut self) {}
}

#[derive(Clone, Debug)]
pub struct EucFixed2Encoder {
    tables: EucTables,
}

impl EucFixed2Encoder {
    pub fn new(tables: EucTables) -> EucFixed2Encoder {
        EucFixed2Encoder { tables }
    }
}

impl RawEncoder for EucFixed2Encoder {
    fn encode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
            where S: Source<Unit = u16>, D: Sink<Unit = u8> {
        while let Some(c) = src.peek(0) {
            if is_surrogate(c) { return parse_surrogate(src); }
            let encoded = match self.tables.map(c) {
                Some(encoded) => encoded,
                None => return CoderResult::Unmappable(1),
            };
            if !encoded.write_to(dst) { return CoderResult::Overflow; }
            src.advance(1);
        }
        CoderResult::Underflow
    }

    fn flush<D: Sink<Unit = u8>>(&mut self, _dst: &mut D) -> CoderResult {
        CoderResult::Underflow
    }

    fn reset(&mut self) {}

    fn can_encode(&self, unit: u16) -> bool {
        !is_surrogate(unit) && self.tables.map(unit).is_some()
    }
}
