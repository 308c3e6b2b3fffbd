// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

//! Legacy Japanese encodings based on JIS X 0201, JIS X 0208 and JIS X 0212.

use std::sync::Arc;

use encoding_index_dbcs::{jis0201, TwoLevelTable};

use crate::codec::euc::EucTables;
use crate::shift::{SingleShift, SS2, SS3};
use crate::types::*;
use crate::util::{is_surrogate, parse_surrogate, Encoded};

/// A 94x94 JIS character set keyed and valued in 7-bit (GL) form, `0x2121` to `0x7e7e`.
#[derive(Clone, Debug)]
pub struct JisTables {
    pub decode: Arc<TwoLevelTable>,
    pub encode: Arc<TwoLevelTable>,
}

impl JisTables {
    /// The set on its own as a 7-bit two-byte charset without G0.
    pub fn standalone(&self) -> EucTables {
        EucTables {
            g0: None,
            region: (0x21, 0x7e),
            decode: self.decode.clone(),
            encode: self.encode.clone(),
        }
    }

    fn decode_gl(&self, b1: u8, b2: u8) -> u16 {
        self.decode.lookup(u16::from(b1 & 0x7f) << 8 | u16::from(b2 & 0x7f))
    }

    fn encode_gr(&self, unit: u16) -> Option<(u8, u8)> {
        match self.encode.lookup(unit) {
            0 => None,
            value => Some(((value >> 8) as u8 | 0x80, value as u8 | 0x80)),
        }
    }
}

/**
 * Tables of EUC-JP.
 *
 * EUC-JP is built from three JIS character sets:
 *
 * - JIS X 0201, whose lower half shares G0 with ASCII and whose upper half
 *   (half-width katakana) is in G2 (`8E [A1-DF]`).
 * - JIS X 0208 in G1 (`[A1-FE] [A1-FE]`).
 * - JIS X 0212 in G3 (`8F [A1-FE] [A1-FE]`), absent from the Linux flavour.
 */
#[derive(Clone, Debug)]
pub struct EucJpTables {
    pub jis0208: JisTables,
    pub jis0212: Option<JisTables>,
}

#[inline]
fn is_gr(b: u8) -> bool {
    (0xa1..=0xfe).contains(&b)
}

#[derive(Clone, Debug)]
pub struct EucJpDecoder {
    tables: EucJpTables,
}

impl EucJpDecoder {
    pub fn new(tables: EucJpTables) -> EucJpDecoder {
        EucJpDecoder { tables }
    }
}

impl RawDecoder for EucJpDecoder {
    fn decode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
            where S: Source<Unit = u8>, D: Sink<Unit = u16> {
        macro_rules! trail {
            ($ahead:expr) => (
                match src.peek($ahead) {
                    Some(b) if is_gr(b) => b,
                    Some(_) => return CoderResult::Malformed($ahead + 1),
                    None => return CoderResult::Underflow,
                }
            )
        }

        while let Some(b1) = src.peek(0) {
            let (ch, len) = match b1 {
                0x00..=0x7f => (u16::from(b1), 1),
                SS2 => {
                    let b2 = trail!(1);
                    (jis0201::forward(b2), 1 + SingleShift::G2.trail_len())
                }
                SS3 => match self.tables.jis0212 {
                    Some(ref jis0212) => {
                        let b2 = trail!(1);
                        let b3 = trail!(2);
                        (jis0212.decode_gl(b2, b3), 1 + SingleShift::G3.trail_len())
                    }
                    None => return CoderResult::Malformed(1),
                },
                0xa1..=0xfe => {
                    let b2 = trail!(1);
                    (self.tables.jis0208.decode_gl(b1, b2), 2)
                }
                _ => return CoderResult::Malformed(1),
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
pub struct EucJpEncoder {
    tables: EucJpTables,
}

impl EucJpEncoder {
    pub fn new(tables: EucJpTables) -> EucJpEncoder {
        EucJpEncoder { tables }
    }

    /// ASCII first, then JIS X 0201, JIS X 0208 and JIS X 0212.
    fn map(&self, unit: u16) -> Option<Encoded> {
        if unit < 0x80 {
            return Some(Encoded::single(unit as u8));
        }
        if unit >= 0xfffe {
            return None;
        }
        match jis0201::backward(unit) {
            0 => {}
            b if b >= 0x80 => return Some(Encoded::double(SingleShift::G2.byte(), b)),
            b => return Some(Encoded::single(b)),
        }
        if let Some((hi, lo)) = self.tables.jis0208.encode_gr(unit) {
            return Some(Encoded::double(hi, lo));
        }
        let jis0212 = self.tables.jis0212.as_ref()?;
        jis0212.encode_gr(unit).map(|(hi, lo)| Encoded::triple(SingleShift::G3.byte(), hi, lo))
    }
}

impl RawEncoder for EucJpEncoder {
    fn encode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
            where S: Source<Unit = u16>, D: Sink<Unit = u8> {
        while let Some(c) = src.peek(0) {
            if is_surrogate(c) { return parse_surrogate(src); }
            let encoded = match self.map(c) {
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
        !is_surrogate(unit) && self.map(unit).is_some()
    }
}
