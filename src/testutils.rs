// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

//! Macros and fixtures for testing.

use std::fmt::Debug;
use std::sync::Arc;

use encoding_index_dbcs::{SingleByteTable, TableBuilder, UNMAPPED_CHAR};

use crate::charset::{Decoder, Encoder};
use crate::codec::ebcdic::{EbcdicDecoder, EbcdicEncoder, EbcdicTables};
use crate::codec::euc::{EucFixed2Decoder, EucFixed2Encoder, EucTables};
use crate::codec::japanese::{EucJpDecoder, EucJpEncoder, JisTables};
use crate::codec::korean::HangulEncoder;
use crate::codec::singlebyte::{SingleByteDecoder, SingleByteEncoder};
use crate::types::{CoderResult, RawDecoder, RawEncoder, SliceSink, SliceSource};

/// Output capacity used when a test does not care about overflow.
pub const AMPLE: usize = 64;

/// A test-friendly interface to decoders and encoders.
pub trait Harness {
    type In: Copy + Debug + PartialEq;
    type Out: Copy + Debug + PartialEq;

    /// Feeds `input` with room for `capacity` output units.
    /// Returns the result, the number of input units consumed and the output.
    fn test_feed(&mut self, input: &[Self::In], capacity: usize) -> (CoderResult, usize, Vec<Self::Out>);

    /// Finishes with room for `capacity` output units.
    fn test_finish(&mut self, capacity: usize) -> (CoderResult, Vec<Self::Out>);
}

macro_rules! decoder_harness {
    ($($t:ty),+) => ($(
        impl Harness for $t {
            type In = u8;
            type Out = u16;

            fn test_feed(&mut self, input: &[u8], capacity: usize) -> (CoderResult, usize, Vec<u16>) {
                let mut out = vec![0; capacity];
                let mut src = SliceSource::new(input);
                let (result, written) = {
                    let mut dst = SliceSink::new(&mut out);
                    let result = self.decode(&mut src, &mut dst);
                    (result, dst.position())
                };
                out.truncate(written);
                (result, src.position(), out)
            }

            fn test_finish(&mut self, _capacity: usize) -> (CoderResult, Vec<u16>) {
                (CoderResult::Underflow, Vec::new())
            }
        }
    )+)
}

macro_rules! encoder_harness {
    ($($t:ty),+) => ($(
        impl Harness for $t {
            type In = u16;
            type Out = u8;

            fn test_feed(&mut self, input: &[u16], capacity: usize) -> (CoderResult, usize, Vec<u8>) {
                let mut out = vec![0; capacity];
                let mut src = SliceSource::new(input);
                let (result, written) = {
                    let mut dst = SliceSink::new(&mut out);
                    let result = self.encode(&mut src, &mut dst);
                    (result, dst.position())
                };
                out.truncate(written);
                (result, src.position(), out)
            }

            fn test_finish(&mut self, capacity: usize) -> (CoderResult, Vec<u8>) {
                let mut out = vec![0; capacity];
                let (result, written) = {
                    let mut dst = SliceSink::new(&mut out);
                    let result = self.flush(&mut dst);
                    (result, dst.position())
                };
                out.truncate(written);
                (result, out)
            }
        }
    )+)
}

decoder_harness!(Decoder, SingleByteDecoder, EbcdicDecoder, EucFixed2Decoder, EucJpDecoder);
encoder_harness!(Encoder, SingleByteEncoder, EbcdicEncoder, EucFixed2Encoder, EucJpEncoder, HangulEncoder);

pub fn check_feed<H: Harness>(this: &mut H, processed: &[H::In], problem: &[H::In],
                              remaining: &[H::In], output: &[H::Out], expected: CoderResult) {
    let input = [processed, problem, remaining].concat();
    let (result, consumed, buf) = this.test_feed(&input, AMPLE);
    assert!((result, consumed) == (expected, processed.len()),
            "feed should return {:?}, but instead returned {:?}",
            (expected, processed.len()), (result, consumed));
    assert!(output == &buf[..],
            "feed should push {:?}, but instead pushed {:?}", output, buf);
}

pub fn check_feed_err<H: Harness>(this: &mut H, processed: &[H::In], problem: &[H::In],
                                  remaining: &[H::In], output: &[H::Out], kind: fn(usize) -> CoderResult) {
    check_feed(this, processed, problem, remaining, output, kind(problem.len()));
}

pub fn check_finish<H: Harness>(this: &mut H, output: &[H::Out], expected: CoderResult) {
    let (result, buf) = this.test_finish(AMPLE);
    assert!(result == expected,
            "finish should return {:?}, but instead returned {:?}", expected, result);
    assert!(output == &buf[..],
            "finish should push {:?}, but instead pushed {:?}", output, buf);
}

/// Feeds `processed` followed by an incomplete `unprocessed` tail,
/// expecting `Underflow` with only `processed` consumed.
macro_rules! assert_feed_ok {
    ($this:expr, $processed:expr, $unprocessed:expr, $output:expr) => (
        $crate::testutils::check_feed(&mut $this, &$processed, &[], &$unprocessed, &$output,
                                      $crate::types::CoderResult::Underflow)
    )
}

/// Feeds `processed`, `problem` and `remaining`,
/// expecting the given error kind over `problem` after `processed` was consumed.
macro_rules! assert_feed_err {
    ($kind:ident: $this:expr, $processed:expr, $problem:expr, $remaining:expr, $output:expr) => (
        $crate::testutils::check_feed_err(&mut $this, &$processed, &$problem, &$remaining, &$output,
                                          $crate::types::CoderResult::$kind)
    )
}

macro_rules! assert_finish_ok {
    ($this:expr, $output:expr) => (
        $crate::testutils::check_finish(&mut $this, &$output, $crate::types::CoderResult::Underflow)
    )
}

macro_rules! assert_finish_err {
    ($kind:ident: $this:expr, $output:expr) => (
        $crate::testutils::check_finish(&mut $this, &$output, $crate::types::CoderResult::$kind(1))
    )
}

fn invert(decode: &[(u16, u16)], builder: &mut TableBuilder) {
    for &(key, ch) in decode {
        if builder.get(ch) == 0 {
            builder.insert(ch, key);
        }
    }
}

/// Bytes 0x00-0x7f as ASCII, everything else unmapped.
pub fn ascii_table() -> SingleByteTable {
    SingleByteTable::from_fn(|b| if b < 0x80 { u16::from(b) } else { UNMAPPED_CHAR })
}

pub const EBCDIC_SINGLE: &[(u8, u16)] = &[
    (0x00, 0x0000), (0x25, 0x000a), (0x40, 0x0020), (0x4b, 0x002e), (0x6f, 0x003f),
    (0xc1, 0x0041), (0xc2, 0x0042), (0xc3, 0x0043), (0xf1, 0x0031),
];

pub const EBCDIC_DOUBLE: &[(u16, u16)] = &[
    (0x4040, 0x3000), (0x42c1, 0xff21), (0x4481, 0x3042), (0x45c1, 0x4e00), (0x5a41, 0x9ed1),
];

/// A tiny IBM EBCDIC DBCS host code page.
pub fn ebcdic_tables() -> EbcdicTables {
    let single = SingleByteTable::from_fn(|b| {
        EBCDIC_SINGLE.iter().find(|&&(k, _)| k == b).map_or(UNMAPPED_CHAR, |&(_, ch)| ch)
    });
    let mut double = TableBuilder::new(6, UNMAPPED_CHAR);
    double.extend(EBCDIC_DOUBLE.iter().cloned());
    let mut encode = TableBuilder::new(5, 0);
    invert(EBCDIC_DOUBLE, &mut encode);
    for &(b, ch) in EBCDIC_SINGLE {
        encode.insert(ch, u16::from(b));
    }
    EbcdicTables {
        single: Arc::new(single),
        double: Arc::new(double.split_at(100).build()),
        encode: Arc::new(encode.build()),
    }
}

pub const IBM970_DOUBLE: &[(u16, u16)] = &[
    (0xa1a1, 0x3000), (0xa2c1, 0x2609), (0xa4a1, 0x3131), (0xb0a1, 0xac00), (0xb0a2, 0xac01),
    (0xb1db, 0xae00), (0xc7d1, 0xd55c),
];

/// A tiny IBM970: ASCII and C1 controls in G0, a handful of KS X 1001 pairs in G1.
/// U+2299 also encodes to A2C1, which decodes to U+2609.
pub fn ibm970_tables() -> EucTables {
    let g0 = SingleByteTable::from_fn(|b| if b <= 0x9f { u16::from(b) } else { UNMAPPED_CHAR });
    let mut decode = TableBuilder::new(6, UNMAPPED_CHAR);
    decode.extend(IBM970_DOUBLE.iter().cloned());
    let mut encode = TableBuilder::new(6, 0);
    invert(IBM970_DOUBLE, &mut encode);
    encode.extend((0..=0x9fu16).map(|c| (c, c)));
    encode.insert(0x2299, 0xa2c1);
    EucTables {
        g0: Some(Arc::new(g0)),
        region: (0xa1, 0xfe),
        decode: Arc::new(decode.build()),
        encode: Arc::new(encode.build()),
    }
}

pub const JIS0208: &[(u16, u16)] = &[
    (0x2121, 0x3000), (0x2131, 0xffe3), (0x2422, 0x3042), (0x467c, 0x65e5), (0x4b5c, 0x672c),
];

pub const JIS0212: &[(u16, u16)] = &[
    (0x2b21, 0x00e1), (0x4b46, 0x736c), (0x6c38, 0x8c78),
];

fn jis_tables(pairs: &[(u16, u16)]) -> JisTables {
    let mut decode = TableBuilder::new(7, UNMAPPED_CHAR);
    decode.extend(pairs.iter().cloned());
    let mut encode = TableBuilder::new(6, 0);
    invert(pairs, &mut encode);
    JisTables { decode: Arc::new(decode.build()), encode: Arc::new(encode.build()) }
}

/// JIS X 0208 keyed in 7-bit form.
pub fn jis0208_tables() -> JisTables {
    jis_tables(JIS0208)
}

/// JIS X 0212 keyed in 7-bit form.
pub fn jis0212_tables() -> JisTables {
    jis_tables(JIS0212)
}
