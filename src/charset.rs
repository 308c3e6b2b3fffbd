// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

//! Charset descriptors and the closed set of codec variants behind them.

use std::sync::Arc;

use encoding_index_dbcs::{jis0201, SingleByteTable, TwoLevelTable};

use crate::codec::ebcdic::{EbcdicDecoder, EbcdicEncoder, EbcdicTables};
use crate::codec::euc::{EucFixed2Decoder, EucFixed2Encoder, EucTables};
use crate::codec::japanese::{EucJpDecoder, EucJpEncoder, EucJpTables, JisTables};
use crate::codec::korean::HangulEncoder;
use crate::codec::singlebyte::{SingleByteDecoder, SingleByteEncoder};
use crate::types::*;

/// The codec strategy of a charset, with the tables it runs on.
#[derive(Clone, Debug)]
pub enum Variant {
    SingleByte { decode: Arc<SingleByteTable>, encode: Arc<TwoLevelTable> },
    Ebcdic(EbcdicTables),
    EucFixed2(EucTables),
    EucMixedShift(EucJpTables),
    /// Decodes as `EucFixed2`, encodes with Jamo composition.
    HangulComposing(EucTables),
}

/// A named charset. Cloning shares the tables.
#[derive(Clone, Debug)]
pub struct Charset {
    name: String,
    variant: Variant,
}

impl Charset {
    pub fn new<N: Into<String>>(name: N, variant: Variant) -> Charset {
        Charset { name: name.into(), variant }
    }

    pub fn single_byte<N: Into<String>>(name: N, decode: Arc<SingleByteTable>,
                                        encode: Arc<TwoLevelTable>) -> Charset {
        Charset::new(name, Variant::SingleByte { decode, encode })
    }

    /// JIS X 0201 Roman and katakana, built in.
    pub fn jis_x_0201() -> Charset {
        Charset::single_byte("JIS_X0201", Arc::new(jis0201::decode_table()),
                             Arc::new(jis0201::encode_table()))
    }

    pub fn ebcdic<N: Into<String>>(name: N, tables: EbcdicTables) -> Charset {
        Charset::new(name, Variant::Ebcdic(tables))
    }

    pub fn euc_fixed2<N: Into<String>>(name: N, tables: EucTables) -> Charset {
        Charset::new(name, Variant::EucFixed2(tables))
    }

    /// JIS X 0208 as a 7-bit two-byte charset.
    pub fn jis_x_0208(tables: &JisTables) -> Charset {
        Charset::euc_fixed2("JIS_X0208", tables.standalone())
    }

    /// JIS X 0212 as a 7-bit two-byte charset.
    pub fn jis_x_0212(tables: &JisTables) -> Charset {
        Charset::euc_fixed2("JIS_X0212", tables.standalone())
    }

    pub fn euc_jp(jis0208: JisTables, jis0212: JisTables) -> Charset {
        Charset::new("EUC-JP", Variant::EucMixedShift(EucJpTables { jis0208, jis0212: Some(jis0212) }))
    }

    /// EUC-JP without the JIS X 0212 set in G3.
    pub fn euc_jp_linux(jis0208: JisTables) -> Charset {
        Charset::new("x-euc-jp-linux", Variant::EucMixedShift(EucJpTables { jis0208, jis0212: None }))
    }

    pub fn ibm970(tables: EucTables) -> Charset {
        Charset::new("x-IBM970", Variant::HangulComposing(tables))
    }

    pub fn variant(&self) -> &Variant { &self.variant }
}

impl Encoding for Charset {
    type Decoder = Decoder;
    type Encoder = Encoder;

    fn name(&self) -> &str { &self.name }

    fn new_decoder(&self) -> Decoder {
        match self.variant {
            Variant::SingleByte { ref decode, .. } =>
                Decoder::SingleByte(SingleByteDecoder::new(decode.clone())),
            Variant::Ebcdic(ref tables) =>
                Decoder::Ebcdic(EbcdicDecoder::new(tables.clone())),
            Variant::EucFixed2(ref tables) | Variant::HangulComposing(ref tables) =>
                Decoder::EucFixed2(EucFixed2Decoder::new(tables.clone())),
            Variant::EucMixedShift(ref tables) =>
                Decoder::EucMixedShift(EucJpDecoder::new(tables.clone())),
        }
    }

    fn new_encoder(&self) -> Encoder {
        match self.variant {
            Variant::SingleByte { ref encode, .. } =>
                Encoder::SingleByte(SingleByteEncoder::new(encode.clone())),
            Variant::Ebcdic(ref tables) =>
                Encoder::Ebcdic(EbcdicEncoder::new(tables.clone())),
            Variant::EucFixed2(ref tables) =>
                Encoder::EucFixed2(EucFixed2Encoder::new(tables.clone())),
            Variant::EucMixedShift(ref tables) =>
                Encoder::EucMixedShift(EucJpEncoder::new(tables.clone())),
            Variant::HangulComposing(ref tables) =>
                Encoder::HangulComposing(HangulEncoder::new(tables.clone())),
        }
    }
}

/// A decoder of any variant.
#[derive(Clone, Debug)]
pub enum Decoder {
    SingleByte(SingleByteDecoder),
    Ebcdic(EbcdicDecoder),
    EucFixed2(EucFixed2Decoder),
    EucMixedShift(EucJpDecoder),
}

macro_rules! dispatch_decoder {
    ($this:expr, $d:ident => $e:expr) => (
        match $this {
            Decoder::SingleByte($d) => $e,
            Decoder::Ebcdic($d) => $e,
            Decoder::EucFixed2($d) => $e,
            Decoder::EucMixedShift($d) => $e,
        }
    )
}

impl RawDecoder for Decoder {
    fn decode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
            where S: Source<Unit = u8>, D: Sink<Unit = u16> {
        dispatch_decoder!(self, d => d.decode(src, dst))
    }

    fn reset(&mut self) {
        dispatch_decoder!(self, d => d.reset())
    }
}

/// An encoder of any variant.
#[derive(Clone, Debug)]
pub enum Encoder {
    SingleByte(SingleByteEncoder),
    Ebcdic(EbcdicEncoder),
    EucFixed2(EucFixed2Encoder),
    EucMixedShift(EucJpEncoder),
    HangulComposing(HangulEncoder),
}

macro_rules! dispatch_encoder {
    ($this:expr, $e:ident => $body:expr) => (
        match $this {
            Encoder::SingleByte($e) => $body,
            Encoder::Ebcdic($e) => $body,
            Encoder::EucFixed2($e) => $body,
            Encoder::EucMixedShift($e) => $body,
            Encoder::HangulComposing($e) => $body,
        }
    )
}

impl RawEncoder for Encoder {
    fn encode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
            where S: Source<Unit = u16>, D: Sink<Unit = u8> {
        dispatch_encoder!(self, e => e.encode(src, dst))
    }

    fn flush<D: Sink<Unit = u8>>(&mut self, dst: &mut D) -> CoderResult {
        dispatch_encoder!(self, e => e.flush(dst))
    }

    fn reset(&mut self) {
        dispatch_encoder!(self, e => e.reset())
    }

    fn can_encode(&self, unit: u16) -> bool {
        dispatch_encoder!(self, e => e.can_encode(unit))
    }
}
