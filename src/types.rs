// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

/*!
 * Interface to the character encoding.
 *
 * # Raw incremental interface
 *
 * `RawDecoder::decode` and `RawEncoder::encode` constitute the raw incremental interface,
 * the lowest-available API for decoders and encoders.
 * Each call reads from a [`Source`] and writes to a [`Sink`],
 * both of which carry a position that the call advances,
 * and reports how the pass ended with a [`CoderResult`]:
 *
 * - **Underflow**: everything that could be processed has been.
 *   Any units still left in the source form an incomplete sequence
 *   and must be fed again together with more input.
 * - **Overflow**: the sink is full. Drain it and call again with the same source.
 * - **Malformed(n)** / **Unmappable(n)**: the next `n` source units are a problem.
 *   The source position points at the first of them.
 *   The caller may skip them (`Source::advance(n)`) and call again.
 *
 * The input position is only ever advanced past units that were fully processed,
 * and no partial output is written for a unit that could not be processed.
 *
 * ````notrust
 *  processed          problematic   remaining
 * ----------------+-----------------+---------
 *                 ^ position after Malformed(n) / Unmappable(n)
 * ````
 *
 * Encoders additionally have to be flushed with `RawEncoder::flush` at the end of input,
 * which may emit a trailing shift byte or a pending syllable.
 */

use log::{trace, warn};

use crate::error::CodecError;

/// The replacement scalar, U+FFFD.
/// Decode tables store it for unmapped sequences.
pub const REPLACEMENT: u16 = 0xfffd;

/// How a decode, encode or flush pass ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoderResult {
    /// The input is exhausted, apart from an incomplete trailing sequence.
    Underflow,
    /// The output has no room for the next unit.
    Overflow,
    /// The next `n` input units do not form a legal sequence.
    Malformed(usize),
    /// The next `n` input units are legal but have no representation in the target.
    Unmappable(usize),
}

impl CoderResult {
    pub fn is_error(&self) -> bool {
        matches!(*self, CoderResult::Malformed(_) | CoderResult::Unmappable(_))
    }

    /// The number of input units implicated, zero for `Underflow` and `Overflow`.
    pub fn length(&self) -> usize {
        match *self {
            CoderResult::Malformed(n) | CoderResult::Unmappable(n) => n,
            CoderResult::Underflow | CoderResult::Overflow => 0,
        }
    }
}

/// Read side of a conversion.
pub trait Source {
    type Unit: Copy;

    /// Units between the position and the limit.
    fn remaining(&self) -> usize;

    /// The unit `ahead` places past the position, if any.
    fn peek(&self, ahead: usize) -> Option<Self::Unit>;

    /// Moves the position forward by `n`, which must not exceed `remaining()`.
    fn advance(&mut self, n: usize);
}

/// Write side of a conversion.
pub trait Sink {
    type Unit;

    fn remaining(&self) -> usize;

    /// Appends a unit. The caller checks `remaining()` beforehand.
    fn put(&mut self, unit: Self::Unit);
}

/// A direct-indexable source over a caller-owned slice, with a position and a limit.
#[derive(Clone, Debug)]
pub struct SliceSource<'a, T> {
    buf: &'a [T],
    pos: usize,
    limit: usize,
}

impl<'a, T: Copy> SliceSource<'a, T> {
    pub fn new(buf: &'a [T]) -> SliceSource<'a, T> {
        SliceSource { buf, pos: 0, limit: buf.len() }
    }

    /// A source over `buf[pos..limit]`. Out-of-range bounds are clamped.
    pub fn with_bounds(buf: &'a [T], pos: usize, limit: usize) -> SliceSource<'a, T> {
        let limit = limit.min(buf.len());
        SliceSource { buf, pos: pos.min(limit), limit }
    }

    pub fn position(&self) -> usize { self.pos }
    pub fn limit(&self) -> usize { self.limit }

    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.limit);
    }

    /// The units not yet consumed.
    pub fn as_slice(&self) -> &'a [T] {
        &self.buf[self.pos..self.limit]
    }
}

impl<'a, T: Copy> Source for SliceSource<'a, T> {
    type Unit = T;

    #[inline]
    fn remaining(&self) -> usize { self.limit - self.pos }

    #[inline]
    fn peek(&self, ahead: usize) -> Option<T> {
        let i = self.pos + ahead;
        if i < self.limit { Some(self.buf[i]) } else { None }
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.limit);
    }
}

/// A direct-indexable sink over a caller-owned slice, with a position and a limit.
#[derive(Debug)]
pub struct SliceSink<'a, T> {
    buf: &'a mut [T],
    pos: usize,
    limit: usize,
}

impl<'a, T> SliceSink<'a, T> {
    pub fn new(buf: &'a mut [T]) -> SliceSink<'a, T> {
        let limit = buf.len();
        SliceSink { buf, pos: 0, limit }
    }

    /// A sink over `buf[pos..limit]`. Out-of-range bounds are clamped.
    pub fn with_bounds(buf: &'a mut [T], pos: usize, limit: usize) -> SliceSink<'a, T> {
        let limit = limit.min(buf.len());
        SliceSink { buf, pos: pos.min(limit), limit }
    }

    pub fn position(&self) -> usize { self.pos }
    pub fn limit(&self) -> usize { self.limit }

    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.limit);
    }

    /// Everything written before the position.
    pub fn written(&self) -> &[T] {
        &self.buf[..self.pos]
    }
}

impl<'a, T> Sink for SliceSink<'a, T> {
    type Unit = T;

    #[inline]
    fn remaining(&self) -> usize { self.limit - self.pos }

    #[inline]
    fn put(&mut self, unit: T) {
        self.buf[self.pos] = unit;
        self.pos += 1;
    }
}

/// A cursor-only source over any cloneable iterator.
/// Lookahead clones the cursor, so there is no random access to the underlying storage.
#[derive(Clone, Debug)]
pub struct IterSource<I> {
    iter: I,
    consumed: usize,
}

impl<I> IterSource<I> where I: Iterator + Clone + ExactSizeIterator, I::Item: Copy {
    pub fn new(iter: I) -> IterSource<I> {
        IterSource { iter, consumed: 0 }
    }

    /// Units advanced over so far.
    pub fn consumed(&self) -> usize { self.consumed }
}

impl<I> Source for IterSource<I> where I: Iterator + Clone + ExactSizeIterator, I::Item: Copy {
    type Unit = I::Item;

    fn remaining(&self) -> usize { self.iter.len() }

    fn peek(&self, ahead: usize) -> Option<I::Item> {
        self.iter.clone().nth(ahead)
    }

    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            if self.iter.next().is_none() { break; }
            self.consumed += 1;
        }
    }
}

/// An append-only sink with a capacity limit that can be raised.
#[derive(Clone, Debug, Default)]
pub struct VecSink<T> {
    buf: Vec<T>,
    limit: usize,
}

impl<T> VecSink<T> {
    /// A sink accepting at most `limit` units until grown.
    pub fn new(limit: usize) -> VecSink<T> {
        VecSink { buf: Vec::with_capacity(limit), limit }
    }

    /// Makes room for `extra` more units past what is written now.
    pub fn grow(&mut self, extra: usize) {
        self.limit = self.limit.max(self.buf.len()) + extra;
        self.buf.reserve(extra);
    }

    pub fn len(&self) -> usize { self.buf.len() }
    pub fn is_empty(&self) -> bool { self.buf.is_empty() }
    pub fn as_slice(&self) -> &[T] { &self.buf }

    /// Direct access for traps, which may write past the limit.
    pub fn get_mut(&mut self) -> &mut Vec<T> { &mut self.buf }

    pub fn into_inner(self) -> Vec<T> { self.buf }
}

impl<T> Sink for VecSink<T> {
    type Unit = T;

    fn remaining(&self) -> usize { self.limit.saturating_sub(self.buf.len()) }

    fn put(&mut self, unit: T) {
        self.buf.push(unit);
    }
}

/// Decoder converting a byte sequence into UTF-16 code units.
/// This is a lower level interface, and normally `Encoding::decode` should be used instead.
///
/// A decoder instance holds conversion state and must not be driven by two callers at once.
pub trait RawDecoder {
    /// Decodes as much of `src` into `dst` as possible. See the module documentation.
    fn decode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
        where S: Source<Unit = u8>, D: Sink<Unit = u16>;

    /// Returns to the initial state, as if freshly constructed.
    fn reset(&mut self);
}

/// Encoder converting UTF-16 code units into a byte sequence.
/// This is a lower level interface, and normally `Encoding::encode` should be used instead.
///
/// An encoder instance holds conversion state and must not be driven by two callers at once.
pub trait RawEncoder {
    /// Encodes as much of `src` into `dst` as possible. See the module documentation.
    fn encode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
        where S: Source<Unit = u16>, D: Sink<Unit = u8>;

    /// Writes out pending state at the end of input.
    /// `Overflow` can be retried by calling `flush` again with more room.
    fn flush<D: Sink<Unit = u8>>(&mut self, dst: &mut D) -> CoderResult;

    /// Returns to the initial state, as if freshly constructed.
    fn reset(&mut self);

    /// Returns true if the single code unit `unit` can be encoded.
    fn can_encode(&self, unit: u16) -> bool;
}

/// Character encoding.
pub trait Encoding {
    type Decoder: RawDecoder;
    type Encoder: RawEncoder;

    /// Returns the canonical name of given encoding.
    fn name(&self) -> &str;

    /// Creates a new decoder.
    fn new_decoder(&self) -> Self::Decoder;

    /// Creates a new encoder.
    fn new_encoder(&self) -> Self::Encoder;

    /// An easy-to-use interface to `RawDecoder` producing UTF-16.
    /// On the decoder error `trap` is called,
    /// which may write a replacement to continue processing,
    /// or a failure to return the error.
    fn decode_to_utf16(&self, input: &[u8], trap: DecoderTrap) -> Result<Vec<u16>, CodecError> {
        let mut decoder = self.new_decoder();
        let mut src = SliceSource::new(input);
        let mut dst = VecSink::new(input.len());

        loop {
            let result = match decoder.decode(&mut src, &mut dst) {
                CoderResult::Underflow if src.remaining() == 0 => return Ok(dst.into_inner()),
                // truncated sequence at the end of input
                CoderResult::Underflow => CoderResult::Malformed(src.remaining()),
                CoderResult::Overflow => {
                    dst.grow(src.remaining().max(4));
                    continue;
                }
                err => err,
            };

            let offset = src.position();
            let length = result.length();
            if !trap.trap(&input[offset..offset + length], dst.get_mut()) {
                return Err(CodecError::from_result(result, offset));
            }
            trace!("decoder trap {:?} handled {:?} at {}", trap, result, offset);
            src.advance(length);
        }
    }

    /// An easy-to-use interface to `RawDecoder`.
    /// Units that do not form valid UTF-16 are replaced with U+FFFD.
    fn decode(&self, input: &[u8], trap: DecoderTrap) -> Result<String, CodecError> {
        let units = self.decode_to_utf16(input, trap)?;
        Ok(char::decode_utf16(units).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)).collect())
    }

    /// An easy-to-use interface to `RawEncoder` consuming UTF-16.
    /// On the encoder error `trap` is called,
    /// which may write a replacement sequence to continue processing,
    /// or a failure to return the error.
    fn encode_utf16(&self, input: &[u16], trap: EncoderTrap) -> Result<Vec<u8>, CodecError> {
        let mut encoder = self.new_encoder();
        let mut src = SliceSource::new(input);
        let mut dst = VecSink::new(input.len() + 2);

        loop {
            let result = match encoder.encode(&mut src, &mut dst) {
                // a dangling high surrogate
                CoderResult::Underflow if src.remaining() > 0 => CoderResult::Malformed(src.remaining()),
                CoderResult::Underflow => match encoder.flush(&mut dst) {
                    CoderResult::Underflow => return Ok(dst.into_inner()),
                    CoderResult::Overflow => {
                        dst.grow(4);
                        continue;
                    }
                    err => err,
                },
                CoderResult::Overflow => {
                    dst.grow(src.remaining().max(4));
                    continue;
                }
                err => err,
            };

            let offset = src.position();
            let length = result.length().min(src.remaining());
            if !trap.trap(&mut encoder, &input[offset..offset + length], &mut dst) {
                return Err(CodecError::from_result(result, offset));
            }
            trace!("encoder trap {:?} handled {:?} at {}", trap, result, offset);
            src.advance(length);
        }
    }

    /// An easy-to-use interface to `RawEncoder`.
    fn encode(&self, input: &str, trap: EncoderTrap) -> Result<Vec<u8>, CodecError> {
        let units: Vec<u16> = input.encode_utf16().collect();
        self.encode_utf16(&units, trap)
    }
}

/// A type of the bare function in `DecoderTrap` values.
pub type DecoderTrapFunc = fn(input: &[u8], output: &mut Vec<u16>) -> bool;

/// A type of the bare function in `EncoderTrap` values.
pub type EncoderTrapFunc = fn(input: &[u16], output: &mut Vec<u8>) -> bool;

/// Trap, which handles decoder errors.
#[derive(Clone, Copy, Debug)]
pub enum DecoderTrap {
    /// Immediately fails on errors.
    Strict,
    /// Replaces an error with a U+FFFD.
    Replace,
    /// Silently ignores an error, effectively replacing it with an empty sequence.
    Ignore,
    /// Calls given function to handle decoder errors.
    /// The function is given the problematic input and the output,
    /// and should return true only when it is fine to keep going.
    Call(DecoderTrapFunc),
}

impl DecoderTrap {
    /// Handles a decoder error. May write to the output.
    /// Returns true only when it is fine to keep going.
    fn trap(&self, input: &[u8], output: &mut Vec<u16>) -> bool {
        match *self {
            DecoderTrap::Strict     => false,
            DecoderTrap::Replace    => { output.push(REPLACEMENT); true },
            DecoderTrap::Ignore     => true,
            DecoderTrap::Call(func) => func(input, output),
        }
    }
}

/// Trap, which handles encoder errors.
#[derive(Clone, Copy, Debug)]
pub enum EncoderTrap {
    /// Immediately fails on errors.
    Strict,
    /// Replaces an error with `?` in given encoding.
    /// Note that this fails when `?` cannot be represented in given encoding.
    Replace,
    /// Silently ignores an error, effectively replacing it with an empty sequence.
    Ignore,
    /// Replaces an error with XML numeric character references (e.g. `&#1234;`).
    /// The encoder trap fails when NCRs cannot be represented in given encoding.
    NcrEscape,
    /// Calls given function to handle encoder errors.
    /// The function is given the problematic input and the output,
    /// and should return true only when it is fine to keep going.
    Call(EncoderTrapFunc),
}

impl EncoderTrap {
    /// Handles an encoder error. May write to the output.
    /// Returns true only when it is fine to keep going.
    fn trap<E: RawEncoder>(&self, encoder: &mut E, input: &[u16], output: &mut VecSink<u8>) -> bool {
        // goes through the encoder so that shift states stay consistent
        fn reencode<E: RawEncoder>(encoder: &mut E, replacement: &[u16], output: &mut VecSink<u8>,
                                   trapname: &str) -> bool {
            let mut src = SliceSource::new(replacement);
            loop {
                match encoder.encode(&mut src, output) {
                    CoderResult::Underflow if src.remaining() == 0 => return true,
                    CoderResult::Overflow => output.grow(replacement.len() + 4),
                    result => {
                        warn!("{} cannot reencode a replacement string: {:?}", trapname, result);
                        return false;
                    }
                }
            }
        }

        match *self {
            EncoderTrap::Strict     => false,
            EncoderTrap::Replace    => reencode(encoder, &[b'?' as u16], output, "Replace"),
            EncoderTrap::Ignore     => true,
            EncoderTrap::NcrEscape  => {
                let mut escapes = String::new();
                for ch in char::decode_utf16(input.iter().cloned()) {
                    let value = match ch {
                        Ok(ch) => ch as u32,
                        Err(err) => u32::from(err.unpaired_surrogate()),
                    };
                    escapes.push_str(&format!("&#{};", value));
                }
                let escapes: Vec<u16> = escapes.encode_utf16().collect();
                reencode(encoder, &escapes, output, "NcrEscape")
            },
            EncoderTrap::Call(func) => func(input, output.get_mut()),
        }
    }
}
