// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

/*!

# Encoding-dbcs

Double-byte legacy character encodings for Rust:
IBM EBCDIC host code pages with SO/SI shifts, the EUC-JP family,
standalone JIS X 0201, 0208 and 0212, and IBM970 with Hangul Jamo composition.

Mapping tables are data, not code.
They are loaded from binary table assets (see `encoding_index_dbcs`),
usually listed in a JSON manifest, or built in memory with `TableBuilder`.

## Simple Usage

To decode and encode through a charset:

~~~~
use encoding_dbcs::{Charset, Encoding, DecoderTrap, EncoderTrap};

let jis0201 = Charset::jis_x_0201();
assert_eq!(jis0201.decode(&[0x41, 0x5c, 0xb1], DecoderTrap::Strict),
           Ok("A\u{a5}\u{ff71}".to_string()));
assert_eq!(jis0201.encode("A\u{ff71}", EncoderTrap::Strict), Ok(vec![0x41, 0xb1]));
~~~~

To handle unrepresentable characters:

~~~~
use encoding_dbcs::{Charset, Encoding, EncoderTrap};

let jis0201 = Charset::jis_x_0201();
assert!(jis0201.encode("caf\u{e9}", EncoderTrap::Strict).is_err());
assert_eq!(jis0201.encode("caf\u{e9}", EncoderTrap::Replace), Ok(b"caf?".to_vec()));
assert_eq!(jis0201.encode("caf\u{e9}", EncoderTrap::Ignore), Ok(b"caf".to_vec()));
assert_eq!(jis0201.encode("caf\u{e9}", EncoderTrap::NcrEscape), Ok(b"caf&#233;".to_vec()));
~~~~

Charsets are usually looked up by label from a `Registry`,
which `config::load` fills from a manifest:

~~~~no_run
use encoding_dbcs::{Encoding, DecoderTrap};

let registry = encoding_dbcs::config::load("charsets/manifest.json").unwrap();
let euc_jp = registry.lookup("euc-jp").unwrap();
println!("{}", euc_jp.decode(&[0xa4, 0xa2], DecoderTrap::Replace).unwrap());
~~~~

## Detailed Usage

**`Encoding`** is a single character encoding, implemented by `Charset`.
Its `encode` and `decode` methods convert whole strings,
handing every error to a **trap** which either fails or writes a replacement.

**`RawDecoder`** and **`RawEncoder`** are the incremental interface underneath.
Each call converts from a `Source` into a `Sink` and reports a `CoderResult`:
`Underflow`, `Overflow`, `Malformed(n)` or `Unmappable(n)`.
The input position never moves past a unit that was not fully converted,
so the caller can always resume or skip exactly the `n` offending units.
See the `types` module for the full contract.

## Supported Encodings

* `SingleByte`: 256-entry tables such as JIS X 0201 (built in).
* `Ebcdic`: IBM host code pages mixing single- and double-byte text with SO (0x0E) and SI (0x0F).
* `EucFixed2`: an optional single-byte G0 and one two-byte G1, as in IBM970 decoding
  and the 7-bit JIS X 0208 and JIS X 0212.
* `EucMixedShift`: EUC-JP, with JIS X 0201 katakana after SS2 (0x8E)
  and JIS X 0212 after SS3 (0x8F), and its Linux flavour without JIS X 0212.
* `HangulComposing`: the IBM970 encoder, which composes conjoining Jamo into syllables.

*/

#![doc(html_root_url = "https://docs.rs/encoding-dbcs/0.1.0")]

pub use encoding_index_dbcs::{SingleByteTable, TableBuilder, TwoLevelTable};

pub use self::charset::{Charset, Decoder, Encoder, Variant};
pub use self::error::{CodecError, LookupError};
#[cfg(feature = "manifest")]
pub use self::error::ConfigError;
pub use self::label::{CharsetEntry, Registry};
pub use self::types::{CoderResult, Encoding, RawDecoder, RawEncoder,
                      DecoderTrap, DecoderTrapFunc, EncoderTrap, EncoderTrapFunc,
                      Source, Sink, SliceSource, SliceSink, IterSource, VecSink}; // reexport

#[cfg(test)] #[macro_use] mod testutils;

mod util;

pub mod types;
pub mod error;
pub mod shift;

/// Codec implementations.
pub mod codec {
    pub mod singlebyte;
    pub mod ebcdic;
    pub mod euc;
    pub mod japanese;
    pub mod korean;
}

pub mod charset;
pub mod label;
#[cfg(feature = "manifest")]
pub mod config;
