// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

/*!
 * IBM970, an EUC-KR extension whose encoder composes conjoining Hangul Jamo.
 *
 * Decoding is plain `EucFixed2` over KS X 1001.
 * The encoder buffers a run of leading consonant, vowel and trailing consonant Jamo
 * and encodes the precomposed syllable they spell.
 */

use crate::codec::euc::EucTables;
use crate::types::*;
use crate::util::{is_surrogate, parse_surrogate};

const S_BASE: u16 = 0xac00;
const L_BASE: u16 = 0x1100;
const V_BASE: u16 = 0x1161;
const T_BASE: u16 = 0x11a7;
const L_COUNT: u16 = 19;
const V_COUNT: u16 = 21;
const T_COUNT: u16 = 28;

/// Conjoining Jamo classes, in the order they appear within a syllable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum JamoClass {
    Leading,
    Vowel,
    Trailing,
}

impl JamoClass {
    /// Classifies a composable Jamo.
    pub fn of(unit: u16) -> Option<JamoClass> {
        if (L_BASE..L_BASE + L_COUNT).contains(&unit) {
            Some(JamoClass::Leading)
        } else if (V_BASE..V_BASE + V_COUNT).contains(&unit) {
            Some(JamoClass::Vowel)
        } else if (T_BASE + 1..T_BASE + T_COUNT).contains(&unit) {
            Some(JamoClass::Trailing)
        } else {
            None
        }
    }

    fn state(self) -> ComposerState {
        match self {
            JamoClass::Leading => ComposerState::G1,
            JamoClass::Vowel => ComposerState::G2,
            JamoClass::Trailing => ComposerState::G3,
        }
    }
}

/// `G0` has nothing pending; `G1` to `G3` name the class of the last Jamo taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComposerState {
    #[default]
    G0,
    G1,
    G2,
    G3,
}

/// Accumulates Jamo into one syllable.
#[derive(Clone, Debug)]
pub struct HangulComposer {
    state: ComposerState,
    leading: u16,
    vowel: u16,
    trailing: u16,
}

impl Default for HangulComposer {
    fn default() -> HangulComposer {
        HangulComposer::new()
    }
}

impl HangulComposer {
    pub fn new() -> HangulComposer {
        HangulComposer { state: ComposerState::G0, leading: L_BASE, vowel: V_BASE, trailing: T_BASE }
    }

    pub fn state(&self) -> ComposerState { self.state }

    pub fn is_pending(&self) -> bool {
        self.state != ComposerState::G0
    }

    /// True when a Jamo of `class` extends the pending syllable.
    pub fn extends(&self, class: JamoClass) -> bool {
        match self.state {
            ComposerState::G0 => false,
            ComposerState::G1 => class > JamoClass::Leading,
            ComposerState::G2 => class > JamoClass::Vowel,
            ComposerState::G3 => false,
        }
    }

    pub fn push(&mut self, class: JamoClass, unit: u16) {
        match class {
            JamoClass::Leading => self.leading = unit,
            JamoClass::Vowel => self.vowel = unit,
            JamoClass::Trailing => self.trailing = unit,
        }
        self.state = class.state();
    }

    /// The syllable spelled so far, with base values standing in for missing Jamo.
    pub fn syllable(&self) -> Option<u16> {
        if !self.is_pending() {
            return None;
        }
        let l = self.leading - L_BASE;
        let v = self.vowel - V_BASE;
        let t = self.trailing - T_BASE;
        Some(S_BASE + (l * V_COUNT + v) * T_COUNT + t)
    }

    pub fn reset(&mut self) {
        *self = HangulComposer::new();
    }
}

#[derive(Clone, Debug)]
pub struct HangulEncoder {
    tables: EucTables,
    composer: HangulComposer,
}

impl HangulEncoder {
    pub fn new(tables: EucTables) -> HangulEncoder {
        HangulEncoder { tables, composer: HangulComposer::new() }
    }

    pub fn composer(&self) -> &HangulComposer { &self.composer }

    /// Writes the pending syllable. The composer is cleared unless the output is full.
    fn complete<D: Sink<Unit = u8>>(&mut self, dst: &mut D) -> CoderResult {
        let encoded = match self.composer.syllable().and_then(|s| self.tables.map(s)) {
            Some(encoded) => encoded,
            None => {
                self.composer.reset();
                return CoderResult::Unmappable(1);
            }
        };
        if !encoded.write_to(dst) { return CoderResult::Overflow; }
        self.composer.reset();
        CoderResult::Underflow
    }
}

impl RawEncoder for HangulEncoder {
    fn encode<S, D>(&mut self, src: &mut S, dst: &mut D) -> CoderResult
            where S: Source<Unit = u16>, D: Sink<Unit = u8> {
        while let Some(c) = src.peek(0) {
            let class = JamoClass::of(c);

            if self.composer.is_pending() {
                match class {
                    Some(class) if self.composer.extends(class) => {
                        self.composer.push(class, c);
                        src.advance(1);
                    }
                    // `c` is looked at again once the syllable is out
                    _ => match self.complete(dst) {
                        CoderResult::Underflow => {}
                        result => return result,
                    },
                }
                continue;
            }

            if let Some(class) = class {
                self.composer.push(class, c);
                src.advance(1);
                continue;
            }

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

    fn flush<D: Sink<Unit = u8>>(&mut self, dst: &mut D) -> CoderResult {
        if self.composer.is_pending() {
            self.complete(dst)
        } else {
            CoderResult::Underflow
        }
    }

    fn reset(&mut self) {
        self.composer.reset();
    }

    fn can_encode(&self, unit: u16) -> bool {
        match JamoClass::of(unit) {
            Some(class) => {
                let mut composer = HangulComposer::new();
                composer.push(class, unit);
                composer.syllable().and_then(|s| self.tables.map(s)).is_some()
            }
            None => !is_surrogate(unit) && self.tables.map(unit).is_some(),
        }
    }
}
