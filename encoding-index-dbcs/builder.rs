// This is a part of encoding-dbcs.
//
// Any copyright is dedicated to the Public Domain.
// https://creativecommons.org/publicdomain/zero/1.0/

//! Construction of two-level tables from plain mappings.

use std::collections::HashMap;

use crate::table::TwoLevelTable;

/// Collects `(key, value)` mappings and packs them into a [`TwoLevelTable`].
///
/// Keys are grouped into blocks of `1 << shift` entries.
/// Identical blocks (typically the all-`fill` block) are stored only once in the payload.
///
/// ~~~~
/// use encoding_index_dbcs::{TableBuilder, UNMAPPED_CHAR};
///
/// let mut builder = TableBuilder::new(6, UNMAPPED_CHAR);
/// builder.insert(0xa4a2, 0x3042);
/// let table = builder.build();
/// assert_eq!(table.lookup(0xa4a2), 0x3042);
/// assert_eq!(table.lookup(0xa4a3), UNMAPPED_CHAR);
/// ~~~~
#[derive(Clone)]
pub struct TableBuilder {
    shift: u8,
    fill: u16,
    split: Option<u32>,
    values: Vec<u16>,
}

impl TableBuilder {
    /// Starts an empty table where every key maps to `fill`.
    /// `shift` is clamped to 16.
    pub fn new(shift: u8, fill: u16) -> TableBuilder {
        TableBuilder { shift: shift.min(16), fill, split: None, values: vec![fill; 0x10000] }
    }

    /// Moves payload positions at or beyond `threshold` into `index2a`.
    pub fn split_at(mut self, threshold: u32) -> TableBuilder {
        self.split = Some(threshold);
        self
    }

    pub fn insert(&mut self, key: u16, value: u16) -> &mut TableBuilder {
        self.values[usize::from(key)] = value;
        self
    }

    pub fn extend<I: IntoIterator<Item = (u16, u16)>>(&mut self, mappings: I) -> &mut TableBuilder {
        for (key, value) in mappings {
            self.values[usize::from(key)] = value;
        }
        self
    }

    /// The value currently recorded for `key`.
    pub fn get(&self, key: u16) -> u16 {
        self.values[usize::from(key)]
    }

    pub fn fill(&self) -> u16 {
        self.fill
    }

    pub fn build(&self) -> TwoLevelTable {
        let block_size = 1usize << self.shift;
        let mask2 = (block_size - 1) as u16;

        let mut payload: Vec<u16> = Vec::new();
        let mut seen: HashMap<&[u16], u32> = HashMap::new();
        let index1: Vec<u32> = self.values.chunks(block_size).map(|block| {
            *seen.entry(block).or_insert_with(|| {
                let offset = payload.len() as u32;
                payload.extend_from_slice(block);
                offset
            })
        }).collect();

        let split = match self.split {
            Some(threshold) if (threshold as usize) < payload.len() => threshold,
            _ => payload.len() as u32,
        };
        let index2a = payload.split_off(split as usize);

        log::trace!("packed {} blocks into {}+{} payload entries",
                    index1.len(), payload.len(), index2a.len());
        TwoLevelTable::from_parts(index1, payload, index2a, !mask2, mask2, self.shift, split)
    }
}
