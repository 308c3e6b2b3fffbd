// This is a part of encoding-dbcs.
//
// Any copyright is dedicated to the Public Domain.
// https://creativecommons.org/publicdomain/zero/1.0/

//! Versioned binary form of an index table.
//!
//! All integers are big-endian:
//!
//! ~~~~text
//! magic "DBTB" | version:u16 | kind:u8 | id_len:u8 | id
//! two-level:   mask1:u16 | mask2:u16 | shift:u8 | split:u32
//!              | count:u32 | index1:u32* | count:u32 | index2:u16* | count:u32 | index2a:u16*
//! single-byte: 256 * u16
//! ~~~~

use bytes::{Buf, BufMut};

use crate::table::{SingleByteTable, TwoLevelTable};
use crate::TableError;

pub const MAGIC: [u8; 4] = *b"DBTB";
pub const VERSION: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Byte pair to UTF-16 code unit.
    Decode,
    /// UTF-16 code unit to encoded bytes.
    Encode,
    /// Byte to UTF-16 code unit.
    SingleByte,
}

impl TableKind {
    fn tag(self) -> u8 {
        match self {
            TableKind::Decode => 0,
            TableKind::Encode => 1,
            TableKind::SingleByte => 2,
        }
    }

    fn from_tag(tag: u8) -> Result<TableKind, TableError> {
        match tag {
            0 => Ok(TableKind::Decode),
            1 => Ok(TableKind::Encode),
            2 => Ok(TableKind::SingleByte),
            _ => Err(TableError::UnknownKind(tag)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Table {
    Decode(TwoLevelTable),
    Encode(TwoLevelTable),
    SingleByte(SingleByteTable),
}

impl Table {
    pub fn kind(&self) -> TableKind {
        match *self {
            Table::Decode(_) => TableKind::Decode,
            Table::Encode(_) => TableKind::Encode,
            Table::SingleByte(_) => TableKind::SingleByte,
        }
    }
}

/// A table together with the charset id it was generated for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableAsset {
    pub id: String,
    pub table: Table,
}

fn need<B: Buf>(buf: &B, len: usize, what: &'static str) -> Result<(), TableError> {
    if buf.remaining() < len { Err(TableError::Truncated(what)) } else { Ok(()) }
}

fn get_u16s<B: Buf>(buf: &mut B, what: &'static str) -> Result<Vec<u16>, TableError> {
    need(buf, 4, what)?;
    let count = buf.get_u32() as usize;
    need(buf, count.saturating_mul(2), what)?;
    Ok((0..count).map(|_| buf.get_u16()).collect())
}

fn put_u16s<B: BufMut>(buf: &mut B, values: &[u16]) {
    buf.put_u32(values.len() as u32);
    for &v in values {
        buf.put_u16(v);
    }
}

impl TableAsset {
    pub fn new(id: &str, table: Table) -> TableAsset {
        TableAsset { id: id.to_owned(), table }
    }

    pub fn kind(&self) -> TableKind {
        self.table.kind()
    }

    /// Serializes the asset. Ids longer than 255 bytes are truncated at a character boundary.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut id_len = self.id.len().min(255);
        while !self.id.is_char_boundary(id_len) {
            id_len -= 1;
        }

        let mut buf = Vec::new();
        buf.put_slice(&MAGIC);
        buf.put_u16(VERSION);
        buf.put_u8(self.kind().tag());
        buf.put_u8(id_len as u8);
        buf.put_slice(&self.id.as_bytes()[..id_len]);

        match self.table {
            Table::Decode(ref t) | Table::Encode(ref t) => {
                buf.put_u16(t.mask1());
                buf.put_u16(t.mask2());
                buf.put_u8(t.shift());
                buf.put_u32(t.split());
                buf.put_u32(t.index1().len() as u32);
                for &offset in t.index1() {
                    buf.put_u32(offset);
                }
                put_u16s(&mut buf, t.index2());
                put_u16s(&mut buf, t.index2a());
            }
            Table::SingleByte(ref t) => {
                for &ch in t.chars().iter() {
                    buf.put_u16(ch);
                }
            }
        }
        buf
    }

    /// Parses and validates an asset. The whole input must be consumed.
    pub fn from_bytes(mut buf: &[u8]) -> Result<TableAsset, TableError> {
        let size = buf.len();
        need(&buf, 8, "header")?;
        if buf[..4] != MAGIC {
            return Err(TableError::BadMagic);
        }
        buf.advance(4);
        let version = buf.get_u16();
        if version != VERSION {
            return Err(TableError::UnsupportedVersion(version));
        }
        let kind = TableKind::from_tag(buf.get_u8())?;
        let id_len = usize::from(buf.get_u8());
        need(&buf, id_len, "id")?;
        let id = std::str::from_utf8(&buf[..id_len]).map_err(|_| TableError::InvalidId)?.to_owned();
        buf.advance(id_len);

        let table = match kind {
            TableKind::SingleByte => {
                need(&buf, 512, "single-byte table")?;
                let mut chars = [0u16; 256];
                for ch in chars.iter_mut() {
                    *ch = buf.get_u16();
                }
                Table::SingleByte(SingleByteTable::new(chars))
            }
            TableKind::Decode | TableKind::Encode => {
                need(&buf, 13, "table parameters")?;
                let mask1 = buf.get_u16();
                let mask2 = buf.get_u16();
                let shift = buf.get_u8();
                let split = buf.get_u32();
                let count = buf.get_u32() as usize;
                need(&buf, count.saturating_mul(4), "index1")?;
                let index1 = (0..count).map(|_| buf.get_u32()).collect();
                let index2 = get_u16s(&mut buf, "index2")?;
                let index2a = get_u16s(&mut buf, "index2a")?;
                let table = TwoLevelTable::new(index1, index2, index2a, mask1, mask2, shift, split)?;
                if kind == TableKind::Decode { Table::Decode(table) } else { Table::Encode(table) }
            }
        };

        if buf.has_remaining() {
            return Err(TableError::TrailingBytes(buf.remaining()));
        }
        log::debug!("loaded {:?} table asset {:?} ({} bytes)", kind, id, size);
        Ok(TableAsset { id, table })
    }
}
