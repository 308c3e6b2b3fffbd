// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

//! Shared fixtures: small but real table assets and a manifest listing them.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use encoding_dbcs::codec::ebcdic::EbcdicTables;
use encoding_dbcs::codec::euc::EucTables;
use encoding_dbcs::codec::japanese::JisTables;
use encoding_index_dbcs::{SingleByteTable, Table, TableAsset, TableBuilder, TwoLevelTable, UNMAPPED_CHAR};
use tempfile::TempDir;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub const EBCDIC_SINGLE: &[(u8, u16)] = &[
    (0x00, 0x0000), (0x25, 0x000a), (0x40, 0x0020), (0x4b, 0x002e), (0x50, 0x0026),
    (0x5e, 0x003b), (0x6f, 0x003f), (0x7b, 0x0023),
    (0x81, 0x0061), (0x82, 0x0062), (0x83, 0x0063),
    (0xc1, 0x0041), (0xc2, 0x0042), (0xc3, 0x0043),
    (0xf0, 0x0030), (0xf1, 0x0031), (0xf2, 0x0032), (0xf3, 0x0033), (0xf4, 0x0034),
    (0xf5, 0x0035), (0xf6, 0x0036), (0xf7, 0x0037), (0xf8, 0x0038), (0xf9, 0x0039),
];

pub const EBCDIC_DOUBLE: &[(u16, u16)] = &[
    (0x4040, 0x3000), (0x42c1, 0xff21), (0x4481, 0x3042), (0x4483, 0x3044),
    (0x45c1, 0x4e00), (0x4b81, 0x65e5), (0x5a41, 0x9ed1),
];

pub const JIS0208: &[(u16, u16)] = &[
    (0x2121, 0x3000), (0x2131, 0xffe3), (0x2422, 0x3042), (0x2424, 0x3044),
    (0x467c, 0x65e5), (0x4b5c, 0x672c), (0x3b7a, 0x5b57),
];

pub const JIS0212: &[(u16, u16)] = &[
    (0x2b21, 0x00e1), (0x4b46, 0x736c), (0x6c38, 0x8c78),
];

pub const KSX1001: &[(u16, u16)] = &[
    (0xa1a1, 0x3000), (0xa2c1, 0x2609), (0xa4a1, 0x3131), (0xa4bf, 0x314f),
    (0xb0a1, 0xac00), (0xb0a2, 0xac01), (0xb1db, 0xae00), (0xc7d1, 0xd55c), (0xc7cf, 0xd558),
];

fn invert(pairs: &[(u16, u16)], builder: &mut TableBuilder) {
    for &(key, ch) in pairs {
        if builder.get(ch) == 0 {
            builder.insert(ch, key);
        }
    }
}

fn decode_table(pairs: &[(u16, u16)]) -> TwoLevelTable {
    let mut builder = TableBuilder::new(6, UNMAPPED_CHAR);
    builder.extend(pairs.iter().cloned());
    builder.build()
}

pub fn ebcdic_tables() -> EbcdicTables {
    let single = SingleByteTable::from_fn(|b| {
        EBCDIC_SINGLE.iter().find(|&&(k, _)| k == b).map_or(UNMAPPED_CHAR, |&(_, ch)| ch)
    });
    let mut encode = TableBuilder::new(6, 0);
    invert(EBCDIC_DOUBLE, &mut encode);
    encode.extend(EBCDIC_SINGLE.iter().map(|&(b, ch)| (ch, u16::from(b))));
    EbcdicTables {
        single: Arc::new(single),
        double: Arc::new(decode_table(EBCDIC_DOUBLE)),
        encode: Arc::new(encode.build()),
    }
}

pub fn jis_tables(pairs: &[(u16, u16)]) -> JisTables {
    let mut encode = TableBuilder::new(6, 0);
    invert(pairs, &mut encode);
    JisTables { decode: Arc::new(decode_table(pairs)), encode: Arc::new(encode.build()) }
}

/// ASCII and C1 in G0. U+2299 encodes to A2C1, which decodes to U+2609.
pub fn ibm970_tables() -> EucTables {
    let g0 = SingleByteTable::from_fn(|b| if b <= 0x9f { u16::from(b) } else { UNMAPPED_CHAR });
    let mut encode = TableBuilder::new(6, 0);
    invert(KSX1001, &mut encode);
    encode.extend((0..=0x9fu16).map(|c| (c, c)));
    encode.insert(0x2299, 0xa2c1);
    EucTables {
        g0: Some(Arc::new(g0)),
        region: (0xa1, 0xfe),
        decode: Arc::new(decode_table(KSX1001)),
        encode: Arc::new(encode.build()),
    }
}

fn write_asset(dir: &Path, file: &str, id: &str, table: Table) {
    fs::write(dir.join(file), TableAsset::new(id, table).to_bytes()).unwrap();
}

pub const MANIFEST: &str = r#"{
    "charsets": [
        { "name": "JIS_X0201", "aliases": ["x0201", "JIS0201"], "kind": "jis0201" },
        { "name": "JIS_X0208", "aliases": ["x0208"], "kind": "jis",
          "decode": "tables/jis0208-dec.dbtb", "encode": "tables/jis0208-enc.dbtb" },
        { "name": "JIS_X0212", "aliases": ["x0212"], "kind": "jis",
          "decode": "tables/jis0212-dec.dbtb", "encode": "tables/jis0212-enc.dbtb" },
        { "name": "EUC-JP", "aliases": ["eucjis", "x-euc-jp"], "historical_name": "EUC_JP",
          "contains": ["JIS_X0201", "JIS_X0208", "JIS_X0212", "x-euc-jp-linux"], "kind": "euc-jp",
          "jis0208": { "decode": "tables/jis0208-dec.dbtb", "encode": "tables/jis0208-enc.dbtb" },
          "jis0212": { "decode": "tables/jis0212-dec.dbtb", "encode": "tables/jis0212-enc.dbtb" } },
        { "name": "x-euc-jp-linux", "aliases": ["euc-jp-linux"], "historical_name": "EUC_JP_LINUX",
          "contains": ["JIS_X0201", "JIS_X0208"], "kind": "euc-jp",
          "jis0208": { "decode": "tables/jis0208-dec.dbtb", "encode": "tables/jis0208-enc.dbtb" } },
        { "name": "IBM930", "aliases": ["cp930", "ibm-930"], "historical_name": "Cp930", "kind": "ebcdic",
          "single": "tables/ibm930-sb.dbtb", "double": "tables/ibm930-db.dbtb",
          "encode": "tables/ibm930-enc.dbtb" },
        { "name": "x-IBM970", "aliases": ["ibm-970", "ibm970"], "historical_name": "IBM970", "kind": "ibm970",
          "g0": "tables/ibm970-g0.dbtb", "decode": "tables/ibm970-dec.dbtb", "encode": "tables/ibm970-enc.dbtb" }
    ]
}"#;

/// Writes every table asset under `tables/` and the manifest next to it.
pub fn write_fixture(dir: &Path) -> PathBuf {
    let tables = dir.join("tables");
    fs::create_dir_all(&tables).unwrap();

    let ebcdic = ebcdic_tables();
    write_asset(&tables, "ibm930-sb.dbtb", "IBM930", Table::SingleByte((*ebcdic.single).clone()));
    write_asset(&tables, "ibm930-db.dbtb", "IBM930", Table::Decode((*ebcdic.double).clone()));
    write_asset(&tables, "ibm930-enc.dbtb", "IBM930", Table::Encode((*ebcdic.encode).clone()));

    for &(name, pairs) in &[("jis0208", JIS0208), ("jis0212", JIS0212)] {
        let jis = jis_tables(pairs);
        write_asset(&tables, &format!("{}-dec.dbtb", name), name, Table::Decode((*jis.decode).clone()));
        write_asset(&tables, &format!("{}-enc.dbtb", name), name, Table::Encode((*jis.encode).clone()));
    }

    let ibm970 = ibm970_tables();
    let g0 = ibm970.g0.as_ref().unwrap();
    write_asset(&tables, "ibm970-g0.dbtb", "x-IBM970", Table::SingleByte((**g0).clone()));
    write_asset(&tables, "ibm970-dec.dbtb", "x-IBM970", Table::Decode((*ibm970.decode).clone()));
    write_asset(&tables, "ibm970-enc.dbtb", "x-IBM970", Table::Encode((*ibm970.encode).clone()));

    let manifest = dir.join("manifest.json");
    fs::write(&manifest, MANIFEST).unwrap();
    manifest
}

/// A temporary directory holding the fixture, with the manifest path.
pub fn fixture() -> (TempDir, PathBuf) {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_fixture(dir.path());
    (dir, manifest)
}
