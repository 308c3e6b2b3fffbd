// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

/*!
 * Charset manifests.
 *
 * A manifest is a JSON document listing charsets and the binary table assets they run on:
 *
 * ````notrust
 * {
 *   "charsets": [
 *     { "name": "IBM930", "aliases": ["cp930"], "kind": "ebcdic",
 *       "single": "ibm930-sb.dbtb", "double": "ibm930-db.dbtb", "encode": "ibm930-enc.dbtb" },
 *     { "name": "EUC-JP", "historical_name": "EUC_JP", "contains": ["JIS_X0201"], "kind": "euc-jp",
 *       "jis0208": { "decode": "jis0208-dec.dbtb", "encode": "jis0208-enc.dbtb" },
 *       "jis0212": { "decode": "jis0212-dec.dbtb", "encode": "jis0212-enc.dbtb" } }
 *   ]
 * }
 * ````
 *
 * Asset paths are relative to the manifest. An asset named by several charsets is read once.
 */

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use encoding_index_dbcs::{SingleByteTable, Table, TableAsset, TableKind, TwoLevelTable};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::charset::Charset;
use crate::codec::ebcdic::EbcdicTables;
use crate::codec::euc::EucTables;
use crate::codec::japanese::JisTables;
use crate::error::ConfigError;
use crate::label::{CharsetEntry, Registry};

/// The G1 region of IBM970.
const KS_X_1001_REGION: (u8, u8) = (0xa1, 0xfe);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub charsets: Vec<CharsetSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharsetSpec {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_name: Option<String>,
    #[serde(default)]
    pub contains: Vec<String>,
    #[serde(flatten)]
    pub kind: KindSpec,
}

/// Decode and encode assets of one JIS set, both keyed in 7-bit form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JisSpec {
    pub decode: PathBuf,
    pub encode: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum KindSpec {
    SingleByte { decode: PathBuf, encode: PathBuf },
    /// The built-in JIS X 0201 under the given name.
    Jis0201,
    Ebcdic { single: PathBuf, double: PathBuf, encode: PathBuf },
    EucFixed2 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        g0: Option<PathBuf>,
        region: [u8; 2],
        decode: PathBuf,
        encode: PathBuf,
    },
    /// A standalone 7-bit JIS X 0208 or JIS X 0212.
    Jis(JisSpec),
    EucJp {
        jis0208: JisSpec,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        jis0212: Option<JisSpec>,
    },
    Ibm970 { g0: PathBuf, decode: PathBuf, encode: PathBuf },
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Manifest, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads every charset, resolving asset paths against `base`.
    pub fn build(&self, base: &Path) -> Result<Registry, ConfigError> {
        let mut assets = AssetCache::new(base);
        let mut registry = Registry::new();

        for spec in &self.charsets {
            let charset = assets.charset(&spec.name, &spec.kind)?;
            let mut entry = CharsetEntry::new(charset);
            for alias in &spec.aliases {
                entry = entry.alias(alias.clone());
            }
            if let Some(ref historical) = spec.historical_name {
                entry = entry.historical_name(historical.clone());
            }
            for label in &spec.contains {
                entry = entry.contains(label.clone());
            }
            registry.register(entry)?;
        }

        for spec in &self.charsets {
            if let Some(label) = spec.contains.iter().find(|label| registry.lookup(label).is_err()) {
                return Err(ConfigError::UnknownContains { charset: spec.name.clone(), label: label.clone() });
            }
        }

        debug!("loaded {} charsets from {} table assets", registry.len(), assets.len());
        Ok(registry)
    }
}

/// Reads a manifest file and loads the charsets it lists.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Registry, ConfigError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
    debug!("loading charset manifest {}", path.display());
    let manifest = Manifest::from_json(&json)?;
    manifest.build(path.parent().unwrap_or_else(|| Path::new("")))
}

#[derive(Clone, Debug)]
enum Loaded {
    TwoLevel(TableKind, Arc<TwoLevelTable>),
    SingleByte(Arc<SingleByteTable>),
}

impl Loaded {
    fn kind(&self) -> TableKind {
        match *self {
            Loaded::TwoLevel(kind, _) => kind,
            Loaded::SingleByte(_) => TableKind::SingleByte,
        }
    }
}

struct AssetCache {
    base: PathBuf,
    loaded: HashMap<PathBuf, Loaded>,
}

impl AssetCache {
    fn new(base: &Path) -> AssetCache {
        AssetCache { base: base.to_owned(), loaded: HashMap::new() }
    }

    fn len(&self) -> usize { self.loaded.len() }

    fn load(&mut self, path: &Path) -> Result<&Loaded, ConfigError> {
        if !self.loaded.contains_key(path) {
            let bytes = fs::read(path).map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
            let asset = TableAsset::from_bytes(&bytes)
                .map_err(|source| ConfigError::Table { path: path.to_owned(), source })?;
            let loaded = match asset.table {
                Table::Decode(table) => Loaded::TwoLevel(TableKind::Decode, Arc::new(table)),
                Table::Encode(table) => Loaded::TwoLevel(TableKind::Encode, Arc::new(table)),
                Table::SingleByte(table) => Loaded::SingleByte(Arc::new(table)),
            };
            self.loaded.insert(path.to_owned(), loaded);
        }
        Ok(&self.loaded[path])
    }

    fn two_level(&mut self, relative: &Path, expected: TableKind) -> Result<Arc<TwoLevelTable>, ConfigError> {
        let path = self.base.join(relative);
        match *self.load(&path)? {
            Loaded::TwoLevel(kind, ref table) if kind == expected => Ok(table.clone()),
            ref other => Err(ConfigError::KindMismatch { path, expected, found: other.kind() }),
        }
    }

    fn decode(&mut self, relative: &Path) -> Result<Arc<TwoLevelTable>, ConfigError> {
        self.two_level(relative, TableKind::Decode)
    }

    fn encode(&mut self, relative: &Path) -> Result<Arc<TwoLevelTable>, ConfigError> {
        self.two_level(relative, TableKind::Encode)
    }

    fn single_byte(&mut self, relative: &Path) -> Result<Arc<SingleByteTable>, ConfigError> {
        let path = self.base.join(relative);
        match *self.load(&path)? {
            Loaded::SingleByte(ref table) => Ok(table.clone()),
            ref other => Err(ConfigError::KindMismatch { path, expected: TableKind::SingleByte, found: other.kind() }),
        }
    }

    fn jis(&mut self, spec: &JisSpec) -> Result<JisTables, ConfigError> {
        Ok(JisTables { decode: self.decode(&spec.decode)?, encode: self.encode(&spec.encode)? })
    }

    fn charset(&mut self, name: &str, kind: &KindSpec) -> Result<Charset, ConfigError> {
        let charset = match *kind {
            KindSpec::SingleByte { ref decode, ref encode } =>
                Charset::single_byte(name, self.single_byte(decode)?, self.encode(encode)?),
            KindSpec::Jis0201 => {
                let builtin = Charset::jis_x_0201();
                Charset::new(name, builtin.variant().clone())
            }
            KindSpec::Ebcdic { ref single, ref double, ref encode } => {
                let tables = EbcdicTables {
                    single: self.single_byte(single)?,
                    double: self.decode(double)?,
                    encode: self.encode(encode)?,
                };
                Charset::ebcdic(name, tables)
            }
            KindSpec::EucFixed2 { ref g0, region, ref decode, ref encode } => {
                let g0 = match *g0 {
                    Some(ref g0) => Some(self.single_byte(g0)?),
                    None => None,
                };
                let tables = EucTables {
                    g0,
                    region: (region[0], region[1]),
                    decode: self.decode(decode)?,
                    encode: self.encode(encode)?,
                };
                Charset::euc_fixed2(name, tables)
            }
            KindSpec::Jis(ref spec) => Charset::euc_fixed2(name, self.jis(spec)?.standalone()),
            KindSpec::EucJp { ref jis0208, ref jis0212 } => {
                let jis0208 = self.jis(jis0208)?;
                let charset = match *jis0212 {
                    Some(ref jis0212) => Charset::euc_jp(jis0208, self.jis(jis0212)?),
                    None => Charset::euc_jp_linux(jis0208),
                };
                Charset::new(name, charset.variant().clone())
            }
            KindSpec::Ibm970 { ref g0, ref decode, ref encode } => {
                let tables = EucTables {
                    g0: Some(self.single_byte(g0)?),
                    region: KS_X_1001_REGION,
                    decode: self.decode(decode)?,
                    encode: self.encode(encode)?,
                };
                let charset = Charset::ibm970(tables);
                Charset::new(name, charset.variant().clone())
            }
        };
        Ok(charset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Encoding;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::from_json(r#"{
            "charsets": [
                { "name": "x0201", "kind": "jis0201" },
                { "name": "IBM930", "aliases": ["cp930"], "kind": "ebcdic",
                  "single": "a.dbtb", "double": "b.dbtb", "encode": "c.dbtb" },
                { "name": "EUC-JP", "historical_name": "EUC_JP", "contains": ["x0201"], "kind": "euc-jp",
                  "jis0208": { "decode": "d.dbtb", "encode": "e.dbtb" } },
                { "name": "JIS_X0208", "kind": "jis", "decode": "d.dbtb", "encode": "e.dbtb" },
                { "name": "x-IBM970", "kind": "euc-fixed2", "region": [161, 254],
                  "decode": "f.dbtb", "encode": "g.dbtb" }
            ]
        }"#).unwrap();

        assert_eq!(manifest.charsets.len(), 5);
        assert_eq!(manifest.charsets[0].kind, KindSpec::Jis0201);
        assert_eq!(manifest.charsets[1].aliases, ["cp930"]);
        assert_eq!(manifest.charsets[2].historical_name.as_deref(), Some("EUC_JP"));
        assert_eq!(manifest.charsets[2].kind, KindSpec::EucJp {
            jis0208: JisSpec { decode: "d.dbtb".into(), encode: "e.dbtb".into() },
            jis0212: None,
        });
        assert_eq!(manifest.charsets[3].kind,
                   KindSpec::Jis(JisSpec { decode: "d.dbtb".into(), encode: "e.dbtb".into() }));
        assert!(matches!(manifest.charsets[4].kind, KindSpec::EucFixed2 { g0: None, region: [0xa1, 0xfe], .. }));
    }

    #[test]
    fn test_manifest_survives_serialization() {
        let manifest = Manifest {
            charsets: vec![CharsetSpec {
                name: "JIS_X0201".to_string(),
                aliases: vec!["x0201".to_string()],
                historical_name: None,
                contains: vec![],
                kind: KindSpec::Jis0201,
            }],
        };
        let json = serde_json::to_string(&manifest).unwrap();
        assert_eq!(Manifest::from_json(&json).unwrap(), manifest);
    }

    #[test]
    fn test_bad_manifests() {
        assert!(matches!(Manifest::from_json("{"), Err(ConfigError::Json(_))));
        assert!(matches!(Manifest::from_json(r#"{"charsets": [{"name": "a", "kind": "utf-7"}]}"#),
                         Err(ConfigError::Json(_))));
        assert!(matches!(Manifest::from_json(r#"{"charsets": [{"name": "a", "kind": "ebcdic"}]}"#),
                         Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_builtin_only_manifest() {
        let manifest = Manifest::from_json(r#"{"charsets": [
            { "name": "JIS_X0201", "aliases": ["x0201"], "kind": "jis0201" },
            { "name": "Roman", "contains": ["x0201"], "kind": "jis0201" }
        ]}"#).unwrap();
        let registry = manifest.build(Path::new("")).unwrap();
        assert!(registry.contains("roman", "JIS_X0201").unwrap());
        assert_eq!(registry.lookup("x0201").unwrap().name(), "JIS_X0201");

        let dangling = Manifest::from_json(r#"{"charsets": [
            { "name": "Roman", "contains": ["x0201"], "kind": "jis0201" }
        ]}"#).unwrap();
        assert!(matches!(dangling.build(Path::new("")),
                         Err(ConfigError::UnknownContains { ref label, .. }) if label == "x0201"));

        let twice = Manifest::from_json(r#"{"charsets": [
            { "name": "Roman", "kind": "jis0201" },
            { "name": "ROMAN", "kind": "jis0201" }
        ]}"#).unwrap();
        assert!(matches!(twice.build(Path::new("")), Err(ConfigError::Lookup(_))));
    }

    #[test]
    fn test_missing_asset() {
        let manifest = Manifest::from_json(r#"{"charsets": [
            { "name": "x", "kind": "single-byte", "decode": "missing.dbtb", "encode": "missing.dbtb" }
        ]}"#).unwrap();
        match manifest.build(Path::new("/nonexistent")) {
            Err(ConfigError::Io { path, .. }) => assert_eq!(path, Path::new("/nonexistent/missing.dbtb")),
            other => panic!("unexpected {:?}", other.map(|r| r.len())),
        }
    }
}
