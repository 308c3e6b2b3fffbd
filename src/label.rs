// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

//! An interface for retrieving a charset (or its codecs) from a string label.

use std::collections::HashMap;

use log::debug;

use crate::charset::{Charset, Decoder, Encoder};
use crate::error::LookupError;
use crate::types::Encoding;

/// Normalizes a label: surrounding ASCII whitespace is removed and the rest is lowercased.
pub fn normalize(label: &str) -> String {
    label.trim_matches(&[' ', '\n', '\r', '\t', '\x0C'][..]).to_ascii_lowercase()
}

/// A charset together with its registration metadata.
#[derive(Clone, Debug)]
pub struct CharsetEntry {
    charset: Charset,
    aliases: Vec<String>,
    historical_name: Option<String>,
    contains: Vec<String>,
}

impl CharsetEntry {
    pub fn new(charset: Charset) -> CharsetEntry {
        CharsetEntry { charset, aliases: Vec::new(), historical_name: None, contains: Vec::new() }
    }

    pub fn alias<S: Into<String>>(mut self, alias: S) -> CharsetEntry {
        self.aliases.push(alias.into());
        self
    }

    pub fn historical_name<S: Into<String>>(mut self, name: S) -> CharsetEntry {
        self.historical_name = Some(name.into());
        self
    }

    /// Declares that every string representable in `label` is also representable here.
    pub fn contains<S: Into<String>>(mut self, label: S) -> CharsetEntry {
        self.contains.push(label.into());
        self
    }

    pub fn charset(&self) -> &Charset { &self.charset }
    pub fn aliases(&self) -> &[String] { &self.aliases }
    pub fn contained(&self) -> &[String] { &self.contains }

    fn labels(&self) -> impl Iterator<Item = &str> {
        Some(self.charset.name()).into_iter().chain(self.aliases.iter().map(|s| &s[..]))
    }
}

/// Charsets addressable by canonical name or alias.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<CharsetEntry>,
    labels: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// A registry holding the built-in JIS X 0201.
    pub fn with_builtins() -> Registry {
        let mut registry = Registry::new();
        let jis0201 = CharsetEntry::new(Charset::jis_x_0201())
            .alias("JIS0201").alias("JIS_C6220-1969-ro").alias("x0201")
            .historical_name("JIS_X0201");
        if let Err(err) = registry.register(jis0201) {
            debug!("cannot register built-in JIS X 0201: {}", err);
        }
        registry
    }

    /// Registers a charset under its name and aliases.
    /// Nothing is registered when any label is already taken.
    pub fn register(&mut self, entry: CharsetEntry) -> Result<(), LookupError> {
        let labels: Vec<String> = entry.labels().map(normalize).collect();
        for (i, label) in labels.iter().enumerate() {
            if self.labels.contains_key(label) || labels[..i].contains(label) {
                return Err(LookupError::DuplicateLabel(label.clone()));
            }
        }

        debug!("registering charset {} with labels {:?}", entry.charset.name(), labels);
        let index = self.entries.len();
        self.entries.push(entry);
        self.labels.extend(labels.into_iter().map(|label| (label, index)));
        Ok(())
    }

    fn index(&self, label: &str) -> Result<usize, LookupError> {
        self.labels.get(&normalize(label)).cloned()
            .ok_or_else(|| LookupError::UnknownLabel(label.to_string()))
    }

    pub fn entry(&self, label: &str) -> Result<&CharsetEntry, LookupError> {
        Ok(&self.entries[self.index(label)?])
    }

    pub fn lookup(&self, label: &str) -> Result<&Charset, LookupError> {
        Ok(self.entry(label)?.charset())
    }

    pub fn new_decoder(&self, label: &str) -> Result<Decoder, LookupError> {
        Ok(self.lookup(label)?.new_decoder())
    }

    pub fn new_encoder(&self, label: &str) -> Result<Encoder, LookupError> {
        Ok(self.lookup(label)?.new_encoder())
    }

    /// The legacy name of a charset, or its canonical name when it has none.
    pub fn historical_name(&self, label: &str) -> Result<&str, LookupError> {
        let entry = self.entry(label)?;
        Ok(entry.historical_name.as_deref().unwrap_or_else(|| entry.charset.name()))
    }

    /// True when `b` is `a` itself or is declared as contained in `a`.
    pub fn contains(&self, a: &str, b: &str) -> Result<bool, LookupError> {
        let a = self.index(a)?;
        let b = self.index(b)?;
        Ok(a == b || self.entries[a].contains.iter().any(|label| self.index(label).ok() == Some(b)))
    }

    /// Canonical names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.charset.name())
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
