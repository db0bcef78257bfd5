// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{
    collections::{btree_map, BTreeMap, BTreeSet},
    io::{Read, Write}
};

use corpus_common::*;
use serde::{Deserialize, Serialize};

/// Where a corpus line was seen. Both sets only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub apps: BTreeSet<String>,
    pub langs: BTreeSet<String>
}

/// Every normalized line, each with the apps and locales it came from.
///
/// Lines are kept sorted so that serialising the same corpus always gives
/// the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    lines: BTreeMap<String, Source>
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `app` has `line` in its `locale` resources. Observing the
    /// same thing twice changes nothing.
    pub fn add(&mut self, app: &str, locale: &str, line: &str) {
        let source = self.lines.entry(line.to_string()).or_default();
        source.apps.insert(app.to_string());
        source.langs.insert(locale.to_string());
    }

    pub fn add_lines<I, S>(&mut self, app: &str, locale: &str, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        for line in lines {
            self.add(app, locale, line.as_ref());
        }
    }

    /// Folds another corpus into this one.
    pub fn merge(&mut self, other: Corpus) {
        for (line, other_source) in other.lines {
            let source = self.lines.entry(line).or_default();
            source.apps.extend(other_source.apps);
            source.langs.extend(other_source.langs);
        }
    }

    pub fn get(&self, line: &str) -> Option<&Source> {
        self.lines.get(line)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in sorted order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Source> {
        self.lines.iter()
    }

    /// Writes the corpus as pretty JSON: `{"line": {"apps": [...], "langs": [...]}}`.
    /// Non-ASCII text is written as-is.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read_json<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = (&'a String, &'a Source);
    type IntoIter = btree_map::Iter<'a, String, Source>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
