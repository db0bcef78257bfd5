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

// Per-language vocabularies: every whitespace-separated word of every line,
// filed under the bare language of each locale the line was seen in.
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf}
};

use corpus_common::*;
use corpus_strings::corpus::Corpus;
use tracing::info;

use crate::language_texts::base_language;

pub fn words_by_language(corpus: &Corpus) -> BTreeMap<String, BTreeSet<String>> {
    let mut lang_words: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (line, source) in corpus {
        let languages: BTreeSet<&str> = source.langs.iter().map(|l| base_language(l)).collect();
        for language in languages {
            lang_words
                .entry(language.to_string())
                .or_default()
                .extend(line.split_whitespace().map(String::from));
        }
    }
    lang_words
}

/// Writes `<lang>.txt` per language into `out_dir`, sorted, one word per line.
pub fn write_word_lists(
    lang_words: &BTreeMap<String, BTreeSet<String>>,
    out_dir: &Path
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = vec![];
    for (language, words) in lang_words {
        let out_file = out_dir.join(format!("{language}.txt"));
        let mut contents = words.iter().cloned().collect::<Vec<_>>().join("\n");
        contents.push('\n');
        fs::write(&out_file, contents)?;
        info!("Wrote {} words to {}", words.len(), out_file.display());
        written.push(out_file);
    }
    Ok(written)
}
