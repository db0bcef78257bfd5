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

//! # Corpus API
//!
//! This crate exposes the main public API for turning checked-out Android
//! app source trees into a corpus of UI strings, and for slicing that corpus
//! by language.
//!
//! ## Building a corpus
//!
//! ```no_run
//! use corpus_api::{build_corpus, write_corpus, AppSource};
//!
//! let sources = vec![AppSource::new("DeskClock", "downloads/DeskClock")];
//! let (corpus, summary) = build_corpus(&sources);
//! println!("{} lines from {} files", corpus.len(), summary.files_read);
//! write_corpus(&corpus, "aosp.json".as_ref())?;
//! # Ok::<(), corpus_api::CorpusError>(())
//! ```
//!
//! ## Slicing by language
//!
//! ```no_run
//! use corpus_api::{read_corpus, language_texts, word_lists};
//!
//! let corpus = read_corpus("aosp.json".as_ref())?;
//! let sentences = language_texts::sentences_by_language(&corpus, &["pt-BR".to_string()]);
//! language_texts::write_sentence_files(&sentences, "/tmp".as_ref())?;
//! let words = word_lists::words_by_language(&corpus);
//! word_lists::write_word_lists(&words, "output".as_ref())?;
//! # Ok::<(), corpus_api::CorpusError>(())
//! ```

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf}
};

use corpus_strings::{
    resource_locator::locate_strings_files, strings_xml_parser::read_strings_file,
    text_normalizer::normalize_entry
};
use tracing::{debug, info, trace, warn};

pub use corpus_common::{CorpusError, Result};
pub use corpus_strings::{
    corpus::{Corpus, Source},
    resource_locator::ResourceFile
};

pub mod language_texts;
pub mod word_lists;

/// One app's checked-out source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSource {
    /// The app identifier recorded in each line's [Source], eg. `DeskClock`.
    pub app: String,
    pub folder: PathBuf
}

impl AppSource {
    pub fn new(app: impl Into<String>, folder: impl Into<PathBuf>) -> Self {
        AppSource {
            app: app.into(),
            folder: folder.into()
        }
    }
}

/// Counts gathered while building a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub apps_missing: usize,
    pub files_read: usize,
    /// Files which were not valid XML and contributed nothing.
    pub files_skipped: usize,
    pub entries_seen: usize,
    pub lines_seen: usize
}

/// Performs all the steps in building a corpus.
///
/// This includes:
///
///  - Finding every `strings.xml` in each app folder and its locale
///  - Reading each `<string>` and `<item>` from it
///  - Normalizing each of those into lines
///  - Merging all lines into one [Corpus]
///
/// Folders that don't exist and files that aren't valid XML are skipped with
/// a warning, so one broken app can't stop the rest from being read.
pub fn build_corpus(sources: &[AppSource]) -> (Corpus, BuildSummary) {
    let mut corpus = Corpus::new();
    let mut summary = BuildSummary::default();
    for source in sources {
        add_app_to_corpus(&mut corpus, &mut summary, source);
    }
    info!(
        "Corpus has {} unique lines from {} files ({} skipped)",
        corpus.len(),
        summary.files_read,
        summary.files_skipped
    );
    (corpus, summary)
}

/// Adds one app's strings to an existing corpus.
pub fn add_app_to_corpus(corpus: &mut Corpus, summary: &mut BuildSummary, source: &AppSource) {
    if !source.folder.is_dir() {
        warn!(
            "Skipping {}: {} is not a directory",
            source.app,
            source.folder.display()
        );
        summary.apps_missing += 1;
        return;
    }

    for file in locate_strings_files(&source.app, &source.folder) {
        let entries = match read_strings_file(&file.path) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Skipping {}: {err}", file.path.display());
                summary.files_skipped += 1;
                continue;
            }
        };
        debug!(
            "{} [{}]: {} entries in {}",
            file.app,
            file.locale,
            entries.len(),
            file.path.display()
        );
        summary.files_read += 1;
        summary.entries_seen += entries.len();
        for entry in &entries {
            let lines = normalize_entry(entry);
            if lines.is_empty() {
                trace!(
                    "{} [{}]: {:?} {} is blank",
                    file.app,
                    file.locale,
                    entry.kind,
                    entry.name.as_deref().unwrap_or("(unnamed)")
                );
            }
            summary.lines_seen += lines.len();
            corpus.add_lines(&file.app, &file.locale, lines);
        }
    }
}

/// Writes the corpus JSON to `path`, replacing anything already there.
pub fn write_corpus(corpus: &Corpus, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    corpus.write_json(&mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_corpus(path: &Path) -> Result<Corpus> {
    Corpus::read_json(BufReader::new(File::open(path)?))
}
