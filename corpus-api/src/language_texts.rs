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

//! Picks out the corpus lines for a handful of languages, eg. to assemble
//! sample text for a font.
//!
//! Android locale qualifiers come in several shapes (`pt`, `pt-rBR`, ...),
//! so only the bare language before the first `-` is compared.
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf}
};

use corpus_common::*;
use corpus_strings::corpus::Corpus;
use tracing::info;

/// The part of a locale before its first `-`, eg. `pt` for `pt-rBR`.
pub fn base_language(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}

/// Returns, for each requested language that has any, the sorted lines
/// seen in that language.
pub fn sentences_by_language(
    corpus: &Corpus,
    languages: &[String]
) -> BTreeMap<String, Vec<String>> {
    let desired: BTreeSet<&str> = languages.iter().map(|l| base_language(l)).collect();
    let mut findings: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (line, source) in corpus {
        let line_languages: BTreeSet<&str> =
            source.langs.iter().map(|l| base_language(l)).collect();
        for language in line_languages.intersection(&desired) {
            findings
                .entry(language.to_string())
                .or_default()
                .push(line.clone());
        }
    }
    for sentences in findings.values_mut() {
        sentences.sort();
    }
    findings
}

/// Writes `sentences-<lang>.txt` per language into `out_dir`, one line per
/// sentence, and returns the paths written.
pub fn write_sentence_files(
    findings: &BTreeMap<String, Vec<String>>,
    out_dir: &Path
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = vec![];
    for (language, sentences) in findings {
        let target_path = out_dir.join(format!("sentences-{language}.txt"));
        fs::write(&target_path, sentences.join("\n"))?;
        info!("Wrote {}", target_path.display());
        written.push(target_path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_corpus() -> Corpus {
        let mut corpus = Corpus::new();
        corpus.add("Settings", "pt-rBR", "Configurações");
        corpus.add("Settings", "pt", "Definições");
        corpus.add("Settings", "fr", "Paramètres");
        corpus.add("Clock", "pt-rPT", "Alarme");
        corpus.add("Clock", "fr", "Alarme");
        corpus.add("Clock", "en", "Alarm");
        corpus
    }

    #[test]
    fn base_language_drops_region() {
        assert_eq!(base_language("pt-rBR"), "pt");
        assert_eq!(base_language("fr"), "fr");
        assert_eq!(base_language("b+sr+Latn"), "b+sr+Latn");
    }

    #[test]
    fn groups_sublocales_under_their_language() {
        let findings =
            sentences_by_language(&sample_corpus(), &["pt-BR".to_string(), "fr".to_string()]);
        assert_eq!(
            findings,
            BTreeMap::from([
                (
                    "fr".to_string(),
                    vec!["Alarme".to_string(), "Paramètres".to_string()]
                ),
                (
                    "pt".to_string(),
                    vec![
                        "Alarme".to_string(),
                        "Configurações".to_string(),
                        "Definições".to_string()
                    ]
                )
            ])
        );
    }

    #[test]
    fn languages_without_lines_are_absent() {
        let findings = sentences_by_language(&sample_corpus(), &["ja".to_string()]);
        assert!(findings.is_empty());
    }

    #[test]
    fn writes_one_file_per_language() {
        let dir = tempfile::tempdir().unwrap();
        let findings = sentences_by_language(&sample_corpus(), &["fr".to_string()]);
        let written = write_sentence_files(&findings, dir.path()).unwrap();

        assert_eq!(written, vec![dir.path().join("sentences-fr.txt")]);
        assert_eq!(
            fs::read_to_string(&written[0]).unwrap(),
            "Alarme\nParamètres"
        );
    }
}
