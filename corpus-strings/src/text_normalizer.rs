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

//! Turns the content of one `<string>`/`<item>` into clean, single lines of
//! text.
//!
//! Resource text goes through five passes, in this order:
//!
//!  1. `<xliff:g>` placeholders are replaced by their `example` (or removed)
//!  2. the content is flattened to one string
//!  3. `"quoted runs"` are unquoted verbatim, whitespace elsewhere collapses
//!  4. backslash escapes are decoded
//!  5. the result is split into trimmed, non-empty lines
//!
//! Reordering these passes changes the result, eg. an escaped quote right
//! next to a real one.
use std::{borrow::Cow, sync::OnceLock};

use phf::phf_map;
use regex::{Captures, Regex};
use tracing::trace;

use crate::raw_entry::{ContentNode, RawEntry};

// Escapes which decode to a single character. `\uXXXX` is handled separately.
static SIMPLE_ESCAPES: phf::Map<char, char> = phf_map! {
    '@' => '@',
    '?' => '?',
    'n' => '\n',
    't' => '\t',
    '\'' => '\'',
    '"' => '"',
};

fn escape_sequence() -> &'static Regex {
    static ESCAPE_SEQUENCE: OnceLock<Regex> = OnceLock::new();
    ESCAPE_SEQUENCE.get_or_init(|| {
        Regex::new(r#"\\([@?nt'"]|u[0-9A-Fa-f]{4})"#).expect("escape pattern is valid")
    })
}

fn whitespace_run() -> &'static Regex {
    static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Normalizes one entry into the lines it contributes to the corpus.
pub fn normalize_entry(entry: &RawEntry) -> Vec<String> {
    normalize_text(&flatten_entry(entry))
}

/// Runs passes 3 to 5 on already flattened text.
pub fn normalize_text(flattened: &str) -> Vec<String> {
    let collapsed = collapse_unquoted_whitespace(flattened);
    let unescaped = decode_escapes(&collapsed);
    split_lines(&unescaped)
}

/// Resolves placeholders and concatenates everything in document order.
pub fn flatten_entry(entry: &RawEntry) -> String {
    let mut flattened = String::new();
    for node in &entry.content {
        match node {
            ContentNode::Text(text) => flattened.push_str(text),
            ContentNode::Placeholder(placeholder) => {
                if placeholder.example.is_none() {
                    trace!(
                        "Dropping placeholder {} ({:?}) without an example",
                        placeholder.id.as_deref().unwrap_or("(no id)"),
                        placeholder.text
                    );
                }
                flattened.push_str(placeholder.resolve())
            }
        }
    }
    flattened
}

fn is_escaped(bytes: &[u8], index: usize) -> bool {
    index > 0 && bytes[index - 1] == b'\\'
}

// Position of the first unescaped quote at or after `from`
fn find_closing_quote(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len()).find(|&i| bytes[i] == b'"' && !is_escaped(bytes, i))
}

/// Splits text into alternating unquoted and quoted parts, starting with an
/// unquoted one (which may be empty). Quoted parts keep their quotes.
///
/// A quoted run opens at an unescaped `"` and closes at the next unescaped
/// `"`. An opening quote that is never closed is left in the unquoted text.
pub fn split_quoted_runs(text: &str) -> Vec<&str> {
    // Quotes and backslashes are ASCII, so byte offsets are char boundaries
    let bytes = text.as_bytes();
    let mut parts = vec![];
    let mut segment_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'"' && !is_escaped(bytes, i) {
            match find_closing_quote(bytes, i + 1) {
                Some(close) => {
                    parts.push(&text[segment_start..i]);
                    parts.push(&text[i..=close]);
                    i = close + 1;
                    segment_start = i;
                    continue;
                }
                // Nothing after this can close a run either
                None => break
            }
        }
        i += 1;
    }
    parts.push(&text[segment_start..]);
    parts
}

// A lone `"` counts as quoted and unquotes to nothing
fn strip_quotes(part: &str) -> Option<&str> {
    if part.starts_with('"') && part.ends_with('"') {
        Some(part.get(1..part.len() - 1).unwrap_or(""))
    } else {
        None
    }
}

/// Pass 3: unquotes quoted runs as-is and collapses each whitespace run
/// outside of them to a single space.
pub fn collapse_unquoted_whitespace(text: &str) -> String {
    split_quoted_runs(text)
        .into_iter()
        .map(|part| match strip_quotes(part) {
            Some(interior) => Cow::Borrowed(interior),
            None => whitespace_run().replace_all(part, " ")
        })
        .collect()
}

/// Pass 4: decodes `\@ \? \n \t \' \"` and `\uXXXX`. Any other backslash is
/// kept as it is, and so is a `\uXXXX` naming a surrogate.
pub fn decode_escapes(text: &str) -> String {
    escape_sequence()
        .replace_all(text, |captures: &Captures| {
            let escape = &captures[1];
            let decoded = match escape.strip_prefix('u') {
                Some(hex) => u32::from_str_radix(hex, 16).ok().and_then(char::from_u32),
                None => escape
                    .chars()
                    .next()
                    .and_then(|c| SIMPLE_ESCAPES.get(&c).copied())
            };
            decoded.map_or_else(|| captures[0].to_string(), String::from)
        })
        .into_owned()
}

/// Pass 5: only continuous lines are useful downstream, so break on
/// newlines and drop whatever is blank.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
