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

// Reads the string-bearing elements out of a res/values*/strings.xml file.
// Every <string> and <item> below the root is reported, wherever it is
// nested, with its text and <xliff:g> placeholders kept in document order.
use std::{
    collections::VecDeque,
    fs::File,
    io::{BufReader, Read},
    path::Path
};

use corpus_common::*;
use xml::{
    attribute::OwnedAttribute,
    name::OwnedName,
    reader::{Events, ParserConfig, XmlEvent}
};

use crate::raw_entry::{EntryKind, PlaceholderTag, RawEntry};

pub const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:1.2";

// An element that is still being read, with the depth it was opened at
struct OpenEntry {
    depth: usize,
    entry: RawEntry,
    placeholder: Option<(usize, PlaceholderTag)>
}

/// Lazy sequence of [RawEntry]s read from one XML byte source.
///
/// Yields at most one error: once the XML turns out to be malformed, the
/// iterator ends.
pub struct StringEntries<T: Read> {
    events: Events<T>,
    depth: usize,
    open: Vec<OpenEntry>,
    ready: VecDeque<RawEntry>,
    finished: bool
}

pub fn parse_strings_xml<T: Read>(byte_source: T) -> StringEntries<T> {
    // ElementTree semantics: CDATA and whitespace-only runs are plain text
    let xml_source = ParserConfig::new()
        .whitespace_to_characters(true)
        .cdata_to_characters(true)
        .ignore_comments(true)
        .create_reader(byte_source);
    StringEntries {
        events: xml_source.into_iter(),
        depth: 0,
        open: vec![],
        ready: VecDeque::new(),
        finished: false
    }
}

/// Reads every entry of the resource file at `path`.
///
/// Unlike [parse_strings_xml] this is all-or-nothing: a malformed file
/// produces [CorpusError::ResourceFileParsingFailed] and no entries.
pub fn read_strings_file(path: &Path) -> Result<Vec<RawEntry>> {
    let file = File::open(path)?;
    parse_strings_xml(BufReader::new(file))
        .collect::<Result<Vec<RawEntry>>>()
        .map_err(|err| match err {
            CorpusError::XmlParsingFailed(xml_err) => {
                CorpusError::ResourceFileParsingFailed(path.to_path_buf(), xml_err)
            }
            other => other
        })
}

fn entry_kind(name: &OwnedName) -> Option<EntryKind> {
    if name.namespace.is_some() {
        return None;
    }
    match &name.local_name[..] {
        "string" => Some(EntryKind::String),
        "item" => Some(EntryKind::Item),
        _ => None
    }
}

fn is_placeholder(name: &OwnedName) -> bool {
    name.local_name == "g" && name.namespace.as_deref() == Some(XLIFF_NAMESPACE)
}

fn plain_attribute(attributes: &[OwnedAttribute], local_name: &str) -> Option<String> {
    attributes
        .iter()
        .find(|attr| attr.name.namespace.is_none() && attr.name.local_name == local_name)
        .map(|attr| attr.value.clone())
}

impl<T: Read> StringEntries<T> {
    fn handle_event(&mut self, event: XmlEvent) {
        match event {
            XmlEvent::StartElement {
                name,
                attributes,
                namespace: _namespace
            } => {
                self.depth += 1;
                if is_placeholder(&name) {
                    for open in self.open.iter_mut() {
                        // A placeholder nested in another one is part of the outer one's text
                        if open.placeholder.is_none() {
                            let placeholder = PlaceholderTag {
                                id: plain_attribute(&attributes, "id"),
                                example: plain_attribute(&attributes, "example"),
                                text: String::new()
                            };
                            open.placeholder = Some((self.depth, placeholder));
                        }
                    }
                }
                // The root element itself is never an entry
                if self.depth > 1 {
                    if let Some(kind) = entry_kind(&name) {
                        self.open.push(OpenEntry {
                            depth: self.depth,
                            entry: RawEntry::new(kind, plain_attribute(&attributes, "name")),
                            placeholder: None
                        });
                    }
                }
            }
            XmlEvent::Characters(text) | XmlEvent::Whitespace(text) | XmlEvent::CData(text) => {
                for open in self.open.iter_mut() {
                    match &mut open.placeholder {
                        Some((_, placeholder)) => placeholder.text.push_str(&text),
                        None => open.entry.push_text(&text)
                    }
                }
            }
            XmlEvent::EndElement { name: _name } => {
                for open in self.open.iter_mut() {
                    if matches!(open.placeholder, Some((depth, _)) if depth == self.depth) {
                        if let Some((_, placeholder)) = open.placeholder.take() {
                            open.entry.push_placeholder(placeholder);
                        }
                    }
                }
                while matches!(self.open.last(), Some(open) if open.depth == self.depth) {
                    if let Some(open) = self.open.pop() {
                        self.ready.push_back(open.entry);
                    }
                }
                self.depth = self.depth.saturating_sub(1);
            }
            // Don't care about declarations, comments or processing instructions
            _ => {}
        }
    }
}

impl<T: Read> Iterator for StringEntries<T> {
    type Item = Result<RawEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.ready.pop_front() {
                return Some(Ok(entry));
            }
            if self.finished {
                return None;
            }
            match self.events.next() {
                Some(Ok(event)) => self.handle_event(event),
                Some(Err(err)) => {
                    self.finished = true;
                    self.open.clear();
                    return Some(Err(err.into()));
                }
                None => self.finished = true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{raw_entry::ContentNode, text_normalizer::normalize_entry};
    use pretty_assertions::assert_eq;

    fn parse(xml: &str) -> Vec<RawEntry> {
        parse_strings_xml(xml.as_bytes())
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn text(s: &str) -> ContentNode {
        ContentNode::Text(s.into())
    }

    #[test]
    fn reads_strings_and_items_in_arrays_and_plurals() {
        let entries = parse(
            r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">Clock</string>
    <string-array name="days">
        <item>Monday</item>
        <item>Tuesday</item>
    </string-array>
    <plurals name="minutes">
        <item quantity="one">1 minute</item>
    </plurals>
    <integer name="not_text">4</integer>
</resources>"#
        );
        let summary: Vec<(EntryKind, Option<&str>, &[ContentNode])> = entries
            .iter()
            .map(|e| (e.kind, e.name.as_deref(), &e.content[..]))
            .collect();
        assert_eq!(
            summary,
            vec![
                (EntryKind::String, Some("app_name"), &[text("Clock")][..]),
                (EntryKind::Item, None, &[text("Monday")][..]),
                (EntryKind::Item, None, &[text("Tuesday")][..]),
                (EntryKind::Item, None, &[text("1 minute")][..])
            ]
        );
    }

    #[test]
    fn keeps_placeholders_in_document_order() {
        let entries = parse(
            r#"<resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2">
<string name="messages">You have <xliff:g id="count" example="3">%d</xliff:g> messages</string>
</resources>"#
        );
        assert_eq!(
            entries[0].content,
            vec![
                text("You have "),
                ContentNode::Placeholder(PlaceholderTag {
                    id: Some("count".into()),
                    example: Some("3".into()),
                    text: "%d".into()
                }),
                text(" messages")
            ]
        );
    }

    #[test]
    fn other_markup_contributes_its_text() {
        let entries = parse(
            r#"<resources><string name="s">Tap <b>OK</b> to <i>continue</i></string></resources>"#
        );
        assert_eq!(entries[0].content, vec![text("Tap OK to continue")]);
    }

    #[test]
    fn whitespace_between_placeholders_is_text() {
        let entries = parse(
            r#"<resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2"><string name="s"><xliff:g example="a">%1$s</xliff:g> <xliff:g example="b">%2$s</xliff:g></string></resources>"#
        );
        assert_eq!(entries[0].content.len(), 3);
        assert_eq!(entries[0].content[1], text(" "));
    }

    #[test]
    fn cdata_and_entities_become_text() {
        let entries = parse(
            r#"<resources><string name="s">Fish &amp; <![CDATA[<chips>]]>&#162;</string></resources>"#
        );
        assert_eq!(entries[0].content, vec![text("Fish & <chips>¢")]);
    }

    #[test]
    fn placeholders_inside_formatting_still_resolve() {
        let entries = parse(
            r#"<resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2"><string name="s">Tap <b><xliff:g id="what" example="X">%s</xliff:g></b> now</string></resources>"#
        );
        assert_eq!(
            entries[0].content,
            vec![
                text("Tap "),
                ContentNode::Placeholder(PlaceholderTag {
                    id: Some("what".into()),
                    example: Some("X".into()),
                    text: "%s".into()
                }),
                text(" now")
            ]
        );
        assert_eq!(normalize_entry(&entries[0]), vec!["Tap X now"]);
    }

    #[test]
    fn placeholder_children_are_replaced_with_it() {
        let entries = parse(
            r#"<resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2"><string name="s">A <xliff:g example="E">%s<b>bold</b> tail</xliff:g> B</string></resources>"#
        );
        assert_eq!(
            entries[0].content[1],
            ContentNode::Placeholder(PlaceholderTag {
                id: None,
                example: Some("E".into()),
                text: "%sbold tail".into()
            })
        );
        assert_eq!(normalize_entry(&entries[0]), vec!["A E B"]);
    }

    #[test]
    fn placeholders_in_another_namespace_are_plain_markup() {
        let entries = parse(
            r#"<resources xmlns:x="urn:example"><string name="s">a <x:g example="no">b</x:g></string></resources>"#
        );
        assert_eq!(entries[0].content, vec![text("a b")]);
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let results: Vec<_> =
            parse_strings_xml("<resources><string>ok</string><string>".as_bytes()).collect();
        assert!(matches!(results.last(), Some(Err(CorpusError::XmlParsingFailed(_)))));
    }

    #[test]
    fn read_strings_file_names_the_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.xml");
        std::fs::write(&path, "<resources><string name=\"a\">x</resources>").unwrap();

        match read_strings_file(&path) {
            Err(CorpusError::ResourceFileParsingFailed(bad_path, _)) => assert_eq!(bad_path, path),
            other => panic!("expected a parsing failure, got {other:?}")
        }
    }
}
