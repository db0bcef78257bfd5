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

// Types that describe a single string-bearing element as it was read from a
// strings.xml file, before any normalisation has happened.

/// Which kind of element a [RawEntry] was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A top-level `<string name="...">`.
    String,
    /// An `<item>`, usually inside `<string-array>` or `<plurals>`.
    Item
}

/// One `<string>` or `<item>` element's content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub kind: EntryKind,
    /// eg. "app_name". Items inside arrays usually have no name.
    pub name: Option<String>,
    pub content: Vec<ContentNode>
}

/// A piece of a [RawEntry]'s content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// Character data, including the text of formatting tags like `<b>`.
    Text(String),
    Placeholder(PlaceholderTag)
}

/// An `<xliff:g>` placeholder, eg.
/// `<xliff:g id="count" example="3">%d</xliff:g>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderTag {
    pub id: Option<String>,
    pub example: Option<String>,
    /// What the placeholder wraps in the resource file, usually a format
    /// specifier such as `%1$s`. Never part of the corpus.
    pub text: String
}

impl PlaceholderTag {
    /// The literal text this placeholder stands for once resolved: its
    /// example if it declares one, otherwise nothing.
    pub fn resolve(&self) -> &str {
        self.example.as_deref().unwrap_or("")
    }
}

impl RawEntry {
    pub fn new(kind: EntryKind, name: Option<String>) -> Self {
        RawEntry {
            kind,
            name,
            content: vec![]
        }
    }

    /// Appends character data, merging it into the previous text run if there is one.
    pub fn push_text(&mut self, text: &str) {
        if let Some(ContentNode::Text(last)) = self.content.last_mut() {
            last.push_str(text);
        } else {
            self.content.push(ContentNode::Text(text.to_string()));
        }
    }

    pub fn push_placeholder(&mut self, placeholder: PlaceholderTag) {
        self.content.push(ContentNode::Placeholder(placeholder));
    }
}
