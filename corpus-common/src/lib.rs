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

use std::{fmt, io, path::PathBuf, rc::Rc};

/// Common error type making it easier to share `Result`s between corpus crates.
///
/// In general designed to avoid needing utilities like `map_err`.
#[derive(Debug, Clone)]
pub enum CorpusError {
    /// corpus-cli encountered an error while processing something specific to
    /// the command line implementation. For example, no language codes were
    /// passed to `langs`.
    Cli(String),
    /// Parsing failed while reading a `strings.xml` byte source. See
    /// [xml::reader::Error].
    XmlParsingFailed(xml::reader::Error),
    /// Same as [CorpusError::XmlParsingFailed], but raised by the file-level
    /// API so the offending resource file can be named. The corpus pipeline
    /// skips such files instead of aborting.
    ResourceFileParsingFailed(PathBuf, xml::reader::Error),
    /// `git clone` could not be started, or exited unsuccessfully, for the
    /// named repository.
    RepositoryCloneFailed(String, String),
    /// The repository list was not a valid TOML document of
    /// `[[repository]]` tables.
    RepositoryListParsingFailed(Rc<toml::de::Error>),
    /// A corpus could not be serialised to, or read back from, JSON.
    CorpusJsonFailed(Rc<serde_json::Error>),
    /// An error occurred while reading from or writing to disk.
    FileIoError(Rc<io::Error>)
}

/// Result type where the error is always [CorpusError].
pub type Result<T> = std::result::Result<T, CorpusError>;

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::Cli(message) => write!(f, "{message}"),
            CorpusError::XmlParsingFailed(err) => write!(f, "malformed XML: {err}"),
            CorpusError::ResourceFileParsingFailed(path, err) => {
                write!(f, "malformed XML in {}: {err}", path.display())
            }
            CorpusError::RepositoryCloneFailed(name, detail) => {
                write!(f, "failed to clone {name}: {detail}")
            }
            CorpusError::RepositoryListParsingFailed(err) => {
                write!(f, "invalid repository list: {err}")
            }
            CorpusError::CorpusJsonFailed(err) => write!(f, "corpus JSON error: {err}"),
            CorpusError::FileIoError(err) => write!(f, "I/O error: {err}")
        }
    }
}

impl std::error::Error for CorpusError {}

// Automatic conversion from other types of error to CorpusError makes the rest of the code cleaner
impl From<io::Error> for CorpusError {
    fn from(value: io::Error) -> Self {
        CorpusError::FileIoError(value.into())
    }
}

impl From<xml::reader::Error> for CorpusError {
    fn from(value: xml::reader::Error) -> Self {
        CorpusError::XmlParsingFailed(value)
    }
}

impl From<toml::de::Error> for CorpusError {
    fn from(value: toml::de::Error) -> Self {
        CorpusError::RepositoryListParsingFailed(value.into())
    }
}

impl From<serde_json::Error> for CorpusError {
    fn from(value: serde_json::Error) -> Self {
        CorpusError::CorpusJsonFailed(value.into())
    }
}
