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
    path::{Path, PathBuf},
    sync::OnceLock
};

use regex::Regex;
use tracing::warn;
use walkdir::WalkDir;

pub const STRINGS_FILE_NAME: &str = "strings.xml";
/// Locale of the default `res/values/` directory.
pub const BASE_LOCALE: &str = "en";

/// A strings.xml file and the app and locale it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub app: String,
    /// eg. `fr`, `pt-rBR` or `b+sr+Latn`, exactly as in the directory name
    pub locale: String,
    pub path: PathBuf
}

fn values_qualifier() -> &'static Regex {
    static VALUES_QUALIFIER: OnceLock<Regex> = OnceLock::new();
    VALUES_QUALIFIER
        .get_or_init(|| Regex::new(r".*values-([^/\\]*)").expect("qualifier pattern is valid"))
}

/// Returns the locale for a resource path relative to its app folder, eg.
/// `res/values-fr/strings.xml` is `fr`. The last `values-` wins; paths
/// without one are [BASE_LOCALE].
pub fn locale_for_path(relative_path: &Path) -> String {
    values_qualifier()
        .captures(&relative_path.to_string_lossy())
        .and_then(|captures| captures.get(1))
        .map_or_else(|| BASE_LOCALE.to_string(), |locale| locale.as_str().to_string())
}

/// Lazily finds every strings.xml below `root`, in a stable order.
///
/// Directory entries that can't be read are skipped with a warning.
pub fn locate_strings_files(app: &str, root: &Path) -> impl Iterator<Item = ResourceFile> {
    let app = app.to_string();
    let root = root.to_path_buf();
    WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Ignoring unreadable directory entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_name() == STRINGS_FILE_NAME && entry.path().is_file())
        .map(move |entry| {
            let path = entry.into_path();
            let relative_path = path.strip_prefix(&root).unwrap_or(&path);
            ResourceFile {
                app: app.clone(),
                locale: locale_for_path(relative_path),
                path
            }
        })
}
