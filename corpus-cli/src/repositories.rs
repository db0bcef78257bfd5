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

// Which app repositories the corpus is built from, and checking them out.
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command
};

use corpus_api::{AppSource, CorpusError, Result};
use serde::Deserialize;
use tracing::{debug, error, info};

const AOSP_REPOSITORIES: &str = include_str!("../aosp_repositories.toml");

/// A git repository holding one app's sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// Recorded as the app in the corpus, eg. `DeskClock`
    pub name: String,
    pub url: String
}

#[derive(Debug, Deserialize)]
struct RepositoryList {
    #[serde(rename = "repository", default)]
    repositories: Vec<Repository>
}

/// Parses a TOML document made of `[[repository]]` tables with a `name` and a `url`.
pub fn parse_repository_list(toml_source: &str) -> Result<Vec<Repository>> {
    let list: RepositoryList = toml::from_str(toml_source)?;
    if list.repositories.is_empty() {
        return Err(CorpusError::Cli("Repository list is empty".into()));
    }
    Ok(list.repositories)
}

/// The apps under AOSP's platform/packages/apps.
pub fn default_repositories() -> Result<Vec<Repository>> {
    parse_repository_list(AOSP_REPOSITORIES)
}

pub fn read_repository_list(path: &Path) -> Result<Vec<Repository>> {
    parse_repository_list(&fs::read_to_string(path)?)
}

/// Where a repository is checked out: the last segment of its URL. Two
/// repositories ending in the same segment share a folder.
pub fn download_folder(downloads: &Path, repository: &Repository) -> PathBuf {
    let trimmed = repository.url.trim_end_matches('/');
    downloads.join(trimmed.rsplit('/').next().unwrap_or(trimmed))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcquisitionSummary {
    pub reused: usize,
    pub cloned: usize,
    pub failed: usize
}

/// Shallow-clones every repository whose folder doesn't exist yet.
///
/// A failed clone is logged and skipped; whatever was already downloaded
/// stays usable.
pub fn download_sources(repositories: &[Repository], downloads: &Path) -> AcquisitionSummary {
    let mut summary = AcquisitionSummary::default();
    for repository in repositories {
        let folder = download_folder(downloads, repository);
        if folder.exists() {
            debug!("Reusing {}", folder.display());
            summary.reused += 1;
            continue;
        }
        match clone_repository(repository, &folder) {
            Ok(()) => {
                info!("Cloned {} into {}", repository.name, folder.display());
                summary.cloned += 1;
            }
            Err(err) => {
                error!("{err}");
                summary.failed += 1;
            }
        }
    }
    summary
}

fn clone_repository(repository: &Repository, folder: &Path) -> Result<()> {
    if let Some(parent) = folder.parent() {
        fs::create_dir_all(parent)?;
    }
    let output = Command::new("git")
        .args(["clone", "--depth", "1"])
        .arg(&repository.url)
        .arg(folder)
        .output()
        .map_err(|err| CorpusError::RepositoryCloneFailed(repository.name.clone(), err.to_string()))?;
    if !output.status.success() {
        return Err(CorpusError::RepositoryCloneFailed(
            repository.name.clone(),
            String::from_utf8_lossy(&output.stderr).trim().to_string()
        ));
    }
    Ok(())
}

/// Pairs each repository's app name with its download folder.
pub fn app_sources(repositories: &[Repository], downloads: &Path) -> Vec<AppSource> {
    repositories
        .iter()
        .map(|repository| {
            AppSource::new(
                repository.name.clone(),
                download_folder(downloads, repository)
            )
        })
        .collect()
}
