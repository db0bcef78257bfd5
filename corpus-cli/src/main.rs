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

use std::{env, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use corpus_api::{
    build_corpus, language_texts, read_corpus, word_lists, write_corpus, BuildSummary, Result
};
use tracing::{info, warn};

use repositories::{app_sources, default_repositories, download_sources, read_repository_list};

pub mod logger;
pub mod repositories;

/// Builds a corpus of UI strings from Android apps' strings.xml files.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Arguments {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Download the app repositories and write the corpus JSON
    Build(BuildArgs),
    /// Write the corpus lines of the given languages to sentences-<lang>.txt
    Langs(LangsArgs),
    /// Write a sorted word list per language to <lang>.txt
    Words(WordsArgs)
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Where app repositories are cloned to
    #[arg(long, default_value = "downloads")]
    downloads: PathBuf,

    /// Corpus JSON file to write
    #[arg(long, default_value = "aosp.json")]
    output: PathBuf,

    /// TOML file of [[repository]] tables to use instead of the AOSP apps
    #[arg(long)]
    repos: Option<PathBuf>,

    /// Don't clone anything, only read existing checkouts
    #[arg(long)]
    offline: bool
}

#[derive(Debug, Args)]
struct LangsArgs {
    /// Corpus JSON file to read
    #[arg(long, default_value = "aosp.json")]
    corpus: PathBuf,

    /// Output directory [default: the system temp directory]
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// ISO 639-1 language codes to extract sentences for. Regions are ignored.
    #[arg(required = true)]
    languages: Vec<String>
}

#[derive(Debug, Args)]
struct WordsArgs {
    /// Corpus JSON file to read
    #[arg(long, default_value = "aosp.json")]
    corpus: PathBuf,

    /// Output directory
    #[arg(long, default_value = "output")]
    out_dir: PathBuf
}

/// Run from anywhere to build, then slice, the corpus.
///
/// ```
/// $ corpus-cli build --downloads ./downloads --output ./aosp.json
/// $ corpus-cli langs --corpus ./aosp.json pt-BR fr
/// Wrote "/tmp/sentences-fr.txt"
/// Wrote "/tmp/sentences-pt.txt"
/// $ corpus-cli words --corpus ./aosp.json --out-dir ./output
/// ```
///
/// `build` clones each app repository once (`git clone --depth 1`) and reuses
/// the checkout afterwards. Use `--offline` to only read what is already in
/// the downloads directory, and `--repos` to read a different list of apps.
fn main() -> Result<()> {
    let args = Arguments::parse();
    logger::init_cli_logger(args.verbose);

    match args.command {
        Command::Build(build) => run_build(build),
        Command::Langs(langs) => run_langs(langs),
        Command::Words(words) => run_words(words)
    }
}

fn run_build(args: BuildArgs) -> Result<()> {
    let repositories = match &args.repos {
        Some(path) => read_repository_list(path)?,
        None => default_repositories()?
    };

    if !args.offline {
        let acquired = download_sources(&repositories, &args.downloads);
        info!(
            "{} repositories cloned, {} already present",
            acquired.cloned, acquired.reused
        );
        if acquired.failed > 0 {
            warn!(
                "{} of {} repositories could not be cloned",
                acquired.failed,
                repositories.len()
            );
        }
    }

    let (corpus, summary) = build_corpus(&app_sources(&repositories, &args.downloads));
    for warning in build_warnings(&summary, repositories.len()) {
        warn!("{warning}");
    }
    write_corpus(&corpus, &args.output)?;
    println!("Wrote {:?}", args.output);
    Ok(())
}

// Anything in the summary that means the corpus is missing some input
fn build_warnings(summary: &BuildSummary, app_count: usize) -> Vec<String> {
    let mut warnings = vec![];
    if summary.apps_missing > 0 {
        warnings.push(format!(
            "{} of {} app folders were missing",
            summary.apps_missing, app_count
        ));
    }
    if summary.files_skipped > 0 {
        warnings.push(format!(
            "{} strings files were skipped as malformed",
            summary.files_skipped
        ));
    }
    warnings
}

fn run_langs(args: LangsArgs) -> Result<()> {
    let corpus = read_corpus(&args.corpus)?;
    let findings = language_texts::sentences_by_language(&corpus, &args.languages);
    let out_dir = args.out_dir.unwrap_or_else(env::temp_dir);
    for path in language_texts::write_sentence_files(&findings, &out_dir)? {
        println!("Wrote {:?}", path);
    }
    Ok(())
}

fn run_words(args: WordsArgs) -> Result<()> {
    let corpus = read_corpus(&args.corpus)?;
    let lang_words = word_lists::words_by_language(&corpus);
    for path in word_lists::write_word_lists(&lang_words, &args.out_dir)? {
        println!("Wrote {:?}", path);
    }
    Ok(())
}
