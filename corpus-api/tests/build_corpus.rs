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

use std::{fs, path::Path};

use corpus_api::{build_corpus, read_corpus, write_corpus, AppSource, BuildSummary};
use pretty_assertions::assert_eq;

fn write_strings(root: &Path, values_dir: &str, xml: &str) {
    let dir = root.join("res").join(values_dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("strings.xml"), xml).unwrap();
}

fn fixture_tree(root: &Path) {
    let clock = root.join("DeskClock");
    write_strings(
        &clock,
        "values",
        r#"<?xml version="1.0" encoding="utf-8"?>
<resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2">
    <string name="alarm">Alarm</string>
    <string name="alarms_left">You have <xliff:g id="count" example="3">%d</xliff:g> alarms</string>
    <string name="two_lines">Snooze\nDismiss</string>
    <string name="blank">   </string>
    <string-array name="repeat">
        <item>Every   day</item>
        <item>"  Weekdays  "</item>
    </string-array>
</resources>"#
    );
    write_strings(
        &clock,
        "values-fr",
        r#"<resources>
    <string name="alarm">Alarme</string>
    <plurals name="minutes"><item quantity="one">1 minute</item></plurals>
</resources>"#
    );
    // Broken on purpose, must not stop the rest
    write_strings(&clock, "values-de", "<resources><string name=\"alarm\">Wecker</resources>");

    let settings = root.join("Settings");
    write_strings(
        &settings,
        "values",
        r#"<resources><string name="alarm">Alarm</string><string name="price">50\u00A2</string></resources>"#
    );
    write_strings(
        &settings,
        "values-fr-rCA",
        r#"<resources><string name="minute">1 minute</string></resources>"#
    );
}

fn sources(root: &Path) -> Vec<AppSource> {
    vec![
        AppSource::new("DeskClock", root.join("DeskClock")),
        AppSource::new("Settings", root.join("Settings")),
        AppSource::new("Missing", root.join("Missing"))
    ]
}

#[test]
fn builds_a_corpus_from_app_trees() {
    let dir = tempfile::tempdir().unwrap();
    fixture_tree(dir.path());

    let (corpus, summary) = build_corpus(&sources(dir.path()));

    assert_eq!(
        summary,
        BuildSummary {
            apps_missing: 1,
            files_read: 4,
            files_skipped: 1,
            entries_seen: 11,
            lines_seen: 11
        }
    );
    let lines: Vec<&str> = corpus.iter().map(|(line, _)| line.as_str()).collect();
    assert_eq!(
        lines,
        vec![
            "1 minute",
            "50\u{a2}",
            "Alarm",
            "Alarme",
            "Dismiss",
            "Every day",
            "Snooze",
            "Weekdays",
            "You have 3 alarms"
        ]
    );

    let alarm = corpus.get("Alarm").unwrap();
    assert_eq!(
        alarm.apps.iter().collect::<Vec<_>>(),
        vec!["DeskClock", "Settings"]
    );
    assert_eq!(alarm.langs.iter().collect::<Vec<_>>(), vec!["en"]);

    let minute = corpus.get("1 minute").unwrap();
    assert_eq!(
        minute.langs.iter().collect::<Vec<_>>(),
        vec!["fr", "fr-rCA"]
    );
}

#[test]
fn written_corpus_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    fixture_tree(dir.path());

    let first_path = dir.path().join("first.json");
    let second_path = dir.path().join("second.json");
    write_corpus(&build_corpus(&sources(dir.path())).0, &first_path).unwrap();
    write_corpus(&build_corpus(&sources(dir.path())).0, &second_path).unwrap();

    let first = fs::read(&first_path).unwrap();
    assert_eq!(first, fs::read(&second_path).unwrap());
    assert!(String::from_utf8(first).unwrap().contains("\"50\u{a2}\""));
    assert_eq!(
        read_corpus(&first_path).unwrap(),
        build_corpus(&sources(dir.path())).0
    );
}
