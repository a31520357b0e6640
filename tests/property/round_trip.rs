//! Property-based tests for dump -> parse round trips on real directories

use fstree::ignore::ExclusionSet;
use fstree::tree::{parse_tree_text, DumpOptions, TreeDumper};
use proptest::prelude::*;
use proptest::test_runner::{Config, TestRunner};
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

/// Directory segments never contain a dot and file names always do, so a
/// generated file path can never collide with a generated directory.
fn file_paths() -> impl Strategy<Value = Vec<(Vec<String>, String)>> {
    prop::collection::vec(
        (
            prop::collection::vec("[a-z][a-z0-9_]{0,5}", 0..4),
            "[a-z][a-z0-9_]{0,5}\\.txt",
        ),
        1..10,
    )
}

fn expected_paths(files: &[(Vec<String>, String)]) -> BTreeSet<String> {
    let mut expected = BTreeSet::new();
    for (dirs, file) in files {
        for i in 1..=dirs.len() {
            expected.insert(format!("{}/", dirs[..i].join("/")));
        }
        let mut segments = dirs.clone();
        segments.push(file.clone());
        expected.insert(segments.join("/"));
    }
    expected
}

/// The paths parsed from a dump are exactly the paths on disk
#[test]
fn test_dump_parse_recovers_paths() {
    let mut runner = TestRunner::new(Config::with_cases(48));

    runner
        .run(&file_paths(), |files| {
            let temp_dir = TempDir::new().unwrap();
            let root = temp_dir.path();
            for (dirs, file) in &files {
                let dir = dirs.iter().fold(root.to_path_buf(), |p, d| p.join(d));
                fs::create_dir_all(&dir).unwrap();
                fs::write(dir.join(file), "").unwrap();
            }

            let options = DumpOptions {
                excludes: ExclusionSet::new(),
                ..Default::default()
            };
            let text = TreeDumper::with_options(root, options)
                .dump_to_string()
                .unwrap();
            let parsed = parse_tree_text(&text);
            let actual: BTreeSet<String> = parsed
                .entries
                .iter()
                .map(|e| e.as_str().to_string())
                .collect();

            prop_assert_eq!(actual, expected_paths(&files));
            prop_assert_eq!(parsed.entries.len(), expected_paths(&files).len());
            Ok(())
        })
        .unwrap();
}

/// Text content survives dump and parse with one trailing newline added
#[test]
fn test_content_round_trip() {
    let mut runner = TestRunner::new(Config::with_cases(48));
    let content = prop::collection::vec("[ a-z0-9#>]{0,10}", 1..6).prop_map(|l| l.join("\n"));

    runner
        .run(&(content, 0usize..3), |(content, nesting)| {
            let body = content.trim_end_matches('\n').to_string();
            prop_assume!(!body.is_empty());

            let temp_dir = TempDir::new().unwrap();
            let mut dir = temp_dir.path().to_path_buf();
            let mut rel = Vec::new();
            for level in 0..nesting {
                let name = format!("d{}", level);
                dir = dir.join(&name);
                rel.push(name);
            }
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("a.txt"), &content).unwrap();
            fs::write(dir.join("b.txt"), "sibling").unwrap();
            rel.push("a.txt".to_string());

            let options = DumpOptions {
                excludes: ExclusionSet::new(),
                include_content: true,
                ..Default::default()
            };
            let text = TreeDumper::with_options(temp_dir.path(), options)
                .dump_to_string()
                .unwrap();
            let parsed = parse_tree_text(&text);

            let expected = format!("{}\n", body);
            prop_assert_eq!(parsed.contents.get(&rel.join("/")), Some(expected.as_str()));
            Ok(())
        })
        .unwrap();
}
