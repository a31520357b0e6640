//! Integration tests for dump -> parse -> build round trips

use super::test_utils::{nested_project, read};
use fstree::ignore::ExclusionSet;
use fstree::tree::{
    parse_tree_text, DumpOptions, PathEntry, StructureBuilder, TreeDumper, Walker, WalkerConfig,
};
use std::collections::BTreeSet;
use tempfile::TempDir;

fn entry_set(entries: &[PathEntry]) -> BTreeSet<String> {
    entries.iter().map(|e| e.as_str().to_string()).collect()
}

/// Parsing a default dump yields exactly the non-excluded filesystem paths
#[test]
fn test_default_dump_reparses_to_filesystem_listing() {
    let temp_dir = TempDir::new().unwrap();
    nested_project(temp_dir.path());

    let excludes = ExclusionSet::with_defaults();
    let options = DumpOptions {
        excludes: excludes.clone(),
        ..Default::default()
    };
    let text = TreeDumper::with_options(temp_dir.path(), options)
        .dump_to_string()
        .unwrap();
    let parsed = parse_tree_text(&text);

    let config = WalkerConfig {
        excludes,
        ..Default::default()
    };
    let listing = Walker::with_config(temp_dir.path().to_path_buf(), config)
        .walk()
        .unwrap();

    assert_eq!(entry_set(&parsed.entries), entry_set(&listing));
    assert!(!text.contains(".git"));
    assert!(parsed.entries.iter().any(|e| e.as_str() == "empty/"));
}

/// Dumping with content and building elsewhere reproduces every text file
#[test]
fn test_dump_build_reproduces_contents() {
    let source = TempDir::new().unwrap();
    nested_project(source.path());

    let options = DumpOptions {
        excludes: ExclusionSet::with_defaults(),
        include_content: true,
        ..Default::default()
    };
    let text = TreeDumper::with_options(source.path(), options)
        .dump_to_string()
        .unwrap();

    let dest = TempDir::new().unwrap();
    StructureBuilder::new(dest.path())
        .build_parsed(&parse_tree_text(&text))
        .unwrap();

    for rel in [
        "app/models/user.rb",
        "app/views/index.html",
        "app/views/partials/_nav.html",
        "Gemfile",
        "zeta.txt",
    ] {
        assert_eq!(
            read(&dest.path().join(rel)),
            read(&source.path().join(rel)),
            "content mismatch for {}",
            rel
        );
    }
    assert!(dest.path().join("empty").is_dir());
    assert!(!dest.path().join(".git").exists());
}

/// A depth-limited dump lists directories at the limit but not their children
#[test]
fn test_depth_limited_dump_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    nested_project(temp_dir.path());

    let options = DumpOptions {
        excludes: ExclusionSet::with_defaults(),
        max_depth: Some(2),
        ..Default::default()
    };
    let text = TreeDumper::with_options(temp_dir.path(), options)
        .dump_to_string()
        .unwrap();
    let paths = entry_set(&parse_tree_text(&text).entries);

    assert!(paths.contains("app/views/"));
    assert!(paths.contains("app/models/"));
    assert!(!paths.contains("app/views/index.html"));
    assert!(!paths.contains("app/views/partials/"));
}

/// Directories-only dumps carry no files and no content blocks
#[test]
fn test_dirs_only_dump() {
    let temp_dir = TempDir::new().unwrap();
    nested_project(temp_dir.path());

    let options = DumpOptions {
        excludes: ExclusionSet::with_defaults(),
        include_content: true,
        dirs_only: true,
        ..Default::default()
    };
    let text = TreeDumper::with_options(temp_dir.path(), options)
        .dump_to_string()
        .unwrap();
    let parsed = parse_tree_text(&text);

    assert!(parsed.files().next().is_none());
    assert!(parsed.contents.is_empty());
    assert!(!text.contains(">>>"));
    assert_eq!(parsed.directories().count(), 5);
}
