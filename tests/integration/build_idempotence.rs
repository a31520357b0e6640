//! Integration tests for repeated builds

use super::test_utils::read;
use fstree::tree::{parse_tree_text, BuildOptions, StructureBuilder};
use std::fs;
use tempfile::TempDir;

const TREE: &str = "site/
├── index.html
├── config/
│   └── app.yaml
└── scripts/
    └── deploy.sh
        >>>
        #!/bin/sh
        echo deploy
        <<<
";

const FILES: [&str; 3] = ["index.html", "config/app.yaml", "scripts/deploy.sh"];

fn snapshot(root: &std::path::Path) -> Vec<String> {
    FILES.iter().map(|rel| read(&root.join(rel))).collect()
}

/// A second build without overwrite changes nothing
#[test]
fn test_second_build_is_noop() {
    let dest = TempDir::new().unwrap();
    let parsed = parse_tree_text(TREE);
    let builder = StructureBuilder::new(dest.path());

    let first = builder.build_parsed(&parsed).unwrap();
    assert_eq!(first.created_files.len(), 3);
    let before = snapshot(dest.path());

    let second = builder.build_parsed(&parsed).unwrap();
    assert!(second.created_dirs.is_empty());
    assert!(second.created_files.is_empty());
    assert!(second.overwritten_files.is_empty());
    assert_eq!(second.skipped_files.len(), 3);
    assert_eq!(before, snapshot(dest.path()));
}

/// Overwrite restores a locally edited file
#[test]
fn test_overwrite_restores_edited_file() {
    let dest = TempDir::new().unwrap();
    let parsed = parse_tree_text(TREE);
    StructureBuilder::new(dest.path())
        .build_parsed(&parsed)
        .unwrap();

    let deploy = dest.path().join("scripts").join("deploy.sh");
    fs::write(&deploy, "changed\n").unwrap();

    let options = BuildOptions {
        overwrite: true,
        ..Default::default()
    };
    let report = StructureBuilder::with_options(dest.path(), options)
        .build_parsed(&parsed)
        .unwrap();
    assert_eq!(read(&deploy), "#!/bin/sh\necho deploy\n");
    assert_eq!(report.overwritten_files.len(), 3);
}
