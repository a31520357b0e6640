//! Integration tests for the fstree binary

use super::test_utils::{nested_project, read, reference_project, run_fstree};
use std::fs;
use tempfile::TempDir;

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// dump, build, then both test modes succeed with exit code 0
#[test]
fn test_dump_build_and_verify() {
    let (temp, root) = reference_project();
    let cwd = temp.path();

    let output = run_fstree(cwd, &["dump", "root", "tree.txt", "--with-content"]);
    assert!(output.status.success(), "dump failed: {}", stderr(&output));
    assert!(read(&cwd.join("tree.txt")).contains("print(1)"));

    let output = run_fstree(cwd, &["build", "tree.txt", "copy"]);
    assert!(output.status.success(), "build failed: {}", stderr(&output));
    assert_eq!(read(&cwd.join("copy").join("src").join("main.py")), "print(1)\n");
    assert_eq!(read(&cwd.join("copy").join("README.md")), "");

    let output = run_fstree(cwd, &["test", "tree.txt", "copy"]);
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(stdout(&output).contains("TEST: all checks passed"));

    let output = run_fstree(
        cwd,
        &["test", "--test-mode", "dump", root.to_str().unwrap(), "tree.txt"],
    );
    assert!(output.status.success(), "{}", stdout(&output));
}

/// Dumping the current directory into itself verifies cleanly on the first try
#[test]
fn test_dump_into_source_then_verify() {
    let (_temp, root) = reference_project();

    let output = run_fstree(&root, &["dump", ".", "tree.txt", "--with-content"]);
    assert!(output.status.success(), "dump failed: {}", stderr(&output));
    let text = read(&root.join("tree.txt"));
    assert!(text.starts_with("root/\n"), "{}", text);
    assert!(text.contains("tree.txt"));

    let output = run_fstree(&root, &["test", "--test-mode", "dump", ".", "tree.txt"]);
    assert!(output.status.success(), "{}", stdout(&output));
}

/// A failed verification exits 1 and names the discrepancy
#[test]
fn test_verify_failure_exits_nonzero() {
    let (temp, _root) = reference_project();
    let cwd = temp.path();

    assert!(run_fstree(cwd, &["dump", "root", "tree.txt"]).status.success());
    fs::write(cwd.join("root").join("late.txt"), "").unwrap();

    let output = run_fstree(cwd, &["test", "--test-mode", "dump", "root", "tree.txt"]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("TEST: found 1 discrepancies"), "{}", text);
    assert!(text.contains("late.txt"));
}

/// A missing dump source is a fatal error on stderr
#[test]
fn test_missing_source_is_fatal() {
    let temp = TempDir::new().unwrap();
    let output = run_fstree(temp.path(), &["dump", "nowhere", "tree.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("fstree:"));
    assert!(!temp.path().join("tree.txt").exists());
}

/// Extra exclusions apply to both dump and dump verification
#[test]
fn test_exclude_flag_applies_to_dump_and_test() {
    let temp = TempDir::new().unwrap();
    let cwd = temp.path();
    let project = cwd.join("proj");
    fs::create_dir(&project).unwrap();
    nested_project(&project);

    let output = run_fstree(cwd, &["--exclude", "app,Gemfile", "dump", "proj", "tree.txt"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = read(&cwd.join("tree.txt"));
    assert!(!text.contains("app/"));
    assert!(!text.contains("Gemfile"));
    assert!(!text.contains(".git"));
    assert!(text.contains("zeta.txt"));

    let output = run_fstree(
        cwd,
        &["--exclude", "app,Gemfile", "test", "--test-mode", "dump", "proj", "tree.txt"],
    );
    assert!(output.status.success(), "{}", stdout(&output));

    let output = run_fstree(cwd, &["test", "--test-mode", "dump", "proj", "tree.txt"]);
    assert_eq!(output.status.code(), Some(1));
}

/// The workspace config file feeds exclusions to the CLI
#[test]
fn test_workspace_config_excludes() {
    let temp = TempDir::new().unwrap();
    let cwd = temp.path();
    let project = cwd.join("proj");
    fs::create_dir(&project).unwrap();
    nested_project(&project);
    fs::write(cwd.join(".fstree.toml"), "[exclude]\nnames = [\"empty\"]\n").unwrap();

    let output = run_fstree(cwd, &["dump", "-d", "proj", "tree.txt"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = read(&cwd.join("tree.txt"));
    assert!(!text.contains("empty/"));
    assert!(text.contains("app/"));
}

/// JSON reports are machine readable
#[test]
fn test_json_report() {
    let temp = TempDir::new().unwrap();
    let cwd = temp.path();
    fs::write(cwd.join("tree.txt"), "r/\n└── gone/\n").unwrap();
    fs::create_dir(cwd.join("target")).unwrap();

    let output = run_fstree(cwd, &["test", "--format", "json", "tree.txt", "target"]);
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["passed"], false);
    assert_eq!(value["report"]["missing_on_disk"][0], "gone/");
}
