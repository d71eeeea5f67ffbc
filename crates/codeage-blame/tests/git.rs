//! `Repository` against real throwaway repositories.
//!
//! Each test builds its own repository in a temp directory with pinned
//! author and committer dates, so blame output is reproducible.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, SystemTime};

use codeage_blame::{BlameError, Repository};
use codeage_core::{Annotation, LineDate, LineMapping, resolve_line_dates_at};
use pretty_assertions::assert_eq;

const OLD: u64 = 1_600_000_000;
const NEW: u64 = 1_700_000_000;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Run `git` in `dir` with dates pinned to `secs`, failing the test on error.
fn git_at(dir: &Path, secs: u64, args: &[&str]) {
    let date = format!("@{secs} +0000");
    let status = Command::new("git")
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .status()
        .expect("git not found");
    assert!(status.success(), "git {args:?} failed");
}

fn git_init(dir: &Path) {
    git_at(dir, OLD, &["init", "--quiet"]);
}

fn commit_file(dir: &Path, path: &str, contents: &[u8], secs: u64) {
    let file = dir.join(path);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file, contents).unwrap();
    git_at(dir, secs, &["add", path]);
    git_at(dir, secs, &["commit", "--quiet", "-m", path]);
}

fn at(secs: u64) -> LineDate {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

// ── Line map and annotation together ────────────────────────────────────

#[test]
fn maps_working_tree_lines_to_blamed_dates() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    git_init(root);
    commit_file(root, "src/a.txt", b"one\ntwo\nthree\nfour\n", OLD);
    commit_file(root, "src/a.txt", b"one\nTWO\nthree\nfour\n", NEW);

    // Uncommitted: a line inserted on top, the last line rewritten.
    fs::write(root.join("src/a.txt"), "zero\none\nTWO\nthree\nFOUR\n").unwrap();

    let repo = Repository::for_file(&root.join("src/a.txt")).unwrap();
    let mapping = repo.line_map("HEAD").unwrap();
    let annotation = repo.annotate("HEAD").unwrap();

    let mapped: Vec<_> = (0..5).map(|l| mapping.committed_line(l)).collect();
    assert_eq!(mapped, vec![None, Some(0), Some(1), Some(2), None]);

    let blamed: Vec<_> = (0..4).map(|l| annotation.line_date(l)).collect();
    assert_eq!(
        blamed,
        vec![Some(at(OLD)), Some(at(NEW)), Some(at(OLD)), Some(at(OLD))]
    );

    let now = at(NEW + 1);
    assert_eq!(
        resolve_line_dates_at(now, 5, &mapping, &annotation),
        vec![now, at(OLD), at(NEW), at(OLD), now]
    );
}

#[test]
fn clean_file_maps_to_itself() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    git_init(root);
    commit_file(root, "a.txt", b"x\ny\n", OLD);

    let repo = Repository::for_file(&root.join("a.txt")).unwrap();
    assert!(repo.line_map("HEAD").unwrap().hunks().is_empty());
    assert_eq!(repo.annotate("HEAD").unwrap().len(), 2);
}

#[test]
fn older_revision_is_blamed_as_of_that_revision() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    git_init(root);
    commit_file(root, "a.txt", b"one\n", OLD);
    commit_file(root, "a.txt", b"one\ntwo\n", NEW);

    let repo = Repository::for_file(&root.join("a.txt")).unwrap();
    let annotation = repo.annotate("HEAD~1").unwrap();
    assert_eq!(annotation.len(), 1);
    assert_eq!(annotation.line_date(0), Some(at(OLD)));

    // Line 1 did not exist at HEAD~1.
    let mapping = repo.line_map("HEAD~1").unwrap();
    assert_eq!(mapping.committed_line(0), Some(0));
    assert_eq!(mapping.committed_line(1), None);
}

// ── Failures ────────────────────────────────────────────────────────────

#[test]
fn unknown_revision_is_git_failure() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    git_init(root);
    commit_file(root, "a.txt", b"x\n", OLD);

    let repo = Repository::for_file(&root.join("a.txt")).unwrap();
    match repo.annotate("no-such-revision").unwrap_err() {
        BlameError::GitFailed {
            command, stderr, ..
        } => {
            assert_eq!(command, "blame");
            assert!(stderr.contains("no-such-revision"), "stderr: {stderr}");
        }
        other => panic!("expected GitFailed, got {other:?}"),
    }
    assert!(matches!(
        repo.line_map("no-such-revision"),
        Err(BlameError::GitFailed { command: "diff", .. })
    ));
}

#[test]
fn untracked_file_is_git_failure() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    git_init(root);
    commit_file(root, "tracked.txt", b"x\n", OLD);
    fs::write(root.join("untracked.txt"), "y\n").unwrap();

    let repo = Repository::for_file(&root.join("untracked.txt")).unwrap();
    let err = repo.annotate("HEAD").unwrap_err();
    assert!(
        matches!(err, BlameError::GitFailed { command: "blame", .. }),
        "got {err:?}"
    );
}

#[test]
fn repository_without_commits_is_git_failure() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    git_init(root);
    fs::write(root.join("a.txt"), "x\n").unwrap();

    let repo = Repository::for_file(&root.join("a.txt")).unwrap();
    let err = repo.line_map("HEAD").unwrap_err();
    assert!(
        matches!(err, BlameError::GitFailed { command: "diff", .. }),
        "got {err:?}"
    );
}

#[test]
fn non_utf8_blame_output_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    git_init(root);
    commit_file(root, "latin1.txt", b"caf\xe9\n", OLD);

    let repo = Repository::for_file(&root.join("latin1.txt")).unwrap();
    let err = repo.annotate("HEAD").unwrap_err();
    assert!(
        matches!(err, BlameError::NotUtf8 { command: "blame" }),
        "got {err:?}"
    );
}
