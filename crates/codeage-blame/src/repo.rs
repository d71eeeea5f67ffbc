//! Running `git` for a single file.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::Result;
use crate::diff::LineNumberMap;
use crate::error::BlameError;
use crate::porcelain::BlameAnnotation;

/// A file inside a `git` work tree.
///
/// Commands run from the file's directory, so `git` finds the enclosing
/// repository the same way it would for a user standing there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    dir: PathBuf,
    file: PathBuf,
}

impl Repository {
    /// Prepare to query `path`.
    ///
    /// Nothing is spawned yet; a path outside any repository fails on the
    /// first query.
    ///
    /// # Errors
    ///
    /// [`BlameError::NotAFile`] if `path` has no file name (`/`, `..`).
    pub fn for_file(path: &Path) -> Result<Self> {
        let file = path
            .file_name()
            .ok_or_else(|| BlameError::NotAFile(path.to_path_buf()))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self {
            dir,
            file: PathBuf::from(file),
        })
    }

    /// Directory `git` runs in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name relative to [`dir`](Self::dir).
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Author dates of every line of the file as of `rev`.
    ///
    /// # Errors
    ///
    /// Any [`BlameError`]: `git` missing, the file not tracked at `rev`, or
    /// unparsable output.
    pub fn annotate(&self, rev: &str) -> Result<BlameAnnotation> {
        let output = self.git("blame", &["blame", "--porcelain", rev])?;
        BlameAnnotation::from_porcelain(&output)
    }

    /// How working-tree lines map onto lines of `rev`.
    ///
    /// # Errors
    ///
    /// Any [`BlameError`]: `git` missing, `rev` unknown, or unparsable output.
    pub fn line_map(&self, rev: &str) -> Result<LineNumberMap> {
        let output = self.git("diff", &["diff", "--no-color", "--no-ext-diff", "-U0", rev])?;
        LineNumberMap::from_unified_diff(&output)
    }

    /// Run `git <args> -- <file>` and capture stdout.
    fn git(&self, command: &'static str, args: &[&str]) -> Result<String> {
        tracing::debug!(
            dir = %self.dir.display(),
            file = %self.file.display(),
            ?args,
            "running git {command}"
        );

        let out = Command::new("git")
            .args(args)
            .arg("--")
            .arg(&self.file)
            .current_dir(&self.dir)
            .output()?;

        if !out.status.success() {
            return Err(BlameError::GitFailed {
                command,
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_owned(),
            });
        }

        String::from_utf8(out.stdout).map_err(|_| BlameError::NotUtf8 { command })
    }
}
