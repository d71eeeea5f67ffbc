//! Blame errors.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while obtaining annotation data from `git`.
#[derive(Debug, thiserror::Error)]
pub enum BlameError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] io::Error),

    #[error("git {command} exited with {status}: {stderr}")]
    GitFailed {
        command: &'static str,
        status: String,
        stderr: String,
    },

    #[error("git {command} produced non-UTF-8 output")]
    NotUtf8 { command: &'static str },

    #[error("malformed {format} output at line {line}: {reason}")]
    Malformed {
        format: &'static str,
        line: usize,
        reason: String,
    },

    #[error("{0} does not name a file")]
    NotAFile(PathBuf),
}

impl BlameError {
    pub(crate) fn malformed(format: &'static str, line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            format,
            line,
            reason: reason.into(),
        }
    }
}
