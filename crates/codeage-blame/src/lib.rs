//! # codeage-blame — version-control collaborators
//!
//! Supplies the two lookups the line-age pipeline needs, backed by `git`:
//!
//! - **[`porcelain`]** — [`BlameAnnotation`], the per-line author date of
//!   a committed revision, parsed from `git blame --porcelain`.
//! - **[`diff`]** — [`LineNumberMap`], which maps a working-tree line to
//!   its line in that revision, parsed from `git diff -U0` hunk headers.
//! - **[`repo`]** — [`Repository`], which runs `git` for one file and
//!   hands back both.
//!
//! Everything that can go wrong talking to `git` surfaces as a
//! [`BlameError`]; nothing is swallowed, since no line can be dated
//! without the annotation.

pub mod diff;
pub mod error;
pub mod porcelain;
pub mod repo;

pub use diff::{Hunk, LineNumberMap};
pub use error::BlameError;
pub use porcelain::BlameAnnotation;
pub use repo::Repository;

/// A [`Result`](std::result::Result) alias where the `Err` case is [`BlameError`].
pub type Result<T> = std::result::Result<T, BlameError>;
