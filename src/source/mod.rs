//! Data sources a repository can be read from.
//!
//! A [`Source`] exposes just enough to walk a tree: list a directory, read a
//! file, and fetch the root README. The collector never needs to know whether
//! it is talking to the filesystem or to the GitHub API.

use crate::domain::{Entry, FileContent};
use crate::error::Result;

pub mod local;
pub mod remote;

pub use local::LocalSource;
pub use remote::{RemoteSource, RepoSlug};

pub trait Source {
    /// Children of the repository root.
    fn list_root(&self) -> Result<Vec<Entry>>;

    /// Children of a directory entry previously returned by this source.
    fn list_dir(&self, dir: &Entry) -> Result<Vec<Entry>>;

    /// Read a file entry as text. Never fails; failures are folded into the
    /// returned [`FileContent`].
    fn read_file(&self, file: &Entry) -> FileContent;

    /// Text of `README.md` at the root, or [`crate::domain::README_NOT_FOUND`].
    fn fetch_readme(&self) -> String;
}
