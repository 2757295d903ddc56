//! Filesystem-backed source

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::Source;
use crate::domain::{Entry, FileContent, README_NOT_FOUND};
use crate::error::{CollectError, Result};

pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }

    fn list(&self, relative: &str) -> Result<Vec<Entry>> {
        let dir = self.resolve(relative);
        let list_err = |source| CollectError::ListDir { path: dir.clone(), source };

        let mut entries = Vec::new();
        for item in fs::read_dir(&dir).map_err(list_err)? {
            let item = item.map_err(list_err)?;
            let name = item.file_name().to_string_lossy().into_owned();
            let path =
                if relative.is_empty() { name.clone() } else { format!("{relative}/{name}") };
            // Follows symlinks for the kind; a dangling link is listed as a file and fails on read.
            let is_dir = fs::metadata(item.path()).map(|m| m.is_dir()).unwrap_or(false);
            entries.push(if is_dir { Entry::dir(name, path) } else { Entry::file(name, path) });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(dir = %dir.display(), count = entries.len(), "listed directory");
        Ok(entries)
    }
}

impl Source for LocalSource {
    fn list_root(&self) -> Result<Vec<Entry>> {
        self.list("")
    }

    /// Symlinked directories are listed by their parent but never expanded,
    /// so a link back to an ancestor cannot loop.
    fn list_dir(&self, dir: &Entry) -> Result<Vec<Entry>> {
        let path = self.resolve(&dir.path);
        if fs::symlink_metadata(&path).map(|m| m.file_type().is_symlink()).unwrap_or(false) {
            debug!(dir = %path.display(), "not descending into symlinked directory");
            return Ok(Vec::new());
        }
        self.list(&dir.path)
    }

    fn read_file(&self, file: &Entry) -> FileContent {
        let path = self.resolve(&file.path);
        match fs::read(&path) {
            Ok(bytes) => {
                let content = FileContent::from_bytes(bytes);
                if content == FileContent::Undecodable {
                    debug!(file = %path.display(), "file is not valid UTF-8");
                }
                content
            }
            Err(err) => {
                warn!(file = %path.display(), error = %err, "failed to read file");
                FileContent::Unreadable
            }
        }
    }

    fn fetch_readme(&self) -> String {
        let readme = Entry::file("README.md", "README.md");
        self.read_file(&readme).into_text().unwrap_or_else(|| README_NOT_FOUND.to_string())
    }
}
