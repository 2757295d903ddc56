//! Stack-based directory traversal shared by the structure and content passes.
//!
//! Listings are fetched as soon as a directory is discovered and pushed onto a
//! work stack together with its display path. Popping the stack gives a
//! depth-first order in which the last directory discovered is expanded first;
//! within one listing the source's order is kept.

use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use tracing::debug;

use crate::domain::Entry;
use crate::error::Result;
use crate::source::Source;
use crate::utils::display_join;

/// One node reached during a walk. Paths are display paths (`/src/lib.rs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit<'a> {
    Dir { path: &'a str },
    File { path: &'a str, entry: &'a Entry },
}

/// Walk `source` from its root, calling `visit` for every directory and file.
///
/// Each directory display path is visited at most once, even if it shows up
/// in more than one listing entry. A failure to list a directory aborts the
/// walk.
pub fn walk<S, F>(source: &S, label: &str, show_progress: bool, mut visit: F) -> Result<()>
where
    S: Source + ?Sized,
    F: FnMut(Visit<'_>),
{
    let mut stack: Vec<(String, Vec<Entry>)> = vec![(String::new(), source.list_root()?)];
    let mut visited: HashSet<String> = HashSet::from([String::new()]);

    while let Some((path, listing)) = stack.pop() {
        debug!(dir = %path, entries = listing.len(), "expanding directory");
        let bar = progress_bar(show_progress, label, &path, listing.len());

        for entry in &listing {
            let child_path = display_join(&path, &entry.name);
            if entry.is_dir() {
                if visited.insert(child_path.clone()) {
                    visit(Visit::Dir { path: &child_path });
                    let children = source.list_dir(entry)?;
                    stack.push((child_path, children));
                } else {
                    debug!(dir = %child_path, "skipping already visited directory");
                }
            } else {
                visit(Visit::File { path: &child_path, entry });
            }
            bar.inc(1);
        }

        bar.finish_and_clear();
    }

    Ok(())
}

fn progress_bar(show: bool, label: &str, path: &str, len: usize) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{msg} {bar:30} {pos}/{len}") {
        bar.set_style(style);
    }
    bar.set_message(format!("{label} {path}"));
    bar
}

#[cfg(test)]
mod tests {
    use super::{walk, Visit};
    use crate::domain::{Entry, FileContent};
    use crate::error::Result;
    use crate::source::Source;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory source keyed by directory path ("" is the root).
    struct FakeSource {
        dirs: HashMap<String, Vec<Entry>>,
        listed: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn new(dirs: Vec<(&str, Vec<Entry>)>) -> Self {
            Self {
                dirs: dirs.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
                listed: RefCell::new(Vec::new()),
            }
        }
    }

    impl Source for FakeSource {
        fn list_root(&self) -> Result<Vec<Entry>> {
            self.listed.borrow_mut().push(String::new());
            Ok(self.dirs.get("").cloned().unwrap_or_default())
        }

        fn list_dir(&self, dir: &Entry) -> Result<Vec<Entry>> {
            self.listed.borrow_mut().push(dir.path.clone());
            Ok(self.dirs.get(&dir.path).cloned().unwrap_or_default())
        }

        fn read_file(&self, _file: &Entry) -> FileContent {
            FileContent::Unreadable
        }

        fn fetch_readme(&self) -> String {
            String::new()
        }
    }

    fn record(source: &FakeSource) -> Vec<String> {
        let mut seen = Vec::new();
        walk(source, "Processing", false, |visit| match visit {
            Visit::Dir { path } => seen.push(format!("{path}/")),
            Visit::File { path, .. } => seen.push(path.to_string()),
        })
        .expect("walk");
        seen
    }

    #[test]
    fn last_discovered_directory_is_expanded_first() {
        let source = FakeSource::new(vec![
            ("", vec![Entry::dir("a", "a"), Entry::file("top.txt", "top.txt"), Entry::dir("b", "b")]),
            ("a", vec![Entry::file("a1", "a/a1")]),
            ("b", vec![Entry::dir("c", "b/c"), Entry::file("b1", "b/b1")]),
            ("b/c", vec![Entry::file("c1", "b/c/c1")]),
        ]);

        assert_eq!(
            record(&source),
            vec!["/a/", "/top.txt", "/b/", "/b/c/", "/b/b1", "/b/c/c1", "/a/a1"]
        );
    }

    #[test]
    fn directory_reached_twice_is_expanded_once() {
        let source = FakeSource::new(vec![
            ("", vec![Entry::dir("shared", "shared"), Entry::dir("shared", "shared")]),
            ("shared", vec![Entry::file("x", "shared/x")]),
        ]);

        assert_eq!(record(&source), vec!["/shared/", "/shared/x"]);
        assert_eq!(*source.listed.borrow(), vec!["".to_string(), "shared".to_string()]);
    }

    #[test]
    fn empty_root_visits_nothing() {
        let source = FakeSource::new(vec![]);
        assert!(record(&source).is_empty());
    }
}
