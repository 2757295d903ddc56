//! Path and repository-name helpers

use std::path::Path;

/// Short repository name: the final segment of a path or URL, ignoring
/// trailing separators and a `.git` suffix.
///
/// `https://github.com/org/repo.git` and `/home/me/repo/` both give `repo`.
pub fn repo_short_name(identifier: &str) -> String {
    let trimmed = identifier.trim().trim_end_matches(['/', '\\']);
    let last = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        "repo".to_string()
    } else {
        name.to_string()
    }
}

/// Short name for a local directory: the last segment as given, so a
/// symlink keeps its own name. Paths ending in `.` or `..` are resolved
/// against the filesystem first.
pub fn local_repo_name(path: &Path) -> String {
    if let Some(name) = path.file_name() {
        return repo_short_name(&name.to_string_lossy());
    }
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    match resolved.file_name() {
        Some(name) => repo_short_name(&name.to_string_lossy()),
        None => repo_short_name(&resolved.to_string_lossy()),
    }
}

/// Join a display path and a child name the way reports render them:
/// `"" + "src"` gives `/src`, `/src + "lib.rs"` gives `/src/lib.rs`.
pub fn display_join(parent: &str, name: &str) -> String {
    format!("{parent}/{name}")
}

/// Output file name for a repository.
pub fn output_file_name(repo_name: &str) -> String {
    format!("{repo_name}_contents.txt")
}
