//! Core domain types shared by sources, the collector and the renderer.

use std::fmt;

/// Text used for the README section when no README can be read.
pub const README_NOT_FOUND: &str = "README not found.";

/// Placeholder record bodies for files that are not embedded verbatim.
pub const SKIPPED_BINARY: &str = "Skipped binary file";
pub const SKIPPED_ENCODING: &str = "Skipped due to encoding issue";
pub const READ_ERROR: &str = "Error reading file";

/// Token in the template that is replaced with the repository short name.
pub const REPO_NAME_PLACEHOLDER: &str = "##REPO_NAME##";

/// Kind of a directory listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One child of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// File or directory name (final path segment)
    pub name: String,

    /// Source-native path used to list or read this entry
    /// (relative filesystem path for local sources, API path for remote ones)
    pub path: String,

    pub kind: EntryKind,
}

impl Entry {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { name: name.into(), path: path.into(), kind: EntryKind::File }
    }

    pub fn dir(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { name: name.into(), path: path.into(), kind: EntryKind::Dir }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Outcome of reading one file as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Decoded UTF-8 text, verbatim
    Text(String),
    /// The bytes were read but are not valid UTF-8
    Undecodable,
    /// Any other failure while reading
    Unreadable,
}

impl FileContent {
    /// Classify raw bytes: valid UTF-8 becomes text, anything else is undecodable.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(_) => Self::Undecodable,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Undecodable | Self::Unreadable => None,
        }
    }
}

/// Which kind of source a run reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Local,
    Remote,
}

impl SourceKind {
    /// Parse the answer to the interactive "local/remote" question.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "local" => Some(Self::Local),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

/// Per-run state machine. A run moves strictly forward through these phases
/// and returns to `Idle` once the output file is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    SourceSelected,
    StructureCollected,
    ContentCollected,
    Assembled,
    Written,
}

impl Phase {
    pub fn next(self) -> Self {
        match self {
            Self::Idle => Self::SourceSelected,
            Self::SourceSelected => Self::StructureCollected,
            Self::StructureCollected => Self::ContentCollected,
            Self::ContentCollected => Self::Assembled,
            Self::Assembled => Self::Written,
            Self::Written => Self::Idle,
        }
    }
}

/// The collected sections of one run, before template substitution.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Instructional preamble (remote runs only)
    pub instructions: Option<String>,
    pub readme: String,
    /// Structure section including its header line
    pub structure: String,
    pub contents: String,
}

#[cfg(test)]
mod tests {
    use super::{FileContent, Phase, SourceKind};

    #[test]
    fn file_content_classifies_utf8_and_invalid_bytes() {
        assert_eq!(FileContent::from_bytes(b"hello".to_vec()), FileContent::Text("hello".into()));
        assert_eq!(FileContent::from_bytes(vec![0xff, 0xfe, 0x00]), FileContent::Undecodable);
    }

    #[test]
    fn source_kind_parse_is_case_and_whitespace_insensitive() {
        assert_eq!(SourceKind::parse("  LOCAL \n"), Some(SourceKind::Local));
        assert_eq!(SourceKind::parse("Remote"), Some(SourceKind::Remote));
        assert_eq!(SourceKind::parse("github"), None);
    }

    #[test]
    fn phases_cycle_back_to_idle() {
        let mut phase = Phase::Idle;
        let mut seen = Vec::new();
        loop {
            phase = phase.next();
            seen.push(phase);
            if phase == Phase::Idle {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                Phase::SourceSelected,
                Phase::StructureCollected,
                Phase::ContentCollected,
                Phase::Assembled,
                Phase::Written,
                Phase::Idle,
            ]
        );
    }
}
