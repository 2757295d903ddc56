//! Repository collection: README, structure listing and file contents.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::{
    FileContent, Phase, Report, SourceKind, READ_ERROR, SKIPPED_BINARY, SKIPPED_ENCODING,
};
use crate::error::Result;
use crate::render;
use crate::source::{LocalSource, RemoteSource, RepoSlug, Source};
use crate::utils::{is_binary_name, local_repo_name, repo_short_name};

pub mod traverse;

pub use traverse::{walk, Visit};

/// Produces the three report sections from a [`Source`].
pub struct Collector<'a, S: Source + ?Sized> {
    source: &'a S,
    show_progress: bool,
}

impl<'a, S: Source + ?Sized> Collector<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source, show_progress: false }
    }

    /// Draw per-directory progress bars on stderr.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn readme(&self) -> String {
        self.source.fetch_readme()
    }

    /// Newline-terminated list of every directory (`/a/`) and file (`/a/b.txt`).
    pub fn structure(&self) -> Result<String> {
        let mut out = String::new();
        walk(self.source, "Processing", self.show_progress, |visit| match visit {
            Visit::Dir { path } => {
                out.push_str(path);
                out.push_str("/\n");
            }
            Visit::File { path, .. } => {
                out.push_str(path);
                out.push('\n');
            }
        })?;
        Ok(out)
    }

    /// `File:`/`Content:` records for every file, in traversal order.
    pub fn contents(&self) -> Result<String> {
        let mut out = String::new();
        walk(self.source, "Downloading", self.show_progress, |visit| {
            if let Visit::File { path, entry } = visit {
                if is_binary_name(&entry.name) {
                    debug!(file = path, "skipping binary file");
                    push_placeholder(&mut out, path, SKIPPED_BINARY);
                    return;
                }
                match self.source.read_file(entry) {
                    FileContent::Text(text) => {
                        out.push_str("File: ");
                        out.push_str(path);
                        out.push_str("\nContent:\n");
                        out.push_str(&text);
                        out.push_str("\n\n");
                    }
                    FileContent::Undecodable => push_placeholder(&mut out, path, SKIPPED_ENCODING),
                    FileContent::Unreadable => push_placeholder(&mut out, path, READ_ERROR),
                }
            }
        })?;
        Ok(out)
    }
}

fn push_placeholder(out: &mut String, path: &str, reason: &str) {
    out.push_str("File: ");
    out.push_str(path);
    out.push_str("\nContent: ");
    out.push_str(reason);
    out.push_str("\n\n");
}

/// What to collect: a local directory or a remote repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Local(PathBuf),
    Remote(String),
}

impl Target {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Local(_) => SourceKind::Local,
            Self::Remote(_) => SourceKind::Remote,
        }
    }

    /// Repository short name used for the output file and the placeholder.
    ///
    /// Remote targets are named after the repository segment of the URL, so
    /// `https://github.com/octo/demo/tree/main` gives `demo`.
    pub fn repo_name(&self) -> String {
        match self {
            Self::Local(path) => local_repo_name(path),
            Self::Remote(url) => {
                RepoSlug::parse(url).map(|slug| slug.repo).unwrap_or_else(|_| repo_short_name(url))
            }
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub repo_name: String,
    pub output_path: PathBuf,
    /// Phase the run finished in; `Idle` after a successful write
    pub phase: Phase,
}

/// Drives one run through its phases, from source selection to the written file.
pub struct Run<'c> {
    config: &'c Config,
    phase: Phase,
    show_progress: bool,
}

impl<'c> Run<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config, phase: Phase::Idle, show_progress: false }
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn advance(&mut self) {
        self.phase = self.phase.next();
        info!(phase = ?self.phase, "run phase");
    }

    /// Collect `target` and write `<repo_name>_contents.txt` to the output directory.
    ///
    /// Nothing is written unless every step succeeds. A remote target without a
    /// token fails before any network request.
    pub fn execute(mut self, target: &Target) -> Result<RunOutcome> {
        let repo_name = target.repo_name();

        let report = match target {
            Target::Local(path) => {
                let source = LocalSource::new(path.clone());
                self.advance();
                println!("Analyzing local repository at: {}", path.display());
                self.collect(&source, SourceKind::Local, &repo_name)?
            }
            Target::Remote(url) => {
                let source = RemoteSource::new(
                    url,
                    self.config.github_token.as_deref(),
                    self.config.remote_options(),
                )?;
                self.advance();
                self.collect(&source, SourceKind::Remote, &repo_name)?
            }
        };

        let template = render::read_template(&self.config.template)?;
        let text = render::apply_template(&template, &render::assemble(&report), &repo_name);
        self.advance();

        let output_path = render::write_output(&self.config.output_dir, &repo_name, &text)?;
        self.advance();
        self.advance();

        Ok(RunOutcome { repo_name, output_path, phase: self.phase })
    }

    fn collect<S: Source + ?Sized>(
        &mut self,
        source: &S,
        kind: SourceKind,
        repo_name: &str,
    ) -> Result<Report> {
        let collector = Collector::new(source).show_progress(self.show_progress);

        if kind == SourceKind::Remote {
            println!("Fetching README for: {repo_name}");
        }
        let readme = collector.readme();

        if kind == SourceKind::Remote {
            println!("\nFetching repository structure for: {repo_name}");
        }
        let structure = render::structure_header(kind, repo_name) + &collector.structure()?;
        self.advance();

        if kind == SourceKind::Remote {
            println!("\nFetching file contents for: {repo_name}");
        }
        let contents = collector.contents()?;
        self.advance();

        let instructions = match kind {
            SourceKind::Remote => Some(render::instructions(repo_name)),
            SourceKind::Local => None,
        };
        Ok(Report { instructions, readme, structure, contents })
    }
}
