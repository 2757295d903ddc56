//! repo-to-text: flatten a repository into one text file for LLM prompting
//!
//! Reads a local directory or a GitHub repository and writes its README,
//! directory structure and file contents to `<repo>_contents.txt`.

use anyhow::Result;

fn main() -> Result<()> {
    repo_to_text::cli::run()
}
