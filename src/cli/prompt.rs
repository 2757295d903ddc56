//! Interactive selection of what to collect.

use anyhow::{bail, Result};
use console::style;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::collect::Target;
use crate::domain::SourceKind;

const KIND_QUESTION: &str =
    "Do you want to analyze a local repository or a GitHub repository? (local/remote): ";
const PATH_QUESTION: &str = "Enter the full path to the local repository: ";
const URL_QUESTION: &str = "Enter the GitHub repository URL: ";

/// Ask one question and return the trimmed answer. End of input is an error.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", style(question).bold())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("No input provided");
    }
    Ok(line.trim().to_string())
}

/// Ask "local or remote" until the answer is one of the two.
pub fn prompt_source_kind<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<SourceKind> {
    loop {
        let answer = ask(input, output, KIND_QUESTION)?;
        if let Some(kind) = SourceKind::parse(&answer) {
            return Ok(kind);
        }
        writeln!(output, "{}", style("Invalid input. Please enter 'local' or 'remote'.").yellow())?;
    }
}

/// Ask for the source kind, then for the path or URL.
pub fn prompt_target<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Target> {
    match prompt_source_kind(input, output)? {
        SourceKind::Local => {
            let path = ask(input, output, PATH_QUESTION)?;
            if path.is_empty() {
                bail!("A local repository path is required");
            }
            Ok(Target::Local(PathBuf::from(path)))
        }
        SourceKind::Remote => {
            let url = ask(input, output, URL_QUESTION)?;
            if url.is_empty() {
                bail!("A GitHub repository URL is required");
            }
            Ok(Target::Remote(url))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{prompt_source_kind, prompt_target};
    use crate::collect::Target;
    use crate::domain::SourceKind;
    use std::io::Cursor;
    use std::path::PathBuf;

    #[test]
    fn reasks_until_answer_is_valid() {
        let mut input = Cursor::new("github\n\n  Remote \n");
        let mut output = Vec::new();
        let kind = prompt_source_kind(&mut input, &mut output).expect("kind");
        assert_eq!(kind, SourceKind::Remote);

        let shown = String::from_utf8(output).expect("utf8");
        assert_eq!(shown.matches("Invalid input. Please enter 'local' or 'remote'.").count(), 2);
    }

    #[test]
    fn local_answer_then_path() {
        let mut input = Cursor::new("local\n/tmp/my repo \n");
        let mut output = Vec::new();
        let target = prompt_target(&mut input, &mut output).expect("target");
        assert_eq!(target, Target::Local(PathBuf::from("/tmp/my repo")));
    }

    #[test]
    fn remote_answer_then_url() {
        let mut input = Cursor::new("remote\nhttps://github.com/octo/demo\n");
        let mut output = Vec::new();
        let target = prompt_target(&mut input, &mut output).expect("target");
        assert_eq!(target, Target::Remote("https://github.com/octo/demo".to_string()));
        let shown = String::from_utf8(output).expect("utf8");
        assert!(shown.contains("Enter the GitHub repository URL"));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut input = Cursor::new("maybe\n");
        let mut output = Vec::new();
        let err = prompt_source_kind(&mut input, &mut output).expect_err("eof");
        assert!(err.to_string().contains("No input provided"));
    }
}
