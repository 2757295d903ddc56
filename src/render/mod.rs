//! Report assembly, template substitution and output writing.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::{Report, SourceKind, REPO_NAME_PLACEHOLDER};
use crate::error::{CollectError, Result};
use crate::utils::output_file_name;

const ANALYSIS_STEPS: [&str; 10] = [
    "Read the README file to gain an overview of the project, its goals, and any setup instructions.",
    "Examine the repository structure to understand how the files and directories are organized.",
    "Identify the main entry point of the application (e.g., main.py, app.py, index.js) and start analyzing the code flow from there.",
    "Study the dependencies and libraries used in the project to understand the external tools and frameworks being utilized.",
    "Analyze the core functionality of the project by examining the key modules, classes, and functions.",
    "Look for any configuration files (e.g., config.py, .env) to understand how the project is configured and what settings are available.",
    "Investigate any tests or test directories to see how the project ensures code quality and handles different scenarios.",
    "Review any documentation or inline comments to gather insights into the codebase and its intended behavior.",
    "Identify any potential areas for improvement, optimization, or further exploration based on your analysis.",
    "Provide a summary of your findings, including the project's purpose, key features, and any notable observations or recommendations.",
];

/// Instructional preamble placed before remote reports.
pub fn instructions(repo_name: &str) -> String {
    let mut out = format!(
        "Prompt: Analyze the {repo_name} repository to understand its structure, purpose, and functionality. Follow these steps to study the codebase:\n\n"
    );
    for (idx, step) in ANALYSIS_STEPS.iter().enumerate() {
        out.push_str(&format!("{}. {step}\n\n", idx + 1));
    }
    out.push_str("Use the files and contents provided below to complete this analysis:\n\n");
    out
}

/// First line of the structure section.
pub fn structure_header(kind: SourceKind, repo_name: &str) -> String {
    match kind {
        SourceKind::Remote => format!("Repository Structure: {repo_name}\n"),
        SourceKind::Local => "Repository Structure:\n".to_string(),
    }
}

/// Concatenate the report sections in their fixed order.
pub fn assemble(report: &Report) -> String {
    let mut out = String::with_capacity(
        report.readme.len() + report.structure.len() + report.contents.len() + 64,
    );
    if let Some(instructions) = &report.instructions {
        out.push_str(instructions);
    }
    out.push_str("README:\n");
    out.push_str(&report.readme);
    out.push_str("\n\n");
    out.push_str(&report.structure);
    out.push_str("\n\n");
    out.push_str(&report.contents);
    out
}

/// Prepend the template and replace every placeholder with the repository name.
///
/// Substitution runs over the combined text, so a placeholder inside
/// collected file contents is replaced too.
pub fn apply_template(template: &str, body: &str, repo_name: &str) -> String {
    let mut combined = String::with_capacity(template.len() + body.len());
    combined.push_str(template);
    combined.push_str(body);
    combined.replace(REPO_NAME_PLACEHOLDER, repo_name)
}

pub fn read_template(path: &Path) -> Result<String> {
    debug!(template = %path.display(), "reading template");
    fs::read_to_string(path)
        .map_err(|source| CollectError::Template { path: path.to_path_buf(), source })
}

/// Write the report to `<output_dir>/<repo_name>_contents.txt` in one call.
pub fn write_output(output_dir: &Path, repo_name: &str, text: &str) -> Result<PathBuf> {
    let output_path = output_dir.join(output_file_name(repo_name));
    let write_err = |source| CollectError::Write { path: output_path.clone(), source };
    if !output_dir.as_os_str().is_empty() {
        fs::create_dir_all(output_dir).map_err(write_err)?;
    }
    fs::write(&output_path, text).map_err(write_err)?;
    debug!(output = %output_path.display(), bytes = text.len(), "wrote report");
    Ok(output_path)
}
