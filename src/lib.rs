//! Repo-to-Text: flatten a repository into one LLM-ready text file
//!
//! A [`source::Source`] (local directory or GitHub repository) is walked with
//! an explicit work stack; the README, a structure listing and every file's
//! contents are concatenated into a single report.

pub mod cli;
pub mod collect;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod source;
pub mod utils;

pub use error::{CollectError, Result};
