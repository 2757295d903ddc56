//! Utility functions

pub mod binary;
pub mod paths;

pub use binary::is_binary_name;
pub use paths::{display_join, local_repo_name, output_file_name, repo_short_name};
