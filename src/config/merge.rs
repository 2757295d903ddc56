//! CLI argument merging with config

use super::Config;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub path: Option<PathBuf>,
    pub repo_url: Option<String>,
    pub ref_: Option<String>,
    pub template: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(path) = cli.path {
        base_config.path = Some(path);
        base_config.repo_url = None;
    }
    if let Some(repo_url) = cli.repo_url {
        base_config.repo_url = Some(repo_url);
        base_config.path = None;
    }
    if let Some(ref_) = cli.ref_ {
        base_config.ref_ = Some(ref_);
    }

    if let Some(template) = cli.template {
        base_config.template = template;
    }
    if let Some(output_dir) = cli.output_dir {
        base_config.output_dir = output_dir;
    }

    base_config
}
