//! Configuration loading
//!
//! Layers, lowest to highest precedence: built-in defaults, a config file
//! (`repo-to-text.toml`/`.yml`/`.yaml` in the working directory, or an explicit
//! `--config`), `REPO_TO_TEXT_*` environment variables, `GITHUB_TOKEN`, and
//! finally CLI flags via [`merge_cli_with_config`].

use anyhow::{bail, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::source::remote::{RemoteOptions, DEFAULT_API_BASE_URL};

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

/// Config file names searched for in the working directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["repo-to-text.toml", "repo-to-text.yml", "repo-to-text.yaml"];

/// Environment variable prefix for configuration keys.
pub const ENV_PREFIX: &str = "REPO_TO_TEXT_";

/// Environment variable carrying the GitHub access token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Input source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, alias = "repo", skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    #[serde(default, alias = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_: Option<String>,

    // Output
    /// Template prepended to the report; `##REPO_NAME##` is substituted
    #[serde(default = "default_template")]
    pub template: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    // Remote access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds; 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: None,
            repo_url: None,
            ref_: None,
            template: default_template(),
            output_dir: default_output_dir(),
            github_token: None,
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn remote_options(&self) -> RemoteOptions {
        RemoteOptions {
            api_base_url: self.api_base_url.clone(),
            git_ref: self.ref_.clone(),
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
            user_agent: self.user_agent.clone(),
        }
    }
}

fn default_template() -> PathBuf {
    PathBuf::from("prompt.txt")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    concat!("repo-to-text/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Find the config file to use: the explicit one, or the first known name in `dir`.
pub fn find_config_file(dir: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("Config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }
    Ok(CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|p| p.is_file()))
}

/// Defaults plus the config file, without environment layers.
pub fn file_figment(config_file: Option<&Path>) -> Figment {
    let figment = Figment::from(Serialized::defaults(Config::default()));
    match config_file {
        Some(path) => match path.extension().and_then(|e| e.to_str()) {
            Some("yml" | "yaml") => figment.merge(Yaml::file(path)),
            _ => figment.merge(Toml::file(path)),
        },
        None => figment,
    }
}

pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    let config_file = find_config_file(dir, explicit)?;
    if let Some(path) = &config_file {
        debug!(config = %path.display(), "loading config file");
    }

    let figment = file_figment(config_file.as_deref())
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Env::raw().only(&[TOKEN_ENV_VAR]).map(|_| "github_token".into()));
    Ok(figment.extract()?)
}
