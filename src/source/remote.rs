//! GitHub-backed source using the REST "contents" API.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::Source;
use crate::domain::{Entry, FileContent, README_NOT_FOUND};
use crate::error::{CollectError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// `owner/repo` pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    /// Parse a repository URL (`https://github.com/owner/repo`, optionally with
    /// a trailing slash, `.git` suffix or extra path such as `/tree/main`) or a
    /// bare `owner/repo` slug.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let without_host = match trimmed.split_once("://") {
            // Drop the host segment along with the scheme.
            Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or(""),
            None => trimmed.strip_prefix("github.com/").unwrap_or(trimmed),
        };

        let mut segments = without_host.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next()) {
            (Some(owner), Some(repo)) => {
                let repo = repo.strip_suffix(".git").unwrap_or(repo);
                if repo.is_empty() {
                    return Err(invalid_repo(input));
                }
                Ok(Self { owner: owner.to_string(), repo: repo.to_string() })
            }
            _ => Err(invalid_repo(input)),
        }
    }
}

fn invalid_repo(input: &str) -> CollectError {
    CollectError::configuration(format!(
        "'{input}' is not a GitHub repository URL (expected https://github.com/<owner>/<repo>)"
    ))
}

/// Connection settings for [`RemoteSource`].
#[derive(Debug, Clone)]
pub struct RemoteOptions {
    pub api_base_url: String,
    /// Branch, tag or commit to read; the default branch when unset
    pub git_ref: Option<String>,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            git_ref: None,
            timeout: Some(Duration::from_secs(30)),
            user_agent: concat!("repo-to-text/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct FileBody {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
}

pub struct RemoteSource {
    client: Client,
    api_base: Url,
    slug: RepoSlug,
    git_ref: Option<String>,
}

impl std::fmt::Debug for RemoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSource")
            .field("api_base", &self.api_base.as_str())
            .field("slug", &self.slug)
            .field("git_ref", &self.git_ref)
            .finish_non_exhaustive()
    }
}

impl RemoteSource {
    /// Create a source for `repo_url`.
    ///
    /// Fails with a configuration error, before any request is made, when the
    /// token is missing or empty or the URL does not name a repository.
    pub fn new(repo_url: &str, token: Option<&str>, options: RemoteOptions) -> Result<Self> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or_else(|| {
            CollectError::configuration("Please set the 'GITHUB_TOKEN' environment variable.")
        })?;
        let slug = RepoSlug::parse(repo_url)?;

        let api_base = Url::parse(&options.api_base_url).map_err(|err| {
            CollectError::configuration(format!(
                "invalid API base URL '{}': {err}",
                options.api_base_url
            ))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(CollectError::configuration(format!(
                "invalid API base URL '{}'",
                options.api_base_url
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| CollectError::configuration("access token contains invalid characters"))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .build()
            .map_err(|err| {
                CollectError::configuration(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self { client, api_base, slug, git_ref: options.git_ref })
    }

    pub fn slug(&self) -> &RepoSlug {
        &self.slug
    }

    fn contents_url(&self, path: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", self.slug.owner.as_str(), self.slug.repo.as_str(), "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        if let Some(git_ref) = &self.git_ref {
            url.query_pairs_mut().append_pair("ref", git_ref);
        }
        url
    }

    fn get(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| CollectError::Http { url: url.to_string(), source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::Status { url: url.to_string(), status: status.as_u16() });
        }
        Ok(response)
    }

    fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        self.get(url)?.json().map_err(|source| CollectError::Http { url: url.to_string(), source })
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.get(url)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|source| CollectError::Http { url: url.to_string(), source })
    }

    fn list(&self, path: &str) -> Result<Vec<Entry>> {
        let url = self.contents_url(path);
        debug!(%url, "listing remote directory");
        let value = self.get_json(url.as_str())?;
        let entries = parse_listing(value)
            .ok_or_else(|| CollectError::UnexpectedListing { path: path.to_string() })?;
        debug!(path, count = entries.len(), "listed remote directory");
        Ok(entries)
    }

    /// Fetch the raw bytes of a file.
    fn fetch_file(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.contents_url(path);
        let value = self.get_json(url.as_str())?;
        let body: FileBody = serde_json::from_value(value)
            .map_err(|_| CollectError::UnexpectedPayload { path: path.to_string() })?;

        match (body.encoding.as_deref(), body.content.as_deref(), body.download_url.as_deref()) {
            (Some("base64"), Some(content), _) => decode_base64_content(content)
                .ok_or_else(|| CollectError::UnexpectedPayload { path: path.to_string() }),
            // Large files come back without inline content.
            (_, _, Some(download_url)) => {
                debug!(path, "content not inlined, following download_url");
                self.get_bytes(download_url)
            }
            _ => Err(CollectError::UnexpectedPayload { path: path.to_string() }),
        }
    }
}

impl Source for RemoteSource {
    fn list_root(&self) -> Result<Vec<Entry>> {
        self.list("")
    }

    fn list_dir(&self, dir: &Entry) -> Result<Vec<Entry>> {
        self.list(&dir.path)
    }

    fn read_file(&self, file: &Entry) -> FileContent {
        match self.fetch_file(&file.path) {
            Ok(bytes) => FileContent::from_bytes(bytes),
            Err(err) => {
                warn!(file = %file.path, error = %err, "failed to fetch file");
                FileContent::Unreadable
            }
        }
    }

    fn fetch_readme(&self) -> String {
        match self.fetch_file("README.md").map(FileContent::from_bytes) {
            Ok(FileContent::Text(text)) => text,
            Ok(_) => {
                debug!("README.md is not valid UTF-8");
                README_NOT_FOUND.to_string()
            }
            Err(err) => {
                debug!(error = %err, "README.md not available");
                README_NOT_FOUND.to_string()
            }
        }
    }
}

/// Convert a contents-API directory response into entries. Returns `None`
/// when the body is not a listing (for example a single file object).
fn parse_listing(value: serde_json::Value) -> Option<Vec<Entry>> {
    if !value.is_array() {
        return None;
    }
    let items: Vec<ContentItem> = serde_json::from_value(value).ok()?;
    Some(
        items
            .into_iter()
            .map(|item| {
                if item.kind == "dir" {
                    Entry::dir(item.name, item.path)
                } else {
                    Entry::file(item.name, item.path)
                }
            })
            .collect(),
    )
}

/// Decode the API's base64 payload, which is wrapped with newlines.
fn decode_base64_content(content: &str) -> Option<Vec<u8>> {
    let cleaned: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::{decode_base64_content, parse_listing, RemoteOptions, RemoteSource, RepoSlug};
    use crate::domain::{Entry, EntryKind};
    use serde_json::json;

    #[test]
    fn parses_repository_urls_and_slugs() {
        let expected = RepoSlug { owner: "octo".into(), repo: "demo".into() };
        assert_eq!(RepoSlug::parse("https://github.com/octo/demo").unwrap(), expected);
        assert_eq!(RepoSlug::parse("https://github.com/octo/demo/").unwrap(), expected);
        assert_eq!(RepoSlug::parse("https://github.com/octo/demo.git").unwrap(), expected);
        assert_eq!(RepoSlug::parse("https://github.com/octo/demo/tree/main").unwrap(), expected);
        assert_eq!(RepoSlug::parse("github.com/octo/demo").unwrap(), expected);
        assert_eq!(RepoSlug::parse(" octo/demo ").unwrap(), expected);
    }

    #[test]
    fn rejects_urls_without_owner_and_repo() {
        for input in ["", "https://github.com/", "https://github.com/octo", "octo"] {
            let err = RepoSlug::parse(input).expect_err(input);
            assert!(err.is_configuration(), "{input}: {err}");
        }
    }

    #[test]
    fn missing_or_blank_token_is_a_configuration_error() {
        for token in [None, Some(""), Some("   ")] {
            let err = RemoteSource::new("https://github.com/octo/demo", token, RemoteOptions::default())
                .expect_err("token required");
            assert!(err.is_configuration());
            assert!(err.to_string().contains("GITHUB_TOKEN"));
        }
    }

    #[test]
    fn contents_url_encodes_path_and_ref() {
        let options = RemoteOptions {
            api_base_url: "https://ghe.example.com/api/v3/".into(),
            git_ref: Some("release/1.0".into()),
            ..RemoteOptions::default()
        };
        let source = RemoteSource::new("octo/demo", Some("t0ken"), options).expect("source");
        assert_eq!(
            source.contents_url("").as_str(),
            "https://ghe.example.com/api/v3/repos/octo/demo/contents?ref=release%2F1.0"
        );
        assert_eq!(
            source.contents_url("docs/my guide.md").as_str(),
            "https://ghe.example.com/api/v3/repos/octo/demo/contents/docs/my%20guide.md?ref=release%2F1.0"
        );
    }

    #[test]
    fn listing_maps_dir_type_and_treats_everything_else_as_files() {
        let value = json!([
            {"name": "src", "path": "src", "type": "dir", "sha": "1"},
            {"name": "main.rs", "path": "main.rs", "type": "file", "size": 10},
            {"name": "vendor", "path": "vendor", "type": "submodule"},
        ]);
        let entries = parse_listing(value).expect("listing");
        assert_eq!(entries[0], Entry::dir("src", "src"));
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[2].kind, EntryKind::File);
    }

    #[test]
    fn file_object_is_not_a_listing() {
        let value = json!({"name": "README.md", "path": "README.md", "type": "file"});
        assert!(parse_listing(value).is_none());
    }

    #[test]
    fn base64_payload_with_line_breaks_decodes() {
        let decoded = decode_base64_content("aGVs\nbG8g\nd29y\nbGQ=\n").expect("decode");
        assert_eq!(decoded, b"hello world");
        assert!(decode_base64_content("not base64!").is_none());
    }
}
