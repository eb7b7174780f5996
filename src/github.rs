//! GitHub REST API client for release and commit metadata
//!
//! Two read endpoints are used: release-by-tag and commit-by-hash. Both
//! require a bearer token and are issued as blocking requests; a non-2xx
//! status propagates to the caller unmodified, with no retry.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::RepoLocation;
use crate::error::Result;

const API_ROOT: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A GitHub release record tied to a tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub author: ReleaseAuthor,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// The account that published a release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAuthor {
    pub login: String,
}

/// A commit as reported by the commits endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
}

/// The git-level commit payload nested inside [Commit]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: CommitAuthor,
}

/// Authorship recorded in the commit itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Release {
    /// The release body split into changelog lines.
    ///
    /// An absent or empty body yields no lines, which triggers the commit
    /// metadata fallback downstream.
    pub fn changelog_lines(&self) -> Vec<String> {
        match self.body.as_deref() {
            Some(body) if !body.is_empty() => body.split('\n').map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }
}

/// Read access to the hosting platform's release and commit records.
///
/// Mirrors the two endpoints the pipeline needs, so tests can substitute a
/// canned implementation.
pub trait ReleaseHost: Send + Sync {
    /// Fetch the release record published for a tag
    fn release_by_tag(&self, location: &RepoLocation, tag: &str) -> Result<Release>;

    /// Fetch a commit's metadata by hash
    fn commit_by_hash(&self, location: &RepoLocation, commit_hash: &str) -> Result<Commit>;
}

/// Authenticated GitHub API client
pub struct GithubClient {
    http: Client,
    token: String,
    api_root: String,
}

impl GithubClient {
    /// Build a client authenticated with the given token
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("release-notify/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(GithubClient {
            http,
            token: token.into(),
            api_root: API_ROOT.to_string(),
        })
    }

    fn release_url(&self, location: &RepoLocation, tag: &str) -> String {
        format!("{}/repos/{}/releases/tags/{}", self.api_root, location, tag)
    }

    fn commit_url(&self, location: &RepoLocation, commit_hash: &str) -> String {
        format!("{}/repos/{}/commits/{}", self.api_root, location, commit_hash)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, ACCEPT_HEADER)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .send()?
            .error_for_status()?;

        Ok(response.json()?)
    }
}

impl ReleaseHost for GithubClient {
    fn release_by_tag(&self, location: &RepoLocation, tag: &str) -> Result<Release> {
        self.get_json(&self.release_url(location, tag))
    }

    fn commit_by_hash(&self, location: &RepoLocation, commit_hash: &str) -> Result<Commit> {
        self.get_json(&self.commit_url(location, commit_hash))
    }
}
