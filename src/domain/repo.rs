use std::fmt;

use crate::error::{ReleaseNotifyError, Result};

/// The organization/repository pair a remote URL points at.
///
/// Derived exactly once per run and reused by every GitHub request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub organization: String,
    pub repository: String,
}

impl RepoLocation {
    /// Parse a remote URL into its organization/repository pair.
    ///
    /// Accepts both common remote forms:
    /// - HTTPS: `https://host/org/repo.git`
    /// - SSH shorthand: `user@host:org/repo.git`
    ///
    /// A trailing `.git` suffix is stripped in either case.
    ///
    /// # Arguments
    /// * `url` - The raw remote URL as configured for the repository
    ///
    /// # Returns
    /// * `Ok(RepoLocation)` - The parsed location
    /// * `Err` - `Format` error when the URL matches neither form
    pub fn parse(url: &str) -> Result<Self> {
        let org_repo = if let Some(rest) = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
        {
            // The org/repo pair is the URL path, leading slash stripped
            let path = rest.split_once('/').map(|(_, path)| path).ok_or_else(|| {
                ReleaseNotifyError::format(format!("URL has no repository path: {}", url))
            })?;
            path.trim_start_matches('/').to_string()
        } else {
            let ssh_pattern = regex::Regex::new(r"^[^@/]+@[^:/]+:(.+)$")
                .map_err(|e| ReleaseNotifyError::format(format!("Invalid SSH pattern: {}", e)))?;
            match ssh_pattern.captures(url) {
                Some(captures) => captures[1].to_string(),
                None => {
                    return Err(ReleaseNotifyError::format(format!(
                        "Unrecognized remote URL format: {}",
                        url
                    )))
                }
            }
        };

        let org_repo = org_repo.strip_suffix(".git").unwrap_or(&org_repo);

        match org_repo.split_once('/') {
            Some((organization, repository))
                if !organization.is_empty() && !repository.is_empty() =>
            {
                Ok(RepoLocation {
                    organization: organization.to_string(),
                    repository: repository.to_string(),
                })
            }
            _ => Err(ReleaseNotifyError::format(format!(
                "Expected an organization/repository pair, got: {}",
                org_repo
            ))),
        }
    }
}

impl fmt::Display for RepoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository)
    }
}
