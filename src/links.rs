//! Click-through links from chart points to GitHub commits and pull requests

use crate::error::{Error, Result};

/// Repository that snapshot commits and CI pull requests belong to
pub const DEFAULT_REPOSITORY: &str = "denoland/deno";

const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Builds commit and pull-request URLs for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLinks {
    server_url: String,
    owner: String,
    repo: String,
}

impl RepoLinks {
    /// Create links from any form accepted by [`parse_github_repo`]
    pub fn from_repository(repository: &str, server_url: Option<&str>) -> Result<Self> {
        let (owner, repo) = parse_github_repo(repository)?;
        Ok(Self {
            server_url: server_url
                .unwrap_or(DEFAULT_SERVER_URL)
                .trim_end_matches('/')
                .to_string(),
            owner,
            repo,
        })
    }

    pub fn commit_url(&self, sha: &str) -> String {
        format!("{}/{}/{}/commit/{}", self.server_url, self.owner, self.repo, sha)
    }

    pub fn pull_request_url(&self, number: u64) -> String {
        format!("{}/{}/{}/pull/{}", self.server_url, self.owner, self.repo, number)
    }
}

/// Parse a GitHub repository URL or string into owner and repo
pub fn parse_github_repo(repo: &str) -> Result<(String, String)> {
    // Handle various formats:
    // - owner/repo
    // - https://github.com/owner/repo
    // - git@github.com:owner/repo.git
    // - github.com/owner/repo

    let repo = repo.trim();
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    // Try simple owner/repo format
    if !repo.contains("://") && !repo.contains('@') && !repo.contains("github.com") {
        let parts: Vec<&str> = repo.split('/').collect();
        if parts.len() == 2 && parts.iter().all(|p| !p.is_empty()) {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
    }

    // Try URL format
    if let Ok(url) = url::Url::parse(repo) {
        let parts: Vec<&str> = url.path().trim_start_matches('/').split('/').collect();
        if parts.len() >= 2 && !parts[1].is_empty() {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
    }

    // Try SSH format (git@github.com:owner/repo)
    if let Some(path) = repo.strip_prefix("git@github.com:") {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() == 2 {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
    }

    // Try github.com/owner/repo format
    if let Some(path) = repo.strip_prefix("github.com/") {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() >= 2 {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
    }

    Err(Error::ConfigError(format!(
        "Could not parse GitHub repository from: {}",
        repo
    )))
}
