//! Loading of the published benchmark history and CI build list

use crate::error::{Error, Result};
use bench_trends_core::{BuildList, BuildRecord, History};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

/// Pull-request builds of the project on Travis CI
pub const DEFAULT_CI_URL: &str =
    "https://api.travis-ci.com/repos/denoland/deno/builds?event_type=pull_request";

/// Selects the v2.1 response envelope (`{ "builds": [...] }`)
pub const CI_ACCEPT: &str = "application/vnd.travis-ci.2.1+json";

/// Where a JSON document lives
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    File(PathBuf),
    Remote(Url),
}

impl Location {
    /// Interpret `http(s)://` and `file://` URLs; anything else is a path
    pub fn parse(location: &str) -> Result<Self> {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Location::Remote(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Location::File)
                .map_err(|_| Error::ConfigError(format!("Invalid file URL: {}", location))),
            _ => Ok(Location::File(PathBuf::from(location))),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Fetches benchmark snapshots and CI builds
pub struct HistoryLoader {
    client: reqwest::Client,
    ci_token: Option<String>,
}

impl HistoryLoader {
    /// Create a new loader; `ci_token` is only sent to the CI API
    pub fn new(ci_token: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("bench-trends"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, ci_token })
    }

    /// Retrieve and parse a JSON document from a file or URL
    pub async fn load_json<T: DeserializeOwned>(&self, location: &Location) -> Result<T> {
        debug!("Loading JSON from {}", location);

        let body = match location {
            Location::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| Error::FileReadError {
                        path: path.display().to_string(),
                        source: e,
                    })?
            }
            Location::Remote(url) => {
                self.client
                    .get(url.clone())
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?
            }
        };

        Ok(serde_json::from_str(&body)?)
    }

    /// Load the snapshot history, oldest first
    pub async fn load_snapshots(&self, location: &Location) -> Result<History> {
        let history: History = self.load_json(location).await?;
        debug!("Loaded {} snapshots", history.len());
        Ok(history)
    }

    /// Load the CI build list in chronological order, keeping builds for
    /// which `filter` returns true
    pub async fn load_build_history<F>(&self, url: &Url, filter: F) -> Result<Vec<BuildRecord>>
    where
        F: Fn(&BuildRecord) -> bool,
    {
        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static(CI_ACCEPT));

        if let Some(ref token) = self.ci_token {
            let value = HeaderValue::from_str(&format!("token {}", token))
                .map_err(|_| Error::ConfigError("Invalid token format".to_string()))?;
            request = request.header(AUTHORIZATION, value);
        }

        let body = request
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::CiError(format!("Failed to list builds: {}", e)))?
            .text()
            .await?;

        let builds = parse_build_history(&body, filter)?;
        debug!("Loaded {} CI builds", builds.len());
        Ok(builds)
    }
}

/// Parse a newest-first build envelope into chronological, filtered builds
pub fn parse_build_history<F>(body: &str, filter: F) -> Result<Vec<BuildRecord>>
where
    F: Fn(&BuildRecord) -> bool,
{
    let list: BuildList = serde_json::from_str(body)?;
    Ok(list
        .into_chronological()
        .into_iter()
        .filter(|build| filter(build))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILDS: &str = r#"{
        "builds": [
            { "id": 3, "number": "3", "duration": 900, "pull_request_number": 1003, "event_type": "pull_request" },
            { "id": 2, "number": "2", "duration": null, "pull_request_number": 1002, "event_type": "pull_request" },
            { "id": 1, "number": "1", "duration": 600, "pull_request_number": 1001, "event_type": "pull_request",
              "started_at": "2018-10-16T13:54:20Z" }
        ]
    }"#;

    #[test]
    fn test_parse_build_history_is_chronological() {
        let builds = parse_build_history(BUILDS, |_| true).unwrap();
        let ids: Vec<_> = builds.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
        assert!(builds[0].started_at.is_some());
    }

    #[test]
    fn test_parse_build_history_applies_filter() {
        let builds = parse_build_history(BUILDS, BuildRecord::has_duration).unwrap();
        let prs: Vec<_> = builds.iter().map(|b| b.pull_request_number).collect();
        assert_eq!(prs, vec![Some(1001), Some(1003)]);
    }

    #[test]
    fn test_parse_build_history_rejects_garbage() {
        let err = parse_build_history("<html>", |_| true).unwrap_err();
        assert!(matches!(err, Error::JsonError(_)));
    }

    #[test]
    fn test_location_parse() {
        assert_eq!(
            Location::parse("data.json").unwrap(),
            Location::File(PathBuf::from("data.json"))
        );
        assert!(matches!(
            Location::parse("https://example.com/data.json").unwrap(),
            Location::Remote(_)
        ));
        assert_eq!(
            Location::parse("file:///tmp/data.json").unwrap(),
            Location::File(PathBuf::from("/tmp/data.json"))
        );
    }

    #[tokio::test]
    async fn test_load_snapshots_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"[{"sha1": "1111111", "binary_size": 5000}, {"sha1": "2222222", "binary_size": {"deno": 6000}}]"#,
        )
        .unwrap();

        let loader = HistoryLoader::new(None).unwrap();
        let history = loader
            .load_snapshots(&Location::File(path))
            .await
            .unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.snapshots[0].commit_hash, "1111111");
    }

    #[tokio::test]
    async fn test_load_snapshots_missing_file() {
        let loader = HistoryLoader::new(None).unwrap();
        let err = loader
            .load_snapshots(&Location::File(PathBuf::from("/nonexistent/data.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileReadError { .. }));
    }
}
