//! HTTP client for the GitHub REST API
//!
//! Every request is a plain GET. Responses are classified once, here:
//! 404 → `NotFound`, 403 → `RateLimited`, any other non-2xx → `Http`, and
//! failures that never reach a status line → `Transport`.

use crate::pipeline::PAGE_SIZE;
use crate::source::ProfileSource;
use async_trait::async_trait;
use octoscope_core::{Account, ApiConfig, LanguageUsage, OctoscopeError, Project, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Client for the account, project and language endpoints
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: Url,
}

impl GitHubClient {
    /// Create a client with the API version headers preconfigured
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            OctoscopeError::Config(format!("Invalid API base URL {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(OctoscopeError::Config(format!(
                "API base URL cannot have paths: {}",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                OctoscopeError::Config(format!("Invalid user agent: {}", e))
            })?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| OctoscopeError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// Build an endpoint URL; each segment is percent-encoded on its own
    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    /// GET a resource and decode its JSON body
    pub async fn fetch_resource<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(segments, query);
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| OctoscopeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!("GET {} returned {}", url, status);
            return Err(OctoscopeError::from_status(status.as_u16(), url.path()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| OctoscopeError::Transport(e.to_string()))?;

        serde_json::from_slice(&body)
            .map_err(|e| OctoscopeError::Decode(format!("{}: {}", url.path(), e)))
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    #[instrument(skip(self))]
    async fn fetch_account(&self, account: &str) -> Result<Account> {
        self.fetch_resource(&["users", account], &[]).await
    }

    #[instrument(skip(self))]
    async fn fetch_project_page(&self, account: &str, page: u32) -> Result<Vec<Project>> {
        self.fetch_resource(
            &["users", account, "repos"],
            &[
                ("per_page", PAGE_SIZE.to_string()),
                ("page", page.to_string()),
                ("sort", "updated".to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_languages(&self, owner: &str, project: &str) -> Result<LanguageUsage> {
        self.fetch_resource(&["repos", owner, project, "languages"], &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> GitHubClient {
        GitHubClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = client("https://api.github.com");
        let url = client.endpoint(&["users", "a b/../c"], &[]);
        assert_eq!(url.as_str(), "https://api.github.com/users/a%20b%2F..%2Fc");
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_query() {
        let client = client("https://ghe.example.com/api/v3/");
        let url = client.endpoint(
            &["users", "octocat", "repos"],
            &[("per_page", "100".to_string()), ("page", "2".to_string())],
        );
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/users/octocat/repos?per_page=100&page=2"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = GitHubClient::new(&ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, OctoscopeError::Config(_)));
    }
}
