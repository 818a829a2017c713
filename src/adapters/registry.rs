//! HTTP client for the artifact registry.
//!
//! One GET per call with a fixed timeout and no retry. The website sets a
//! session cookie on the first response and answers 403 to later requests
//! that do not send it back, so the client keeps a cookie store.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info};

use super::solr::SolrSearchResponse;
use crate::config::RegistrySettings;
use crate::domain::{ArtifactInfo, ArtifactUsage, SearchResult};
use crate::extract::{self, ExtractError};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Errors talking to the registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid registry URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Registry returned {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Registry client for the scraped website and the JSON search API
pub struct RegistryClient {
    client: reqwest::Client,
    web_url: Url,
    api_url: Url,
}

impl RegistryClient {
    /// Create a client from resolved settings
    pub fn new(settings: &RegistrySettings) -> Result<Self, RegistryError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            web_url: parse_url(&settings.web_url)?,
            api_url: parse_url(&settings.api_url)?,
        })
    }

    /// Search the website; links in the result are made absolute
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchResult, RegistryError> {
        let mut url = endpoint(&self.web_url, &["search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("p", &page.to_string());

        let html = self.get_text(url).await?;
        let mut result = extract::parse_search_listing(&html)?.with_page(page);
        for item in &mut result.items {
            item.link = absolutize(&self.web_url, &item.link);
            item.group_link = absolutize(&self.web_url, &item.group_link);
        }

        info!(query, page, total = result.total, rows = result.items.len(), "Search completed");
        Ok(result)
    }

    /// Metadata and version table of an artifact
    pub async fn artifact_info(
        &self,
        group_id: &str,
        artifact_name: &str,
    ) -> Result<ArtifactInfo, RegistryError> {
        let url = endpoint(&self.web_url, &["artifact", group_id, artifact_name])?;
        let html = self.get_text(url).await?;
        Ok(extract::parse_artifact_detail(&html)?)
    }

    /// Build-tool snippets of one artifact version
    pub async fn artifact_usage(
        &self,
        group_id: &str,
        artifact_name: &str,
        version: &str,
    ) -> Result<ArtifactUsage, RegistryError> {
        let url = endpoint(&self.web_url, &["artifact", group_id, artifact_name, version])?;
        let html = self.get_text(url).await?;
        Ok(extract::parse_usage_snippets(&html)?)
    }

    /// Query the structured search API
    pub async fn search_api(
        &self,
        query: &str,
        rows: u32,
        start: u32,
    ) -> Result<SolrSearchResponse, RegistryError> {
        let mut url = endpoint(&self.api_url, &["solrsearch", "select"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("rows", &rows.to_string())
            .append_pair("start", &start.to_string())
            .append_pair("wt", "json");

        let response = self.send(url).await?;
        Ok(response.json().await?)
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response, RegistryError> {
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_text(&self, url: Url) -> Result<String, RegistryError> {
        Ok(self.send(url).await?.text().await?)
    }
}

fn parse_url(raw: &str) -> Result<Url, RegistryError> {
    Url::parse(raw).map_err(|e| RegistryError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Append path segments to a base URL, keeping any base path (proxies)
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, RegistryError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| RegistryError::InvalidUrl {
            url: base.to_string(),
            reason: "URL cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Resolve a page-relative link; unresolvable links are kept as-is
fn absolutize(base: &Url, link: &str) -> String {
    base.join(link)
        .map(String::from)
        .unwrap_or_else(|_| link.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_segments() {
        let base = Url::parse("https://mvnrepository.com").unwrap();
        assert_eq!(
            endpoint(&base, &["artifact", "org.slf4j", "slf4j-api"])
                .unwrap()
                .as_str(),
            "https://mvnrepository.com/artifact/org.slf4j/slf4j-api"
        );
    }

    #[test]
    fn test_endpoint_keeps_proxy_prefix() {
        let base = Url::parse("http://localhost:5173/maven/").unwrap();
        assert_eq!(
            endpoint(&base, &["search"]).unwrap().as_str(),
            "http://localhost:5173/maven/search"
        );
    }

    #[test]
    fn test_absolutize_links() {
        let base = Url::parse("https://mvnrepository.com").unwrap();
        assert_eq!(
            absolutize(&base, "/artifact/org.slf4j"),
            "https://mvnrepository.com/artifact/org.slf4j"
        );
        assert_eq!(
            absolutize(&base, "https://ads.example.com/x"),
            "https://ads.example.com/x"
        );
    }

    #[test]
    fn test_client_rejects_bad_url() {
        let settings = RegistrySettings {
            web_url: "not a url".to_string(),
            ..RegistrySettings::default()
        };
        assert!(matches!(
            RegistryClient::new(&settings),
            Err(RegistryError::InvalidUrl { .. })
        ));
    }
}
