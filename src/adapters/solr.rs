//! Response types of the registry's structured search API.
//!
//! This is the JSON path next to the scraped pages: a Solr endpoint that
//! returns registry-native summary documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolrSearchResponse {
    pub response_header: SolrResponseHeader,
    pub response: SolrResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolrResponseHeader {
    pub status: i32,

    /// Query time in milliseconds
    #[serde(rename = "QTime")]
    pub query_time: u64,

    /// Request parameters echoed back by the server
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolrResponseBody {
    pub num_found: u64,

    #[serde(default)]
    pub start: u64,

    #[serde(default)]
    pub docs: Vec<SolrArtifactDoc>,
}

/// Summary of one artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolrArtifactDoc {
    /// `group:artifact`
    pub id: String,

    #[serde(rename = "g")]
    pub group_id: String,

    #[serde(rename = "a")]
    pub artifact_id: String,

    #[serde(default)]
    pub latest_version: Option<String>,

    #[serde(default)]
    pub repository_id: Option<String>,

    /// Packaging (`jar`, `pom`, ...)
    #[serde(rename = "p", default)]
    pub packaging: Option<String>,

    /// Last update, epoch milliseconds
    #[serde(default)]
    pub timestamp: Option<i64>,

    #[serde(default)]
    pub version_count: Option<u32>,

    /// Published file extensions (`.jar`, `-sources.jar`, ...)
    #[serde(rename = "ec", default)]
    pub extensions: Vec<String>,
}
