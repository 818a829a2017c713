//! Records extracted from registry pages.
//!
//! These are plain data carriers: the extractor fills them, the CLI prints
//! them, and the collections store copies usage snippets out of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One row of a search-results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    /// Ordinal as displayed on the results page
    pub index: u64,

    /// Group identifier (e.g. `org.slf4j`)
    pub group_id: String,

    /// Artifact name (e.g. `slf4j-api`)
    pub artifact_name: String,

    /// Human readable title of the artifact
    pub name: String,

    /// Link to the artifact detail page
    pub link: String,

    /// Link to the group page
    pub group_link: String,

    pub description: String,

    /// Last release as shown by the site, not parsed
    pub last_release: String,
}

/// A parsed search-results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Total number of results stated by the page (0 when unreadable)
    pub total: u64,

    /// Page number, `None` when the page was parsed without that context
    pub page_no: Option<u32>,

    pub items: Vec<SearchResultItem>,
}

impl SearchResult {
    /// Attach the page number the caller requested
    pub fn with_page(mut self, page_no: u32) -> Self {
        self.page_no = Some(page_no);
        self
    }
}

/// One row of an artifact's version table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactVersion {
    pub version: String,

    /// Hosting repository name (e.g. `Central`)
    pub repository: String,

    /// Release date as shown by the site
    pub release_date: String,
}

/// Metadata of a single artifact detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactInfo {
    pub name: String,
    pub description: String,

    /// First category only; empty when the page lists none
    pub categories: String,

    /// Tags in document order
    pub tags: Vec<String>,

    /// Version rows in document order
    pub versions: Vec<ArtifactVersion>,
}

/// Build tools the registry renders usage snippets for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildTool {
    Maven,
    Gradle,
    GradleShort,
    GradleKotlin,
    Sbt,
    Ivy,
    Grape,
    Leiningen,
    Buildr,
}

impl BuildTool {
    /// Every supported tool, in the registry's display order
    pub const ALL: [BuildTool; 9] = [
        BuildTool::Maven,
        BuildTool::Gradle,
        BuildTool::GradleKotlin,
        BuildTool::GradleShort,
        BuildTool::Grape,
        BuildTool::Buildr,
        BuildTool::Sbt,
        BuildTool::Leiningen,
        BuildTool::Ivy,
    ];

    /// Element id holding this tool's snippet on a version page
    pub fn anchor_id(self) -> &'static str {
        match self {
            BuildTool::Maven => "maven-a",
            BuildTool::Gradle => "gradle-a",
            BuildTool::GradleShort => "gradle-short-a",
            BuildTool::GradleKotlin => "gradle-short-kotlin-a",
            BuildTool::Sbt => "sbt-a",
            BuildTool::Ivy => "ivy-a",
            BuildTool::Grape => "grape-a",
            BuildTool::Leiningen => "leiningen-a",
            BuildTool::Buildr => "buildr-a",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BuildTool::Maven => "Maven",
            BuildTool::Gradle => "Gradle",
            BuildTool::GradleShort => "GradleShort",
            BuildTool::GradleKotlin => "GradleKotlin",
            BuildTool::Sbt => "Sbt",
            BuildTool::Ivy => "Ivy",
            BuildTool::Grape => "Grape",
            BuildTool::Leiningen => "Leiningen",
            BuildTool::Buildr => "Buildr",
        }
    }
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuildTool {
    type Err = String;

    /// Case-insensitive match on the display name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildTool::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown build tool: {}", s))
    }
}

/// Usage snippets for one artifact version, one per build tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactUsage {
    pub maven: String,
    pub gradle: String,
    pub gradle_short: String,
    pub gradle_kotlin: String,
    pub sbt: String,
    pub ivy: String,
    pub grape: String,
    pub leiningen: String,
    pub buildr: String,
}

impl ArtifactUsage {
    /// Snippet for the given tool
    pub fn snippet(&self, tool: BuildTool) -> &str {
        match tool {
            BuildTool::Maven => &self.maven,
            BuildTool::Gradle => &self.gradle,
            BuildTool::GradleShort => &self.gradle_short,
            BuildTool::GradleKotlin => &self.gradle_kotlin,
            BuildTool::Sbt => &self.sbt,
            BuildTool::Ivy => &self.ivy,
            BuildTool::Grape => &self.grape,
            BuildTool::Leiningen => &self.leiningen,
            BuildTool::Buildr => &self.buildr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tool_parse_is_case_insensitive() {
        assert_eq!("maven".parse::<BuildTool>().unwrap(), BuildTool::Maven);
        assert_eq!(
            "GRADLEKOTLIN".parse::<BuildTool>().unwrap(),
            BuildTool::GradleKotlin
        );
        assert!("bazel".parse::<BuildTool>().is_err());
    }

    #[test]
    fn test_anchor_ids_are_unique() {
        let mut ids: Vec<_> = BuildTool::ALL.iter().map(|t| t.anchor_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), BuildTool::ALL.len());
    }

    #[test]
    fn test_search_result_serializes_camel_case() {
        let result = SearchResult {
            total: 1,
            page_no: None,
            items: vec![],
        }
        .with_page(2);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["pageNo"], 2);
        assert_eq!(json["total"], 1);
    }
}
