//! Artifact detail page extraction.

use tracing::debug;

use super::document::{DocumentNode, HtmlDocument, StructuredDocument};
use super::ExtractError;
use crate::domain::{ArtifactInfo, ArtifactVersion};

const TITLE_PATH: &str = "body > div.page > main > div.content > div.im > div.im-header > h2 > a";
const DESCRIPTION_PATH: &str = "body > div.page > main > div.content > div.im > div.im-description";
const META_ROW_PATH: &str = "body > div.page > main > div.content > table > tbody > tr";
const VERSION_ROW_PATH: &str = "#snippets > div > div > div > table > tbody > tr";

const CATEGORIES_LABEL: &str = "Categories";
const TAGS_LABEL: &str = "Tags";

/// Parse an artifact detail page
pub fn parse_artifact_detail(html: &str) -> Result<ArtifactInfo, ExtractError> {
    artifact_detail_from(&HtmlDocument::parse(html))
}

/// Parse an artifact detail page from any structured document
pub fn artifact_detail_from<D: StructuredDocument>(doc: &D) -> Result<ArtifactInfo, ExtractError> {
    let root = doc.root();

    let name = root.require(TITLE_PATH, "artifact title")?.trimmed_text();
    let description = root
        .require(DESCRIPTION_PATH, "artifact description")?
        .trimmed_text();

    let mut categories = String::new();
    let mut tags = Vec::new();
    for row in root.find_all(META_ROW_PATH)? {
        let Some(label) = row.find("th")? else {
            continue;
        };
        // Labels must match exactly, case and whitespace included; other rows are ignored
        match label.text().as_str() {
            CATEGORIES_LABEL => {
                categories = row.require("td > a", "category link")?.trimmed_text();
            }
            TAGS_LABEL => {
                for tag in row.find_all("td > a")? {
                    tags.push(tag.trimmed_text());
                }
            }
            _ => {}
        }
    }

    let versions = root
        .find_all(VERSION_ROW_PATH)?
        .iter()
        .map(extract_version)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        artifact = %name,
        tags = tags.len(),
        versions = versions.len(),
        "Parsed artifact detail"
    );

    Ok(ArtifactInfo {
        name,
        description,
        categories,
        tags,
        versions,
    })
}

/// Read one version row.
///
/// Rows that open a new major line carry an extra leading cell with a
/// `div` (the "2.0.x" label); every other column shifts right by one.
fn extract_version<N: DocumentNode>(row: &N) -> Result<ArtifactVersion, ExtractError> {
    let offset = usize::from(row.find("td:nth-of-type(1) > div")?.is_some());

    let version = row
        .require(
            &format!("td:nth-of-type({}) > a.vbtn", 1 + offset),
            "version link",
        )?
        .trimmed_text();
    let repository = row
        .require(
            &format!("td:nth-of-type({}) > a.b.lic", 3 + offset),
            "repository link",
        )?
        .trimmed_text();
    let release_date = row.require("td.date", "release date")?.trimmed_text();

    Ok(ArtifactVersion {
        version,
        repository,
        release_date,
    })
}
