//! Usage snippet extraction from an artifact version page.

use super::document::{DocumentNode, HtmlDocument, StructuredDocument};
use super::ExtractError;
use crate::domain::{ArtifactUsage, BuildTool};

/// Parse the nine build-tool snippets of a version page
pub fn parse_usage_snippets(html: &str) -> Result<ArtifactUsage, ExtractError> {
    usage_snippets_from(&HtmlDocument::parse(html))
}

/// Parse usage snippets from any structured document; all nine are required
pub fn usage_snippets_from<D: StructuredDocument>(doc: &D) -> Result<ArtifactUsage, ExtractError> {
    let root = doc.root();
    let snippet = |tool: BuildTool| -> Result<String, ExtractError> {
        let path = format!("#{}", tool.anchor_id());
        Ok(root.require(&path, tool.name())?.trimmed_text())
    };

    Ok(ArtifactUsage {
        maven: snippet(BuildTool::Maven)?,
        gradle: snippet(BuildTool::Gradle)?,
        gradle_short: snippet(BuildTool::GradleShort)?,
        gradle_kotlin: snippet(BuildTool::GradleKotlin)?,
        sbt: snippet(BuildTool::Sbt)?,
        ivy: snippet(BuildTool::Ivy)?,
        grape: snippet(BuildTool::Grape)?,
        leiningen: snippet(BuildTool::Leiningen)?,
        buildr: snippet(BuildTool::Buildr)?,
    })
}
