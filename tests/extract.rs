//! Extractor Integration Tests
//!
//! Pins the registry page layouts the extractor understands. When the site
//! changes its markup, update the fixtures first and let these tests point
//! at the paths that moved.

use mvnshelf::domain::BuildTool;
use mvnshelf::extract::{
    parse_artifact_detail, parse_search_listing, parse_usage_snippets, ExtractError,
};

const SEARCH_PAGE: &str = include_str!("fixtures/search_listing.html");
const DETAIL_PAGE: &str = include_str!("fixtures/artifact_detail.html");
const USAGE_PAGE: &str = include_str!("fixtures/usage_page.html");

#[test]
fn test_search_listing_counts_and_rows() {
    let result = parse_search_listing(SEARCH_PAGE).unwrap();

    // Heading states "Showing 1 to 20 of 137 results"
    assert_eq!(result.total, 137);

    // Three genuine rows, one sponsored row dropped
    assert_eq!(result.items.len(), 3);
    assert_eq!(result.page_no, None);

    let indexes: Vec<u64> = result.items.iter().map(|i| i.index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
}

#[test]
fn test_search_listing_row_fields() {
    let result = parse_search_listing(SEARCH_PAGE).unwrap();
    let first = &result.items[0];

    assert_eq!(first.name, "SLF4J API Module");
    assert_eq!(first.group_id, "org.slf4j");
    assert_eq!(first.artifact_name, "slf4j-api");
    assert_eq!(first.link, "/artifact/org.slf4j/slf4j-api");
    assert_eq!(first.group_link, "/artifact/org.slf4j");
    assert_eq!(first.description, "The slf4j API");
    assert_eq!(first.last_release, "Last Release on Apr 12, 2024");

    let last = &result.items[2];
    assert_eq!(last.group_id, "ch.qos.logback");
    assert_eq!(last.artifact_name, "logback-classic");
}

#[test]
fn test_search_listing_skips_rows_without_index_marker() {
    let result = parse_search_listing(SEARCH_PAGE).unwrap();
    assert!(result
        .items
        .iter()
        .all(|item| !item.name.starts_with("Sponsored")));

    // Parsing twice yields the same result
    assert_eq!(parse_search_listing(SEARCH_PAGE).unwrap(), result);
}

#[test]
fn test_search_row_with_marker_but_no_subtitle_is_an_error() {
    let page = r#"<html><body><div class="page"><main><div class="content">
        <h2>Found 1 results</h2>
        <div class="im">
          <a href="/artifact/a/b">x</a>
          <div class="im-header"><h2 class="im-title"><span>1.</span><a href="/artifact/a/b">B</a></h2></div>
          <div class="im-description">d<div class="im-ann">Last Release</div></div>
        </div>
    </div></main></div></body></html>"#;

    let err = parse_search_listing(page).unwrap_err();
    assert!(matches!(
        err,
        ExtractError::StructureMismatch {
            what: "result subtitle",
            ..
        }
    ));
}

#[test]
fn test_artifact_detail_metadata() {
    let info = parse_artifact_detail(DETAIL_PAGE).unwrap();

    assert_eq!(info.name, "SLF4J API Module");
    assert_eq!(info.description, "The slf4j API");
    assert_eq!(info.categories, "Logging Frameworks");
    assert_eq!(info.tags, vec!["api", "logging", "slf4j"]);
}

#[test]
fn test_artifact_detail_versions_with_and_without_leading_cell() {
    let info = parse_artifact_detail(DETAIL_PAGE).unwrap();
    assert_eq!(info.versions.len(), 3);

    // Row with the "2.0.x" leading cell
    assert_eq!(info.versions[0].version, "2.0.13");
    assert_eq!(info.versions[0].repository, "Central");
    assert_eq!(info.versions[0].release_date, "Apr 12, 2024");

    // Row continuing the same major line, no leading cell
    assert_eq!(info.versions[1].version, "2.0.12");
    assert_eq!(info.versions[1].repository, "Central");
    assert_eq!(info.versions[1].release_date, "Jan 30, 2024");

    assert_eq!(info.versions[2].version, "1.7.36");
    assert_eq!(info.versions[2].release_date, "Feb 08, 2022");
}

#[test]
fn test_artifact_detail_without_metadata_table() {
    let page = r#"<html><body><div class="page"><main><div class="content">
        <div class="im">
          <div class="im-header"><h2><a href="/artifact/a/b">Bare</a></h2></div>
          <div class="im-description">No table here</div>
        </div>
    </div></main></div></body></html>"#;

    let info = parse_artifact_detail(page).unwrap();
    assert_eq!(info.name, "Bare");
    assert_eq!(info.categories, "");
    assert!(info.tags.is_empty());
    assert!(info.versions.is_empty());
}

#[test]
fn test_artifact_detail_labels_match_exactly() {
    let page = r#"<html><body><div class="page"><main><div class="content">
        <div class="im">
          <div class="im-header"><h2><a href="/artifact/a/b">Labels</a></h2></div>
          <div class="im-description">Near-miss labels</div>
        </div>
        <table><tbody>
          <tr><th>categories</th><td><a href="/c">Lower Case</a></td></tr>
          <tr><th>TAGS</th><td><a href="/t/x">x</a></td></tr>
          <tr><th> Tags </th><td><a href="/t/y">y</a></td></tr>
        </tbody></table>
    </div></main></div></body></html>"#;

    let info = parse_artifact_detail(page).unwrap();
    assert_eq!(info.categories, "");
    assert!(info.tags.is_empty());
}

#[test]
fn test_artifact_detail_missing_description_fails() {
    let page = r#"<html><body><div class="page"><main><div class="content">
        <div class="im"><div class="im-header"><h2><a href="/x">Only title</a></h2></div></div>
    </div></main></div></body></html>"#;

    let err = parse_artifact_detail(page).unwrap_err();
    assert!(matches!(
        err,
        ExtractError::StructureMismatch {
            what: "artifact description",
            ..
        }
    ));
}

#[test]
fn test_usage_snippets() {
    let usage = parse_usage_snippets(USAGE_PAGE).unwrap();

    assert!(usage.maven.contains("<artifactId>slf4j-api</artifactId>"));
    assert!(usage.maven.contains("<version>2.0.13</version>"));
    assert!(usage
        .gradle_short
        .ends_with("implementation 'org.slf4j:slf4j-api:2.0.13'"));
    assert!(usage.gradle_kotlin.contains("implementation(\"org.slf4j:slf4j-api:2.0.13\")"));
    assert_eq!(usage.leiningen, "[org.slf4j/slf4j-api \"2.0.13\"]");
    assert_eq!(usage.buildr, "'org.slf4j:slf4j-api:jar:2.0.13'");
    assert_eq!(usage.snippet(BuildTool::Ivy), usage.ivy);
}

#[test]
fn test_usage_snippets_missing_anchor_is_fatal() {
    let page = USAGE_PAGE.replace("id=\"sbt-a\"", "id=\"sbt-b\"");

    let err = parse_usage_snippets(&page).unwrap_err();
    match err {
        ExtractError::StructureMismatch { what, path } => {
            assert_eq!(what, "Sbt");
            assert_eq!(path, "#sbt-a");
        }
        other => panic!("unexpected error: {other}"),
    }
}
