//! Search-results page extraction.

use tracing::debug;

use super::document::{DocumentNode, HtmlDocument, StructuredDocument};
use super::ExtractError;
use crate::domain::{SearchResult, SearchResultItem};

const COUNT_PATH: &str = "body > div.page > main > div.content > h2";
const ROW_PATH: &str = "body > div.page > main > div.content > div.im";

const INDEX_PATH: &str = "h2.im-title > span";
const LINK_PATH: &str = "a";
const TITLE_PATH: &str = "div.im-header > h2.im-title > a:nth-of-type(1)";
const SUBTITLE_PATH: &str = "div.im-header > p.im-subtitle";
const GROUP_PATH: &str = "a:nth-of-type(1)";
const ARTIFACT_PATH: &str = "a:nth-of-type(2)";
const DESCRIPTION_PATH: &str = "div.im-description";
const RELEASE_PATH: &str = "div.im-ann";

/// First run of ASCII digits in `text`
fn first_digit_run(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Total result count from the page heading.
///
/// Reads the first number in the text; for "Showing 1 to 20 of 137" style
/// headings the number after the last " of " wins. Returns 0 when no digits.
pub fn extract_result_size(text: &str) -> u64 {
    text.rfind(" of ")
        .and_then(|at| first_digit_run(&text[at + 4..]))
        .or_else(|| first_digit_run(text))
        .unwrap_or(0)
}

/// Ordinal of a result row ("1.", "#12"...). Returns 0 when no digits.
pub fn extract_index(text: &str) -> u64 {
    first_digit_run(text).unwrap_or(0)
}

/// Parse a search-results page
pub fn parse_search_listing(html: &str) -> Result<SearchResult, ExtractError> {
    search_listing_from(&HtmlDocument::parse(html))
}

/// Parse a search-results page from any structured document
pub fn search_listing_from<D: StructuredDocument>(doc: &D) -> Result<SearchResult, ExtractError> {
    let root = doc.root();

    let total = root
        .find(COUNT_PATH)?
        .map(|heading| extract_result_size(&heading.text()))
        .unwrap_or(0);

    let mut items = Vec::new();
    let mut skipped = 0usize;
    for row in root.find_all(ROW_PATH)? {
        match extract_item(&row)? {
            Some(item) => items.push(item),
            None => skipped += 1,
        }
    }

    debug!(total, parsed = items.len(), skipped, "Parsed search listing");

    Ok(SearchResult {
        total,
        page_no: None,
        items,
    })
}

/// Extract one row; `None` for rows without an index marker (ads and such)
fn extract_item<N: DocumentNode>(row: &N) -> Result<Option<SearchResultItem>, ExtractError> {
    let Some(marker) = row.find(INDEX_PATH)? else {
        return Ok(None);
    };
    let index = extract_index(&marker.text());

    let link = row
        .require(LINK_PATH, "result link")?
        .require_attr("href", "result link")?;
    let name = row.require(TITLE_PATH, "result title")?.trimmed_text();

    let subtitle = row.require(SUBTITLE_PATH, "result subtitle")?;
    let group = subtitle.require(GROUP_PATH, "group id link")?;
    let group_id = group.trimmed_text();
    let group_link = group.require_attr("href", "group id link")?;
    let artifact_name = subtitle.require(ARTIFACT_PATH, "artifact link")?.trimmed_text();

    let description_node = row.require(DESCRIPTION_PATH, "result description")?;
    let last_release = description_node
        .require(RELEASE_PATH, "last release")?
        .trimmed_text();
    let description = description_node
        .text_excluding(RELEASE_PATH)?
        .trim()
        .to_string();

    Ok(Some(SearchResultItem {
        index,
        group_id,
        artifact_name,
        name,
        link,
        group_link,
        description,
        last_release,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_result_size_defaults_to_zero() {
        assert_eq!(extract_result_size(""), 0);
        assert_eq!(extract_result_size("no digits here"), 0);
    }

    #[test]
    fn test_extract_result_size_reads_count() {
        assert_eq!(extract_result_size("Found 4821 results"), 4821);
        assert_eq!(extract_result_size("Showing 1 to 20 of 137 results"), 137);
        assert_eq!(extract_result_size("Showing 1 to 20 of many"), 1);
    }

    #[test]
    fn test_extract_index_takes_first_number() {
        assert_eq!(extract_index("1."), 1);
        assert_eq!(extract_index(" 12. 13"), 12);
        assert_eq!(extract_index("."), 0);
    }

    #[test]
    fn test_empty_page_has_no_items() {
        let result = parse_search_listing("<html><body></body></html>").unwrap();
        assert_eq!(result.total, 0);
        assert!(result.items.is_empty());
        assert_eq!(result.page_no, None);
    }
}
