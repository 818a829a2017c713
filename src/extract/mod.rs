//! Markup extraction for registry pages.
//!
//! The registry publishes no stable API for artifact pages, so records are
//! read out of its HTML by structural position. Every path used here is
//! pinned by a fixture under `tests/fixtures/`; when the site changes its
//! layout the fixtures and paths change together.
//!
//! Failure policy:
//! - Counts and ordinals without digits read as 0
//! - Search rows without an index marker (ads, banners) are skipped
//! - Any other missing anchor is a [`ExtractError::StructureMismatch`]

pub mod artifact;
pub mod document;
pub mod search;
pub mod usage;

use thiserror::Error;

pub use artifact::{artifact_detail_from, parse_artifact_detail};
pub use document::{DocumentNode, HtmlDocument, HtmlNode, StructuredDocument};
pub use search::{extract_index, extract_result_size, parse_search_listing, search_listing_from};
pub use usage::{parse_usage_snippets, usage_snippets_from};

/// Errors raised when a page does not match a known layout
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Page layout changed: missing {what} at `{path}`")]
    StructureMismatch { what: &'static str, path: String },

    #[error("Page layout changed: {what} has no `{attr}` attribute")]
    MissingAttribute { what: &'static str, attr: String },

    #[error("Invalid selector `{path}`: {reason}")]
    InvalidSelector { path: String, reason: String },
}
