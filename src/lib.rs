//! mvnshelf - Maven registry search with local bookmark collections
//!
//! Searches a public artifact registry, reads artifact metadata and
//! build-tool usage snippets out of its pages, and keeps bookmarks of
//! artifact versions in user-defined directories.
//!
//! # Architecture
//!
//! Two independent pieces do the work:
//! - The extractor turns registry HTML into typed records
//! - The collections store keeps bookmark directories in key-value storage
//!
//! # Modules
//!
//! - `adapters`: Registry HTTP client (website + JSON search API)
//! - `collections`: Bookmark store and storage backends
//! - `domain`: Data structures (search rows, artifact info, collections)
//! - `extract`: HTML extraction behind a small document capability
//! - `preferences`: Build tool display settings
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Search the registry
//! mvnshelf search slf4j
//!
//! # Bookmark a version into the default directory
//! mvnshelf collect org.slf4j slf4j-api 2.0.13 --tool gradle
//!
//! # List bookmarks
//! mvnshelf dirs
//! ```

pub mod adapters;
pub mod cli;
pub mod collections;
pub mod config;
pub mod domain;
pub mod extract;
pub mod preferences;

// Re-export main types at crate root for convenience
pub use adapters::{RegistryClient, RegistryError};
pub use collections::{CollectionError, CollectionStore, JsonFileStorage, KeyValueStorage, MemoryStorage};
pub use domain::{
    ArtifactInfo, ArtifactUsage, ArtifactVersion, BuildTool, Collection, CollectionDirectory,
    SearchResult, SearchResultItem,
};
pub use extract::{parse_artifact_detail, parse_search_listing, parse_usage_snippets, ExtractError};
pub use preferences::UsagePreferences;
