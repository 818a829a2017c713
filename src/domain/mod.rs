//! Domain types for mvnshelf.
//!
//! This module contains the core data structures:
//! - Artifact records: search rows, detail metadata, usage snippets
//! - Collections: bookmarks and their directories

pub mod artifact;
pub mod collection;

// Re-export commonly used types
pub use artifact::{
    ArtifactInfo, ArtifactUsage, ArtifactVersion, BuildTool, SearchResult, SearchResultItem,
};
pub use collection::{Collection, CollectionDirectory, SYSTEM_DIR_ID, SYSTEM_DIR_NAME};
