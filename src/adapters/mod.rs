//! Adapters for external systems.
//!
//! The registry is the only one: its website (scraped through
//! [`crate::extract`]) and its structured JSON search API.

pub mod registry;
pub mod solr;

pub use registry::{RegistryClient, RegistryError};
pub use solr::{SolrArtifactDoc, SolrResponseBody, SolrResponseHeader, SolrSearchResponse};
