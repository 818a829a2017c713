//! Bookmarks and the directories that group them.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Id of the directory seeded on first use; the fallback default
pub const SYSTEM_DIR_ID: u64 = 1;

/// Name given to the seeded directory
pub const SYSTEM_DIR_NAME: &str = "default collection set";

/// Current time truncated to millisecond precision, matching the
/// persisted representation so instants survive a save/load unchanged.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A bookmarked artifact version together with a usage snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Store-wide unique id, never reused
    pub id: u64,

    pub group_id: String,
    pub artifact_name: String,
    pub version: String,

    /// Build-tool tag the snippet was taken for (e.g. `Maven`)
    pub action: String,

    /// Usage snippet text
    pub usage: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Collection {
    /// Exact coordinate match
    pub fn is_artifact(&self, group_id: &str, artifact_name: &str, version: &str) -> bool {
        self.group_id == group_id && self.artifact_name == artifact_name && self.version == version
    }
}

/// A named, ordered group of bookmarks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDirectory {
    pub id: u64,
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,

    pub is_default: bool,

    #[serde(default)]
    pub collections: Vec<Collection>,
}

impl CollectionDirectory {
    /// Create an empty directory
    pub fn new(id: u64, name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id,
            name: name.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
            is_default: false,
            collections: Vec::new(),
        }
    }

    /// The directory seeded into an empty store
    pub fn system_default() -> Self {
        let mut dir = Self::new(SYSTEM_DIR_ID, SYSTEM_DIR_NAME, "");
        dir.is_default = true;
        dir
    }

    /// Mark the directory as modified
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_default_directory() {
        let dir = CollectionDirectory::system_default();
        assert_eq!(dir.id, SYSTEM_DIR_ID);
        assert!(dir.is_default);
        assert!(dir.is_empty());
    }

    #[test]
    fn test_directory_timestamps_roundtrip() {
        let dir = CollectionDirectory::new(7, "web", "http clients");
        let json = serde_json::to_string(&dir).unwrap();
        assert!(json.contains("\"isDefault\":false"));

        let parsed: CollectionDirectory = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dir);
    }

    #[test]
    fn test_is_artifact_requires_full_triple() {
        let collection = Collection {
            id: 1,
            group_id: "org.slf4j".to_string(),
            artifact_name: "slf4j-api".to_string(),
            version: "2.0.13".to_string(),
            action: "Maven".to_string(),
            usage: String::new(),
            created_at: now_millis(),
        };

        assert!(collection.is_artifact("org.slf4j", "slf4j-api", "2.0.13"));
        assert!(!collection.is_artifact("org.slf4j", "slf4j-api", "2.0.12"));
        assert!(!collection.is_artifact("org.slf4j", "slf4j-simple", "2.0.13"));
    }
}
