//! Usage display preferences.
//!
//! Which build tools are shown, in what order, which one is preselected,
//! and user-defined snippet templates. Stored as one JSON blob under the
//! `config` key of the same storage the collections use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::collections::{KeyValueStorage, StorageError};
use crate::domain::collection::now_millis;
use crate::domain::BuildTool;

/// Storage key of the preferences blob
pub const PREFERENCES_KEY: &str = "config";

/// A user-defined usage template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomUsage {
    /// Template text with `${groupId}`, `${artifactId}` and `${version}` placeholders
    pub template: String,

    /// Name shown next to the built-in tools
    pub tool_name: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl CustomUsage {
    pub fn new(tool_name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            tool_name: tool_name.into(),
            created_at: now_millis(),
        }
    }

    /// Fill the placeholders with concrete coordinates
    pub fn render(&self, group_id: &str, artifact_id: &str, version: &str) -> String {
        self.template
            .replace("${groupId}", group_id)
            .replace("${artifactId}", artifact_id)
            .replace("${version}", version)
    }
}

/// Build-tool display preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePreferences {
    /// Tool preselected when an artifact version is opened
    pub default_tool: BuildTool,

    /// Shown tools with priority; lower shows first
    pub shown_tools: Vec<(u32, BuildTool)>,

    #[serde(default)]
    pub custom_templates: Vec<CustomUsage>,
}

impl Default for UsagePreferences {
    fn default() -> Self {
        Self {
            default_tool: BuildTool::Maven,
            shown_tools: BuildTool::ALL
                .into_iter()
                .enumerate()
                .map(|(priority, tool)| (priority as u32, tool))
                .collect(),
            custom_templates: Vec::new(),
        }
    }
}

impl UsagePreferences {
    /// Load preferences, falling back to defaults when none are stored
    pub fn load<S: KeyValueStorage>(storage: &S) -> Result<Self, PreferencesError> {
        match storage.get(PREFERENCES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => {
                debug!("No stored preferences, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn save<S: KeyValueStorage>(&self, storage: &mut S) -> Result<(), PreferencesError> {
        let raw = serde_json::to_string(self)?;
        storage.set(PREFERENCES_KEY, &raw)?;
        Ok(())
    }

    /// Shown tools ordered by priority
    pub fn ordered_tools(&self) -> Vec<BuildTool> {
        let mut tools = self.shown_tools.clone();
        tools.sort_by_key(|(priority, _)| *priority);
        tools.into_iter().map(|(_, tool)| tool).collect()
    }

    /// Custom template by tool name
    pub fn custom_template(&self, tool_name: &str) -> Option<&CustomUsage> {
        self.custom_templates
            .iter()
            .find(|c| c.tool_name == tool_name)
    }
}

/// Errors loading or saving preferences
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid preferences JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
