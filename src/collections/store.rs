//! Bookmark directories backed by key-value storage.
//!
//! The whole structure is kept in memory and rewritten on every mutation:
//! the directory list under [`DIRS_KEY`] and the ascending list of every
//! collection id ever allocated under [`IDS_KEY`].

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::storage::{KeyValueStorage, StorageError};
use crate::domain::collection::now_millis;
use crate::domain::{Collection, CollectionDirectory, SYSTEM_DIR_ID};

/// Storage key of the directory list
pub const DIRS_KEY: &str = "collection_dirs";

/// Storage key of the allocated collection ids
pub const IDS_KEY: &str = "collection_ids";

/// Errors raised by the collections store
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Collection directory not found: {0}")]
    DirectoryNotFound(u64),

    #[error("Collection {id} not found in directory {dir}")]
    CollectionNotFound { dir: u64, id: u64 },

    #[error("No default collection directory is set")]
    DefaultNotSet,

    #[error("System default directory missing")]
    SystemDefaultMissing,

    #[error("Directory {0} is the system default and cannot be removed")]
    SystemDirectoryProtected(u64),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// In-memory bookmark store persisted through `S`
#[derive(Debug)]
pub struct CollectionStore<S> {
    storage: S,
    dirs: Vec<CollectionDirectory>,
    ids: BTreeSet<u64>,
    max_id: u64,
    default_dir: Option<u64>,
}

impl<S: KeyValueStorage> CollectionStore<S> {
    /// Load the store from `storage`.
    ///
    /// Empty storage yields the single seeded system directory. The system
    /// directory is also restored when stored data lacks it, and takes the
    /// default when no stored directory holds the flag. A missing id index is
    /// rebuilt from the loaded collections.
    pub fn load(storage: S) -> Result<Self, CollectionError> {
        let mut dirs: Vec<CollectionDirectory> = match storage.get(DIRS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => {
                debug!("No stored directories, seeding system default");
                vec![CollectionDirectory::system_default()]
            }
        };

        let mut ids: BTreeSet<u64> = match storage.get(IDS_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<u64>>(&raw)?.into_iter().collect(),
            None => {
                debug!("No stored id index, rebuilding from directories");
                BTreeSet::new()
            }
        };
        ids.extend(dirs.iter().flat_map(|d| d.collections.iter().map(|c| c.id)));

        if !dirs.iter().any(|d| d.id == SYSTEM_DIR_ID) {
            warn!("Stored directories lack the system directory, restoring it");
            let mut system = CollectionDirectory::system_default();
            system.is_default = false;
            dirs.insert(0, system);
        }

        let default_dir = match normalize_default(&mut dirs) {
            Some(id) => id,
            None => {
                warn!("No stored default directory, falling back to the system directory");
                if let Some(system) = dirs.iter_mut().find(|d| d.id == SYSTEM_DIR_ID) {
                    system.is_default = true;
                }
                SYSTEM_DIR_ID
            }
        };
        let max_id = ids.last().copied().unwrap_or(0);

        debug!(
            dirs = dirs.len(),
            ids = ids.len(),
            ?default_dir,
            "Loaded collection store"
        );

        Ok(Self {
            storage,
            dirs,
            ids,
            max_id,
            default_dir: Some(default_dir),
        })
    }

    /// Persist directories and the id index, overwriting prior content
    pub fn save(&mut self) -> Result<(), CollectionError> {
        let dirs = serde_json::to_string(&self.dirs)?;
        let ids = serde_json::to_string(&self.ids.iter().collect::<Vec<_>>())?;

        self.storage.set(DIRS_KEY, &dirs)?;
        self.storage.set(IDS_KEY, &ids)?;

        debug!(dirs = self.dirs.len(), ids = self.ids.len(), "Saved collection store");
        Ok(())
    }

    /// Allocate a new collection. It is not placed in any directory.
    pub fn create_collection(
        &mut self,
        group_id: impl Into<String>,
        artifact_name: impl Into<String>,
        version: impl Into<String>,
        action: impl Into<String>,
        usage: impl Into<String>,
    ) -> Collection {
        self.max_id += 1;
        self.ids.insert(self.max_id);

        Collection {
            id: self.max_id,
            group_id: group_id.into(),
            artifact_name: artifact_name.into(),
            version: version.into(),
            action: action.into(),
            usage: usage.into(),
            created_at: now_millis(),
        }
    }

    /// Append a collection to a directory and persist
    pub fn add_collection_to_dir(
        &mut self,
        dir_id: u64,
        collection: Collection,
    ) -> Result<(), CollectionError> {
        let dir = self.dir_mut(dir_id)?;
        dir.collections.push(collection);
        dir.touch();
        self.save()
    }

    /// Append a collection to the current default directory and persist
    pub fn add_collection_to_default_dir(
        &mut self,
        collection: Collection,
    ) -> Result<(), CollectionError> {
        let dir_id = self.default_dir.ok_or(CollectionError::DefaultNotSet)?;
        self.add_collection_to_dir(dir_id, collection)
    }

    /// Create a directory, optionally making it the default. Returns its id.
    pub fn create_collection_dir(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        is_default: bool,
    ) -> Result<u64, CollectionError> {
        let id = self.dirs.iter().map(|d| d.id).max().unwrap_or(SYSTEM_DIR_ID) + 1;

        let mut dir = CollectionDirectory::new(id, name, description);
        if is_default {
            for existing in &mut self.dirs {
                existing.is_default = false;
            }
            dir.is_default = true;
            self.default_dir = Some(dir.id);
        }

        info!(id, name = %dir.name, is_default, "Created collection directory");
        self.dirs.push(dir);
        self.save()?;
        Ok(id)
    }

    /// Remove every directory whose id is in `ids`. Returns how many were removed.
    ///
    /// The system directory cannot be removed. When the current default goes,
    /// the system directory becomes the default again.
    pub fn remove_collection_dirs(&mut self, ids: &[u64]) -> Result<usize, CollectionError> {
        if ids.contains(&SYSTEM_DIR_ID) {
            return Err(CollectionError::SystemDirectoryProtected(SYSTEM_DIR_ID));
        }

        let removes_default = self.default_dir.is_some_and(|d| ids.contains(&d));
        if removes_default && !self.dirs.iter().any(|d| d.id == SYSTEM_DIR_ID) {
            return Err(CollectionError::SystemDefaultMissing);
        }

        let before = self.dirs.len();
        self.dirs.retain(|d| !ids.contains(&d.id));
        let removed = before - self.dirs.len();

        if removes_default {
            if let Some(system) = self.dirs.iter_mut().find(|d| d.id == SYSTEM_DIR_ID) {
                system.is_default = true;
                system.touch();
            }
            self.default_dir = Some(SYSTEM_DIR_ID);
            info!("Default directory removed, system directory is default again");
        }

        info!(removed, "Removed collection directories");
        self.save()?;
        Ok(removed)
    }

    /// Remove one collection from a directory. Its id stays retired.
    pub fn remove_collection_from(
        &mut self,
        dir_id: u64,
        collect_id: u64,
    ) -> Result<(), CollectionError> {
        let dir = self.dir_mut(dir_id)?;

        let before = dir.collections.len();
        dir.collections.retain(|c| c.id != collect_id);
        if dir.collections.len() == before {
            return Err(CollectionError::CollectionNotFound {
                dir: dir_id,
                id: collect_id,
            });
        }

        dir.touch();
        self.save()
    }

    /// Make an existing directory the default
    pub fn set_default_dir(&mut self, dir_id: u64) -> Result<(), CollectionError> {
        self.dir_mut(dir_id)?;

        for dir in &mut self.dirs {
            dir.is_default = dir.id == dir_id;
        }
        self.default_dir = Some(dir_id);
        self.save()
    }

    /// Whether the exact (group, artifact, version) triple is bookmarked anywhere
    pub fn is_artifact_collected(&self, group_id: &str, artifact_name: &str, version: &str) -> bool {
        self.dirs.iter().any(|dir| {
            dir.collections
                .iter()
                .any(|c| c.is_artifact(group_id, artifact_name, version))
        })
    }

    /// Every bookmark of an artifact, any version, with its directory
    pub fn collections_of(
        &self,
        group_id: &str,
        artifact_name: &str,
    ) -> Vec<(&CollectionDirectory, &Collection)> {
        self.dirs
            .iter()
            .flat_map(|dir| dir.collections.iter().map(move |c| (dir, c)))
            .filter(|(_, c)| c.group_id == group_id && c.artifact_name == artifact_name)
            .collect()
    }

    pub fn directories(&self) -> &[CollectionDirectory] {
        &self.dirs
    }

    pub fn directory(&self, dir_id: u64) -> Option<&CollectionDirectory> {
        self.dirs.iter().find(|d| d.id == dir_id)
    }

    pub fn default_dir_id(&self) -> Option<u64> {
        self.default_dir
    }

    /// Every collection id ever allocated, ascending
    pub fn known_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids.iter().copied()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn dir_mut(&mut self, dir_id: u64) -> Result<&mut CollectionDirectory, CollectionError> {
        self.dirs
            .iter_mut()
            .find(|d| d.id == dir_id)
            .ok_or(CollectionError::DirectoryNotFound(dir_id))
    }
}

/// Keep at most one default flag; returns the default directory id
fn normalize_default(dirs: &mut [CollectionDirectory]) -> Option<u64> {
    let mut default_dir = None;
    for dir in dirs.iter_mut().filter(|d| d.is_default) {
        if default_dir.is_none() {
            default_dir = Some(dir.id);
        } else {
            warn!(id = dir.id, "Multiple default directories stored, clearing flag");
            dir.is_default = false;
        }
    }
    default_dir
}
