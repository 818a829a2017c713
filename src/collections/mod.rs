//! Local bookmark collections.
//!
//! Bookmarks are grouped into directories, exactly one of which is the
//! default at any time. The store is persisted as two JSON blobs in a
//! key-value backend:
//!
//! ```text
//! collection_dirs   [{"id":1,"name":"default collection set","isDefault":true,"collections":[...]}, ...]
//! collection_ids    [1, 2, 5, 6]
//! ```

pub mod storage;
pub mod store;

pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{CollectionError, CollectionStore, DIRS_KEY, IDS_KEY};
