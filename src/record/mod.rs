//! Records - Typed CRUD storage for the admin console's entity collections.
//!
//! Records provide a simple CRUD abstraction for storing typed data,
//! used by the admin store for its course/topic/word/user collections.
//!
//! ## Example
//!
//! ```ignore
//! use lexideck::{InMemoryRecordStore, Record, RecordsExt, Versioned};
//!
//! #[derive(Serialize, Deserialize, Clone, Record)]
//! #[record(collection = "courses")]
//! struct Course {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! let store = InMemoryRecordStore::new();
//! store.records::<Course>().save(&course)?;
//! let loaded = store.records::<Course>().get("c-1")?;
//! ```

mod in_memory;
mod repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Trait for types that can be stored as records.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g., "courses", "topics").
    /// One collection per entity kind; keys in the store are prefixed with it.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this record instance.
    fn id(&self) -> &str;
}

/// A versioned wrapper around record data for optimistic concurrency control.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for record store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Optimistic concurrency conflict.
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
    /// Record not found.
    NotFound { collection: String, id: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::ConcurrencyConflict {
                collection,
                id,
                expected,
                actual,
            } => write!(
                f,
                "concurrency conflict on {}:{} (expected version {}, actual {})",
                collection, id, expected, actual
            ),
            RecordError::Serde(msg) => write!(f, "record serialization error: {}", msg),
            RecordError::Storage(msg) => write!(f, "record storage error: {}", msg),
            RecordError::NotFound { collection, id } => {
                write!(f, "record not found: {}:{}", collection, id)
            }
        }
    }
}

impl std::error::Error for RecordError {}

impl From<bitcode::Error> for RecordError {
    fn from(err: bitcode::Error) -> Self {
        RecordError::Serde(err.to_string())
    }
}

pub use in_memory::InMemoryRecordStore;
pub use repository::{RecordRepository, RecordsExt};
pub use store::RecordStore;
