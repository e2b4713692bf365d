//! InMemoryRecordStore - HashMap-backed record store.
//!
//! The only storage the admin console has: state lives for the lifetime of
//! the store and dies with it. Record bytes are bitcode-encoded.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Record, RecordError, RecordStore, Versioned};

/// Internal stored representation of a record.
struct StoredRecord {
    bytes: Vec<u8>,
    version: u64,
}

/// In-memory record store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc: clones share
/// the same underlying storage.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    storage: Arc<RwLock<HashMap<String, StoredRecord>>>,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    /// Create a new empty record store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get_record<M: Record>(&self, id: &str) -> Result<Option<Versioned<M>>, RecordError> {
        let key = Self::make_key(M::COLLECTION, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| RecordError::Storage("lock poisoned".into()))?;

        match storage.get(&key) {
            Some(stored) => {
                let data: M = bitcode::deserialize(&stored.bytes)?;
                Ok(Some(Versioned {
                    data,
                    version: stored.version,
                }))
            }
            None => Ok(None),
        }
    }

    fn save_record<M: Record>(&self, record: &M) -> Result<Versioned<M>, RecordError> {
        let key = Self::make_key(M::COLLECTION, record.id());
        let bytes = bitcode::serialize(record)?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| RecordError::Storage("lock poisoned".into()))?;

        let new_version = storage.get(&key).map(|s| s.version + 1).unwrap_or(1);

        storage.insert(
            key,
            StoredRecord {
                bytes,
                version: new_version,
            },
        );

        Ok(Versioned {
            data: record.clone(),
            version: new_version,
        })
    }

    fn insert_record<M: Record>(&self, record: &M) -> Result<Versioned<M>, RecordError> {
        let key = Self::make_key(M::COLLECTION, record.id());
        let bytes = bitcode::serialize(record)?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| RecordError::Storage("lock poisoned".into()))?;

        if storage.contains_key(&key) {
            return Err(RecordError::ConcurrencyConflict {
                collection: M::COLLECTION.to_string(),
                id: record.id().to_string(),
                expected: 0,
                actual: storage[&key].version,
            });
        }

        storage.insert(key, StoredRecord { bytes, version: 1 });

        Ok(Versioned {
            data: record.clone(),
            version: 1,
        })
    }

    fn update_record<M: Record>(
        &self,
        record: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, RecordError> {
        let key = Self::make_key(M::COLLECTION, record.id());
        let bytes = bitcode::serialize(record)?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| RecordError::Storage("lock poisoned".into()))?;

        let actual_version = storage
            .get(&key)
            .map(|s| s.version)
            .ok_or_else(|| RecordError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: record.id().to_string(),
            })?;

        if actual_version != expected_version {
            return Err(RecordError::ConcurrencyConflict {
                collection: M::COLLECTION.to_string(),
                id: record.id().to_string(),
                expected: expected_version,
                actual: actual_version,
            });
        }

        let new_version = actual_version + 1;
        storage.insert(
            key,
            StoredRecord {
                bytes,
                version: new_version,
            },
        );

        Ok(Versioned {
            data: record.clone(),
            version: new_version,
        })
    }

    fn delete_record<M: Record>(&self, id: &str) -> Result<bool, RecordError> {
        let key = Self::make_key(M::COLLECTION, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| RecordError::Storage("lock poisoned".into()))?;

        Ok(storage.remove(&key).is_some())
    }

    fn find_records<M: Record>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, RecordError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| RecordError::Storage("lock poisoned".into()))?;

        let prefix = format!("{}:", M::COLLECTION);
        let mut results = Vec::new();

        for (key, stored) in storage.iter() {
            if key.starts_with(&prefix) {
                if let Ok(data) = bitcode::deserialize::<M>(&stored.bytes) {
                    if predicate(&data) {
                        results.push(Versioned {
                            data,
                            version: stored.version,
                        });
                    }
                }
            }
        }

        Ok(results)
    }
}
