//! RecordRepository - Typed accessor for record CRUD operations.

use std::marker::PhantomData;

use super::{Record, RecordError, RecordStore, Versioned};

/// Typed repository wrapper for accessing records of a specific type.
pub struct RecordRepository<'a, S, M> {
    store: &'a S,
    _marker: PhantomData<M>,
}

impl<'a, S: RecordStore, M: Record> RecordRepository<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Get a record by ID.
    pub fn get(&self, id: &str) -> Result<Option<Versioned<M>>, RecordError> {
        self.store.get_record(id)
    }

    /// Upsert a record (insert or update, no version check).
    pub fn save(&self, record: &M) -> Result<Versioned<M>, RecordError> {
        self.store.save_record(record)
    }

    /// Insert a new record. Fails if it already exists.
    pub fn insert(&self, record: &M) -> Result<Versioned<M>, RecordError> {
        self.store.insert_record(record)
    }

    /// Update an existing record with optimistic concurrency.
    pub fn update(&self, record: &M, expected_version: u64) -> Result<Versioned<M>, RecordError> {
        self.store.update_record(record, expected_version)
    }

    /// Delete a record by ID. Returns true if it existed.
    pub fn delete(&self, id: &str) -> Result<bool, RecordError> {
        self.store.delete_record::<M>(id)
    }

    /// Find records matching a predicate.
    pub fn find(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Vec<Versioned<M>>, RecordError> {
        self.store.find_records(predicate)
    }
}

/// Extension trait for typed record access on any RecordStore.
pub trait RecordsExt: RecordStore + Sized {
    /// Get a typed record repository.
    fn records<M: Record>(&self) -> RecordRepository<'_, Self, M> {
        RecordRepository::new(self)
    }
}

impl<S: RecordStore> RecordsExt for S {}
