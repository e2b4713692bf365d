//! RecordStore - Abstract CRUD storage for records.

use super::{Record, RecordError, Versioned};

/// Abstract CRUD storage for records.
pub trait RecordStore: Send + Sync {
    /// Get a record by ID. Returns None if not found.
    fn get_record<M: Record>(&self, id: &str) -> Result<Option<Versioned<M>>, RecordError>;

    /// Upsert a record (insert or update, no version check).
    fn save_record<M: Record>(&self, record: &M) -> Result<Versioned<M>, RecordError>;

    /// Insert a new record. Fails if it already exists.
    fn insert_record<M: Record>(&self, record: &M) -> Result<Versioned<M>, RecordError>;

    /// Update an existing record with optimistic concurrency control.
    fn update_record<M: Record>(
        &self,
        record: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, RecordError>;

    /// Delete a record by ID. Returns true if it existed.
    fn delete_record<M: Record>(&self, id: &str) -> Result<bool, RecordError>;

    /// Find records matching a predicate.
    fn find_records<M: Record>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, RecordError>;
}
