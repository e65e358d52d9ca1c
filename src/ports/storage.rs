/// Storage port trait
///
/// Defines the interface for the per-user record store.
/// Implementation: SQLite adapter
use crate::domain::models::{MeetingRecord, User};
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for storage operations
///
/// Records are always scoped by user id. Listing returns records in store
/// order, which is newest-first.
#[async_trait]
pub trait StoragePort: Send + Sync {
    // User operations
    /// Save (insert or replace) a demo user
    async fn save_user(&self, user: &User) -> Result<()>;

    /// Get a user by ID
    async fn get_user(&self, id: &str) -> Result<Option<User>>;

    // Meeting record operations
    /// List all records for a user, newest first
    async fn list_records(&self, user_id: &str) -> Result<Vec<MeetingRecord>>;

    /// Get a single record
    async fn get_record(&self, user_id: &str, id: &str) -> Result<Option<MeetingRecord>>;

    /// Add a record in front of the user's collection.
    ///
    /// Returns `false` without touching the collection when the id is
    /// already present.
    async fn append_record(&self, user_id: &str, record: &MeetingRecord) -> Result<bool>;

    /// Remove a record; returns `false` if no record had that id
    async fn remove_record(&self, user_id: &str, id: &str) -> Result<bool>;
}
