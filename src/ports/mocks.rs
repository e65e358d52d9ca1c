//! Mock implementations for testing

use crate::domain::models::{MeetingRecord, User};
use crate::error::{AppError, Result};
use crate::ports::storage::StoragePort;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock storage implementation for testing
#[derive(Clone, Default)]
pub struct MockStorage {
    users: Arc<Mutex<HashMap<String, User>>>,
    records: Arc<Mutex<HashMap<String, Vec<MeetingRecord>>>>,
    fail_reads: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose record reads always fail, for degrade-to-empty paths
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl StoragePort for MockStorage {
    async fn save_user(&self, user: &User) -> Result<()> {
        self.users
            .lock()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn list_records(&self, user_id: &str) -> Result<Vec<MeetingRecord>> {
        if self.fail_reads {
            return Err(AppError::Other("simulated read failure".to_string()));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_record(&self, user_id: &str, id: &str) -> Result<Option<MeetingRecord>> {
        Ok(self
            .list_records(user_id)
            .await?
            .into_iter()
            .find(|r| r.id == id))
    }

    async fn append_record(&self, user_id: &str, record: &MeetingRecord) -> Result<bool> {
        let mut records = self.records.lock().unwrap();
        let list = records.entry(user_id.to_string()).or_default();
        if list.iter().any(|r| r.id == record.id) {
            return Ok(false);
        }
        list.insert(0, record.clone());
        Ok(true)
    }

    async fn remove_record(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut records = self.records.lock().unwrap();
        let Some(list) = records.get_mut(user_id) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|r| r.id != id);
        Ok(list.len() != before)
    }
}
