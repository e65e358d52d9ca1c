/// SQLite storage adapter
///
/// Implements StoragePort for SQLite database operations.
use crate::domain::models::{MeetingRecord, Sentiment, User};
use crate::error::{AppError, Result};
use crate::ports::storage::StoragePort;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

const RECORD_COLUMNS: &str =
    "id, title, summary, created_at, sentiment, participant_count, keywords";

/// SQLite storage implementation
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Create a new SQLite storage with the given database path
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_connection(Connection::open(db_path)?))
    }

    /// Create a storage backed by a private in-memory database
    pub fn in_memory() -> Result<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run database migrations
    pub fn run_migrations(&self) -> Result<()> {
        use rusqlite_migration::{Migrations, M};

        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../../migrations/001_initial.sql"
        ))]);

        let mut conn = self.conn()?;
        migrations.to_latest(&mut conn)?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Other("Database connection lock poisoned".to_string()))
    }
}

fn conversion_error(
    idx: usize,
    ty: Type,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, ty, Box::new(err))
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<MeetingRecord> {
    let created_at: String = row.get(3)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| conversion_error(3, Type::Text, e))?
        .with_timezone(&Utc);

    let sentiment: String = row.get(4)?;
    let sentiment = sentiment
        .parse::<Sentiment>()
        .map_err(|e| {
            conversion_error(4, Type::Text, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

    let keywords: String = row.get(6)?;
    let keywords: Vec<String> =
        serde_json::from_str(&keywords).map_err(|e| conversion_error(6, Type::Text, e))?;

    Ok(MeetingRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        summary: row.get(2)?,
        created_at,
        sentiment,
        participant_count: row.get(5)?,
        keywords,
    })
}

#[async_trait]
impl StoragePort for SqliteStorage {
    async fn save_user(&self, user: &User) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO users (id, email, name, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![user.id, user.email, user.name, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, email, name FROM users WHERE id = ?1",
                params![id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        name: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    async fn list_records(&self, user_id: &str) -> Result<Vec<MeetingRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM meeting_records WHERE user_id = ?1 ORDER BY seq DESC",
            RECORD_COLUMNS
        ))?;

        let rows = stmt.query_map(params![user_id], record_from_row)?;

        let mut records = Vec::new();
        for record_result in rows {
            records.push(record_result?);
        }

        Ok(records)
    }

    async fn get_record(&self, user_id: &str, id: &str) -> Result<Option<MeetingRecord>> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                &format!(
                    "SELECT {} FROM meeting_records WHERE user_id = ?1 AND id = ?2",
                    RECORD_COLUMNS
                ),
                params![user_id, id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    async fn append_record(&self, user_id: &str, record: &MeetingRecord) -> Result<bool> {
        let keywords = serde_json::to_string(&record.keywords)?;
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO meeting_records
             (user_id, id, title, summary, created_at, sentiment, participant_count, keywords)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user_id,
                record.id,
                record.title,
                record.summary,
                record
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                record.sentiment.as_str(),
                record.participant_count,
                keywords,
            ],
        )?;
        Ok(inserted == 1)
    }

    async fn remove_record(&self, user_id: &str, id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM meeting_records WHERE user_id = ?1 AND id = ?2",
            params![user_id, id],
        )?;
        Ok(removed > 0)
    }
}
