//! SQLite
//!
//! Local store keeping one row per workout session. The serialized record is the source of truth,
//! the other columns exist for ordering and lookup.

use std::{path::Path, sync::Mutex};

use chrono::SecondsFormat;
use log::debug;
use rusqlite::{Connection, OptionalExtension, params};
use trainlog_domain as domain;

use crate::{LocalRow, LocalStore, record};

const SCHEMA_VERSION: i32 = 1;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS workouts (
        id TEXT PRIMARY KEY,
        date TEXT NOT NULL,
        data TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS workouts_date ON workouts (date);
";

pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, domain::StorageError> {
        debug!("opening local store {}", path.display());
        Self::initialize(Connection::open(path).map_err(storage_error)?)
    }

    pub fn open_in_memory() -> Result<Self, domain::StorageError> {
        Self::initialize(Connection::open_in_memory().map_err(storage_error)?)
    }

    fn initialize(connection: Connection) -> Result<Self, domain::StorageError> {
        let version: i32 = connection
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .map_err(storage_error)?;

        if version < SCHEMA_VERSION {
            debug!("creating local store schema (version {version} -> {SCHEMA_VERSION})");
            connection
                .execute_batch(&format!(
                    "BEGIN; {SCHEMA} PRAGMA user_version = {SCHEMA_VERSION}; COMMIT;"
                ))
                .map_err(storage_error)?;
        }

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, domain::StorageError> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| domain::StorageError::Other("local store lock poisoned".into()))?;
        f(&connection).map_err(storage_error)
    }
}

impl LocalStore for SqliteStore {
    async fn upsert(&self, row: &LocalRow) -> Result<(), domain::StorageError> {
        self.with_connection(|connection| {
            connection.execute(
                "INSERT OR REPLACE INTO workouts (id, date, data, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    row.id,
                    record::format_date(row.date),
                    row.data,
                    row.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                    row.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                ],
            )
        })?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), domain::StorageError> {
        self.with_connection(|connection| {
            connection.execute("DELETE FROM workouts WHERE id = ?1", params![id])
        })?;
        Ok(())
    }

    async fn select_all_ordered_by_date_desc(&self) -> Result<Vec<String>, domain::StorageError> {
        self.with_connection(|connection| {
            let mut statement = connection.prepare("SELECT data FROM workouts ORDER BY date DESC")?;
            let rows = statement
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>();
            rows
        })
    }

    async fn select_by_id(&self, id: &str) -> Result<Option<String>, domain::StorageError> {
        self.with_connection(|connection| {
            connection
                .query_row(
                    "SELECT data FROM workouts WHERE id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .optional()
        })
    }

    async fn delete_all(&self) -> Result<(), domain::StorageError> {
        self.with_connection(|connection| connection.execute("DELETE FROM workouts", []))?;
        Ok(())
    }
}

fn storage_error(err: rusqlite::Error) -> domain::StorageError {
    domain::StorageError::Other(Box::new(err))
}
