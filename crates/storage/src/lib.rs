#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use trainlog_domain as domain;

pub mod legacy;
pub mod record;
pub mod rest;
pub mod sqlite;
pub mod synced;

pub use record::RemoteRow;

/// Persistent store on the device. Always available.
#[allow(async_fn_in_trait)]
pub trait LocalStore {
    async fn upsert(&self, row: &LocalRow) -> Result<(), domain::StorageError>;
    async fn delete_by_id(&self, id: &str) -> Result<(), domain::StorageError>;
    /// Serialized records, most recent session first.
    async fn select_all_ordered_by_date_desc(&self) -> Result<Vec<String>, domain::StorageError>;
    async fn select_by_id(&self, id: &str) -> Result<Option<String>, domain::StorageError>;
    async fn delete_all(&self) -> Result<(), domain::StorageError>;
}

/// Row of the local store.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalRow {
    pub id: String,
    pub date: NaiveDateTime,
    /// Serialized record
    pub data: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocalRow {
    pub fn new(session: &domain::WorkoutSession) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: session.id.to_string(),
            date: session.date,
            data: record::WorkoutSession::from(session).to_json()?,
            created_at: session.created_at,
            updated_at: session.updated_at,
        })
    }
}

/// Shared store partitioned by sync token. May be unreachable at any time.
#[allow(async_fn_in_trait)]
pub trait RemoteReplica {
    /// Rows of the partition, most recent session first.
    async fn select(
        &self,
        token: &domain::SyncToken,
        id: Option<&str>,
    ) -> Result<Vec<RemoteRow>, RemoteError>;
    async fn upsert(&self, row: RemoteRow) -> Result<(), RemoteError>;
    async fn delete(&self, token: &domain::SyncToken, id: &str) -> Result<(), RemoteError>;
    /// Invoke `on_change` whenever the rows of the partition change.
    fn subscribe(
        &self,
        token: &domain::SyncToken,
        on_change: OnChange,
    ) -> Result<Subscription, RemoteError>;
    fn unsubscribe(&self, subscription: Subscription);
}

pub type OnChange = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub id: u64,
}

#[derive(thiserror::Error, Debug)]
pub enum RemoteError {
    #[error("no connection")]
    NoConnection,
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("deserialization failed: {0}")]
    Deserialization(serde_json::Error),
    #[error("serialization failed: {0}")]
    Serialization(serde_json::Error),
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_connect() || value.is_timeout() {
            RemoteError::NoConnection
        } else {
            RemoteError::Other(Box::new(value))
        }
    }
}
