//! Synchronized repository
//!
//! The local store is always written first and is the fallback for every read. When a sync token
//! is bound and a remote replica is configured, reads prefer the replica and mirror its rows into
//! the local store, while writes are forwarded to the replica on a best-effort basis. Failed
//! remote writes are logged and not retried. Mirroring only upserts, so rows deleted remotely by
//! another device stay in the local store and reappear when reads fall back to it.

use chrono::Utc;
use log::{debug, error, warn};
use trainlog_domain as domain;

use crate::{LocalRow, LocalStore, OnChange, RemoteError, RemoteReplica, Subscription, record};

macro_rules! log_remote_error {
    ($err: expr, $action: literal) => {
        match $err {
            RemoteError::NoConnection => debug!("failed to {}: no connection", $action),
            err => warn!("failed to {}: {err}", $action),
        }
    };
}

pub struct SyncRepository<L, R> {
    local: L,
    remote: Option<R>,
    token: Option<domain::SyncToken>,
}

impl<L: LocalStore, R: RemoteReplica> SyncRepository<L, R> {
    pub fn new(local: L, remote: Option<R>, token: Option<domain::SyncToken>) -> Self {
        Self {
            local,
            remote,
            token,
        }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn remote(&self) -> Option<&R> {
        self.remote.as_ref()
    }

    pub fn sync_token(&self) -> Option<&domain::SyncToken> {
        self.token.as_ref()
    }

    pub fn set_sync_token(&mut self, token: Option<domain::SyncToken>) {
        debug!(
            "sync token changed to {}",
            token.as_ref().map_or("none", domain::SyncToken::as_str)
        );
        self.token = token;
    }

    /// Remote mode requires both a bound token and a configured replica.
    pub fn is_remote(&self) -> bool {
        self.replica().is_some()
    }

    pub async fn clear_local(&self) -> Result<(), domain::DeleteError> {
        Ok(self.local.delete_all().await?)
    }

    /// Register for change notifications of the bound partition.
    ///
    /// Returns `None` in local mode or if the replica refused the subscription.
    pub fn subscribe(&self, on_change: OnChange) -> Option<Subscription> {
        let (remote, token) = self.replica()?;
        match remote.subscribe(token, on_change) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                log_remote_error!(err, "subscribe to workout changes");
                None
            }
        }
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        if let Some(remote) = &self.remote {
            remote.unsubscribe(subscription);
        }
    }

    fn replica(&self) -> Option<(&R, &domain::SyncToken)> {
        Some((self.remote.as_ref()?, self.token.as_ref()?))
    }

    async fn read_remote(
        remote: &R,
        token: &domain::SyncToken,
    ) -> Result<Vec<domain::WorkoutSession>, RemoteError> {
        let mut sessions = remote
            .select(token, None)
            .await?
            .into_iter()
            .map(domain::WorkoutSession::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RemoteError::Deserialization)?;
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sessions)
    }

    async fn read_local(&self) -> Result<Vec<domain::WorkoutSession>, domain::ReadError> {
        let mut sessions = self
            .local
            .select_all_ordered_by_date_desc()
            .await?
            .iter()
            .filter_map(|data| parse(data))
            .collect::<Vec<_>>();
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sessions)
    }

    async fn write_local(
        &self,
        session: &domain::WorkoutSession,
    ) -> Result<(), domain::StorageError> {
        let row = LocalRow::new(session).map_err(|err| domain::StorageError::Other(err.into()))?;
        self.local.upsert(&row).await
    }
}

impl<L: LocalStore, R: RemoteReplica> domain::WorkoutRepository for SyncRepository<L, R> {
    async fn get_all_workouts(&self) -> Result<Vec<domain::WorkoutSession>, domain::ReadError> {
        if let Some((remote, token)) = self.replica() {
            match Self::read_remote(remote, token).await {
                Ok(sessions) => {
                    for session in &sessions {
                        if let Err(err) = self.write_local(session).await {
                            error!("failed to write workout {} into local store: {err}", session.id);
                        }
                    }
                    return Ok(sessions);
                }
                Err(err) => log_remote_error!(err, "read workouts from remote, using local store"),
            }
        }

        self.read_local().await
    }

    async fn get_workout(
        &self,
        id: &domain::WorkoutSessionID,
    ) -> Result<Option<domain::WorkoutSession>, domain::ReadError> {
        Ok(self
            .local
            .select_by_id(id.as_str())
            .await?
            .and_then(|data| parse(&data)))
    }

    async fn save_workout(
        &self,
        mut session: domain::WorkoutSession,
    ) -> Result<domain::WorkoutSession, domain::WriteError> {
        session.updated_at = Utc::now();
        self.write_local(&session).await?;

        if let Some((remote, token)) = self.replica() {
            let result = match remote_row(&session, token) {
                Ok(row) => remote.upsert(row).await,
                Err(err) => Err(err),
            };
            if let Err(err) = result {
                log_remote_error!(err, "write workout to remote");
            }
        }

        Ok(session)
    }

    async fn delete_workout(
        &self,
        id: &domain::WorkoutSessionID,
    ) -> Result<domain::WorkoutSessionID, domain::DeleteError> {
        self.local.delete_by_id(id.as_str()).await?;

        if let Some((remote, token)) = self.replica() {
            if let Err(err) = remote.delete(token, id.as_str()).await {
                log_remote_error!(err, "delete workout from remote");
            }
        }

        Ok(id.clone())
    }
}

fn remote_row(
    session: &domain::WorkoutSession,
    token: &domain::SyncToken,
) -> Result<record::RemoteRow, RemoteError> {
    record::RemoteRow::new(session, token).map_err(RemoteError::Serialization)
}

fn parse(data: &str) -> Option<domain::WorkoutSession> {
    match record::WorkoutSession::from_json(data) {
        Ok(session) => Some(session.into()),
        Err(err) => {
            warn!("skipping unreadable workout in local store: {err}");
            None
        }
    }
}
