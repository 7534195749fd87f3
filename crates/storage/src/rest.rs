//! REST
//!
//! Remote replica backed by a PostgREST endpoint. All rows live in a single `workouts` table and
//! are partitioned by the `sync_code` column. Change notifications are derived by polling.

use std::{
    collections::{BTreeSet, HashMap},
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use log::{debug, error};
use reqwest::{Method, Url};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use trainlog_domain as domain;

use crate::{OnChange, RemoteError, RemoteReplica, RemoteRow, Subscription};

const TABLE: &str = "workouts";
const TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait SendRequest: Send + Sync + 'static {
    fn send_request(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, RemoteError>> + Send;
}

#[derive(Clone)]
pub struct ReqwestSendRequest {
    client: reqwest::Client,
}

impl ReqwestSendRequest {
    pub fn new() -> Result<Self, RemoteError> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(TIMEOUT).build()?,
        })
    }
}

impl SendRequest for ReqwestSendRequest {
    fn send_request(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, RemoteError>> + Send {
        let client = self.client.clone();
        async move {
            let mut builder = client.request(request.method, request.url);
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(body);
            }
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        }
    }
}

pub struct Rest<S: SendRequest> {
    client: Arc<Client<S>>,
    poll_interval: Duration,
    subscriptions: Mutex<HashMap<u64, JoinHandle<()>>>,
    next_subscription: AtomicU64,
}

impl Rest<ReqwestSendRequest> {
    pub fn new(url: &str, api_key: &str) -> Result<Self, RemoteError> {
        Self::with_sender(url, api_key, ReqwestSendRequest::new()?)
    }
}

impl<S: SendRequest> Rest<S> {
    pub fn with_sender(url: &str, api_key: &str, sender: S) -> Result<Self, RemoteError> {
        let endpoint = Url::parse(&format!("{}/rest/v1/{TABLE}", url.trim_end_matches('/')))
            .map_err(|err| RemoteError::Other(Box::new(err)))?;
        Ok(Self {
            client: Arc::new(Client {
                endpoint,
                api_key: api_key.to_string(),
                sender,
            }),
            poll_interval: DEFAULT_POLL_INTERVAL,
            subscriptions: Mutex::new(HashMap::new()),
            next_subscription: AtomicU64::new(1),
        })
    }

    #[must_use]
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl<S: SendRequest> RemoteReplica for Rest<S> {
    async fn select(
        &self,
        token: &domain::SyncToken,
        id: Option<&str>,
    ) -> Result<Vec<RemoteRow>, RemoteError> {
        self.client.select(token, id).await
    }

    async fn upsert(&self, row: RemoteRow) -> Result<(), RemoteError> {
        self.client.upsert(&row).await
    }

    async fn delete(&self, token: &domain::SyncToken, id: &str) -> Result<(), RemoteError> {
        self.client.delete(token, id).await
    }

    fn subscribe(
        &self,
        token: &domain::SyncToken,
        on_change: OnChange,
    ) -> Result<Subscription, RemoteError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|err| RemoteError::Other(Box::new(err)))?;
        let client = Arc::clone(&self.client);
        let token = token.clone();
        let poll_interval = self.poll_interval;

        let handle = runtime.spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_state = None;
            loop {
                interval.tick().await;
                match client.select(&token, None).await {
                    Ok(rows) => {
                        let state = state(&rows);
                        if last_state.as_ref().is_some_and(|last| *last != state) {
                            debug!("workouts of {token} changed");
                            on_change();
                        }
                        last_state = Some(state);
                    }
                    Err(err) => debug!("failed to poll workouts: {err}"),
                }
            }
        });

        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        match self.subscriptions.lock() {
            Ok(mut subscriptions) => {
                subscriptions.insert(id, handle);
            }
            Err(_) => {
                handle.abort();
                return Err(RemoteError::Other("subscriptions lock poisoned".into()));
            }
        }

        Ok(Subscription { id })
    }

    fn unsubscribe(&self, subscription: Subscription) {
        match self.subscriptions.lock() {
            Ok(mut subscriptions) => {
                if let Some(handle) = subscriptions.remove(&subscription.id) {
                    handle.abort();
                }
            }
            Err(err) => error!("failed to unsubscribe: {err}"),
        }
    }
}

impl<S: SendRequest> Drop for Rest<S> {
    fn drop(&mut self) {
        if let Ok(subscriptions) = self.subscriptions.get_mut() {
            for handle in subscriptions.values() {
                handle.abort();
            }
        }
    }
}

struct Client<S> {
    endpoint: Url,
    api_key: String,
    sender: S,
}

impl<S: SendRequest> Client<S> {
    async fn select(
        &self,
        token: &domain::SyncToken,
        id: Option<&str>,
    ) -> Result<Vec<RemoteRow>, RemoteError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("sync_code", &format!("eq.{token}"));
        if let Some(id) = id {
            url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        }
        url.query_pairs_mut().append_pair("order", "date.desc");

        let response = self.send(Method::GET, url, vec![], None).await?;
        serde_json::from_str(&response.body).map_err(RemoteError::Deserialization)
    }

    async fn upsert(&self, row: &RemoteRow) -> Result<(), RemoteError> {
        let body = serde_json::to_string(&[row]).map_err(RemoteError::Serialization)?;
        self.send(
            Method::POST,
            self.endpoint.clone(),
            vec![(
                "Prefer",
                "resolution=merge-duplicates,return=minimal".to_string(),
            )],
            Some(body),
        )
        .await?;
        Ok(())
    }

    async fn delete(&self, token: &domain::SyncToken, id: &str) -> Result<(), RemoteError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("sync_code", &format!("eq.{token}"));
        self.send(Method::DELETE, url, vec![], None).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        mut headers: Vec<(&'static str, String)>,
        body: Option<String>,
    ) -> Result<HttpResponse, RemoteError> {
        headers.insert(0, ("apikey", self.api_key.clone()));
        headers.insert(1, ("Authorization", format!("Bearer {}", self.api_key)));
        let response = self
            .sender
            .send_request(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(RemoteError::Status {
                status: response.status,
                message: response.body,
            })
        }
    }
}

fn state(rows: &[RemoteRow]) -> BTreeSet<(String, DateTime<Utc>)> {
    rows.iter()
        .map(|row| (row.id.clone(), row.updated_at))
        .collect()
}
