//! Hosted data service note store.
//!
//! Talks to the `notes` collection of a hosted PostgreSQL service through its
//! PostgREST-style REST API (`{base_url}/rest/v1/notes`). Every request
//! carries the project API key both as `apikey` and as a bearer token.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use notekeep_core::{
    defaults, display_date, uuid_utils::new_v7_with_timestamp, Error, Note, NoteInput, NoteStore,
    Result,
};

/// Configuration for the hosted data service.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project URL, e.g. `https://abcd.example.co`.
    pub base_url: String,
    /// Project API key.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RestStoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn collection_url(&self) -> String {
        format!(
            "{}{}/{}",
            self.base_url.trim_end_matches('/'),
            defaults::DATA_SERVICE_REST_PATH,
            defaults::NOTES_TABLE
        )
    }
}

/// Columns written on update.
#[derive(Serialize)]
struct NotePatch<'a> {
    title: &'a str,
    content: &'a str,
    date: String,
    updated_at_utc: chrono::DateTime<Utc>,
}

/// Error payload returned by the data service.
#[derive(Deserialize)]
struct ServiceError {
    message: Option<String>,
    error: Option<String>,
}

/// Note store backed by the hosted data service.
pub struct RestNoteStore {
    client: Client,
    config: RestStoreConfig,
    url: String,
}

impl RestNoteStore {
    /// Create a new store. Fails with `Error::Config` on an unusable configuration.
    pub fn new(config: RestStoreConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Config("data service API key is empty".to_string()));
        }
        reqwest::Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("invalid data service URL: {}", e)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        let url = config.collection_url();
        info!(
            subsystem = "store",
            component = "rest_notes",
            url = %url,
            timeout_secs = config.timeout.as_secs(),
            "Initializing data service store"
        );
        Ok(Self {
            client,
            config,
            url,
        })
    }

    pub fn config(&self) -> &RestStoreConfig {
        &self.config
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    fn id_filter(id: Uuid) -> String {
        format!("eq.{}", id)
    }

    /// Turn non-2xx responses into `Error::Store` with the service's message.
    async fn check(op: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ServiceError>(&body)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or(body);

        warn!(
            subsystem = "store",
            component = "rest_notes",
            op = op,
            http_status = status.as_u16(),
            error = %message,
            "Data service returned an error"
        );
        Err(Error::Store(format!("{} ({})", message, status)))
    }

    async fn rows(op: &str, response: Response) -> Result<Vec<Note>> {
        let response = Self::check(op, response).await?;
        response
            .json::<Vec<Note>>()
            .await
            .map_err(|e| Error::Store(format!("unexpected data service response: {}", e)))
    }
}

#[async_trait]
impl NoteStore for RestNoteStore {
    fn backend_name(&self) -> &'static str {
        "rest"
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let start = Instant::now();
        let response = self
            .authorized(self.client.get(&self.url))
            .query(&[("select", "*"), ("order", "created_at_utc.desc,id.desc")])
            .send()
            .await?;
        let notes = Self::rows("list", response).await?;

        debug!(
            subsystem = "store",
            component = "rest_notes",
            op = "list",
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );
        Ok(notes)
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        let response = self
            .authorized(self.client.get(&self.url))
            .query(&[("select", "*".to_string()), ("id", Self::id_filter(id))])
            .send()
            .await?;
        Self::rows("fetch", response)
            .await?
            .into_iter()
            .next()
            .ok_or(Error::NoteNotFound(id))
    }

    async fn create(&self, input: NoteInput) -> Result<Note> {
        let input = input.validate()?;
        let (id, now) = new_v7_with_timestamp();
        let note = Note::new(id, input, now);

        let response = self
            .authorized(self.client.post(&self.url))
            .header("Prefer", "return=representation")
            .json(&note)
            .send()
            .await?;
        let created = Self::rows("create", response)
            .await?
            .into_iter()
            .next()
            .unwrap_or(note);

        info!(
            subsystem = "store",
            component = "rest_notes",
            op = "create",
            note_id = %created.id,
            "Note created"
        );
        Ok(created)
    }

    async fn update(&self, id: Uuid, input: NoteInput) -> Result<Note> {
        let input = input.validate()?;
        let now = Utc::now();
        let patch = NotePatch {
            title: &input.title,
            content: &input.content,
            date: display_date(&now),
            updated_at_utc: now,
        };

        let response = self
            .authorized(self.client.patch(&self.url))
            .header("Prefer", "return=representation")
            .query(&[("id", Self::id_filter(id))])
            .json(&patch)
            .send()
            .await?;
        let updated = Self::rows("update", response)
            .await?
            .into_iter()
            .next()
            .ok_or(Error::NoteNotFound(id))?;

        info!(
            subsystem = "store",
            component = "rest_notes",
            op = "update",
            note_id = %id,
            "Note updated"
        );
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let response = self
            .authorized(self.client.delete(&self.url))
            .query(&[("id", Self::id_filter(id))])
            .send()
            .await?;
        let status = Self::check("delete", response).await?.status();

        info!(
            subsystem = "store",
            component = "rest_notes",
            op = "delete",
            note_id = %id,
            http_status = status.as_u16(),
            "Note deleted"
        );
        Ok(())
    }
}
