//! Shared application state.

use std::sync::Arc;

use tracing::info;

use notekeep_core::{Error, NoteStore, Result, Summarizer, TruncatingSummarizer};
use notekeep_db::{Database, MemoryNoteStore, PoolConfig, RestNoteStore, RestStoreConfig};

use crate::config::{ServerConfig, StoreBackend};

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    /// State over `store` with the default truncating summarizer.
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store,
            summarizer: Arc::new(TruncatingSummarizer::new()),
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = summarizer;
        self
    }

    /// Build the configured note store.
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        let store: Arc<dyn NoteStore> = match config.store {
            StoreBackend::Memory => {
                if config.seed_sample_notes {
                    Arc::new(MemoryNoteStore::with_sample_notes().await?)
                } else {
                    Arc::new(MemoryNoteStore::new())
                }
            }
            StoreBackend::Postgres => {
                let db = Database::connect_with_config(
                    &config.database_url,
                    &PoolConfig::new().with_acquire_timeout(config.request_timeout),
                )
                .await?;
                db.migrate().await?;
                info!(subsystem = "db", "Migrations applied");
                Arc::new(db.notes)
            }
            StoreBackend::Rest => {
                let ds = config.data_service.as_ref().ok_or_else(|| {
                    Error::Config("data service credentials are not configured".to_string())
                })?;
                let rest_config = RestStoreConfig::new(ds.url.clone(), ds.api_key.clone())
                    .with_timeout(config.request_timeout);
                Arc::new(RestNoteStore::new(rest_config)?)
            }
        };

        info!(
            subsystem = "api",
            store_backend = store.backend_name(),
            "Note store ready"
        );
        Ok(Self::new(store))
    }
}
