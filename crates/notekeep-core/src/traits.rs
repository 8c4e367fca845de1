//! Core traits for notekeep abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Note, NoteInput};

// =============================================================================
// NOTE STORE
// =============================================================================

/// Client for the persisted `notes` collection.
///
/// Implementations hold no cache: callers are expected to call [`list`]
/// again after every successful mutation.
///
/// [`list`]: NoteStore::list
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Short backend name used in logs and the health endpoint.
    fn backend_name(&self) -> &'static str;

    /// All notes, newest first by `created_at_utc`.
    async fn list(&self) -> Result<Vec<Note>>;

    /// Fetch a single note.
    async fn fetch(&self, id: Uuid) -> Result<Note>;

    /// Validate and insert a new note.
    async fn create(&self, input: NoteInput) -> Result<Note>;

    /// Validate and overwrite title, content and date of an existing note.
    ///
    /// Last writer wins; returns `Error::NoteNotFound` if `id` is absent.
    async fn update(&self, id: Uuid, input: NoteInput) -> Result<Note>;

    /// Delete a note. Deleting an absent id is a no-op.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// SUMMARIZER
// =============================================================================

/// Derives a summary string from note content.
pub trait Summarizer: Send + Sync {
    /// Name of the summarization strategy (for logs).
    fn name(&self) -> &'static str;

    /// Summarize `content`. Must be deterministic for a given input.
    fn summarize(&self, content: &str) -> Result<String>;
}
