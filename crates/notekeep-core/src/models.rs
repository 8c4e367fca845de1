//! Core data models for notekeep.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;
use crate::error::{Error, Result};

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A single user-authored note.
///
/// `date` is the human-readable creation/update date shown next to the note.
/// Ordering always uses `created_at_utc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub date: String,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

impl Note {
    /// Build a new note from validated input, stamped with `now`.
    pub fn new(id: Uuid, input: NoteInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            content: input.content,
            date: display_date(&now),
            created_at_utc: now,
            updated_at_utc: now,
        }
    }

    /// Overwrite title, content and date in place. `id` and `created_at_utc` are kept.
    pub fn apply(&mut self, input: NoteInput, now: DateTime<Utc>) {
        self.title = input.title;
        self.content = input.content;
        self.date = display_date(&now);
        self.updated_at_utc = now;
    }
}

/// Title/content pair submitted when creating or updating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Reject whitespace-only titles or content.
    ///
    /// The submitted text is kept as-is; trimming is only used for the check.
    pub fn validate(self) -> Result<Self> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("Title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(Error::Validation("Content is required".to_string()));
        }
        Ok(self)
    }
}

/// Format a timestamp the way notes display their date (`M/D/YYYY`).
pub fn display_date(ts: &DateTime<Utc>) -> String {
    ts.format(defaults::DATE_DISPLAY_FORMAT).to_string()
}

/// Sort notes newest first, breaking timestamp ties by id.
pub fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| {
        b.created_at_utc
            .cmp(&a.created_at_utc)
            .then_with(|| b.id.cmp(&a.id))
    });
}

// =============================================================================
// SUMMARY TYPES
// =============================================================================

/// Body of a summarize request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub content: String,
}

/// Body of a successful summarize response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}
