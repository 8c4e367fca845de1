//! PostgreSQL note store.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use tracing::{debug, info};
use uuid::Uuid;

use notekeep_core::{
    display_date, uuid_utils::new_v7_with_timestamp, Error, Note, NoteInput, NoteStore, Result,
};

const NOTE_COLUMNS: &str = "id, title, content, date, created_at_utc, updated_at_utc";

/// PostgreSQL implementation of NoteStore.
#[derive(Clone)]
pub struct PgNoteStore {
    pool: Pool<Postgres>,
}

impl PgNoteStore {
    /// Create a new PgNoteStore with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let start = Instant::now();
        let sql = format!(
            "SELECT {} FROM notes ORDER BY created_at_utc DESC, id DESC",
            NOTE_COLUMNS
        );
        let notes: Vec<Note> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "pg_notes",
            op = "list",
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );
        Ok(notes)
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        let sql = format!("SELECT {} FROM notes WHERE id = $1", NOTE_COLUMNS);
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NoteNotFound(id))
    }

    async fn create(&self, input: NoteInput) -> Result<Note> {
        let input = input.validate()?;
        let (id, now) = new_v7_with_timestamp();
        let note = Note::new(id, input, now);

        // Single-statement insert: either the row is visible afterwards or nothing is.
        let sql = format!(
            "INSERT INTO notes ({cols}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {cols}",
            cols = NOTE_COLUMNS
        );
        let inserted: Note = sqlx::query_as(&sql)
            .bind(note.id)
            .bind(&note.title)
            .bind(&note.content)
            .bind(&note.date)
            .bind(note.created_at_utc)
            .bind(note.updated_at_utc)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "pg_notes",
            op = "create",
            note_id = %inserted.id,
            "Note created"
        );
        Ok(inserted)
    }

    async fn update(&self, id: Uuid, input: NoteInput) -> Result<Note> {
        let input = input.validate()?;
        let now = Utc::now();

        let sql = format!(
            "UPDATE notes SET title = $1, content = $2, date = $3, updated_at_utc = $4 \
             WHERE id = $5 RETURNING {}",
            NOTE_COLUMNS
        );
        let updated: Option<Note> = sqlx::query_as(&sql)
            .bind(&input.title)
            .bind(&input.content)
            .bind(display_date(&now))
            .bind(now)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        let updated = updated.ok_or(Error::NoteNotFound(id))?;
        info!(
            subsystem = "db",
            component = "pg_notes",
            op = "update",
            note_id = %id,
            "Note updated"
        );
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        info!(
            subsystem = "db",
            component = "pg_notes",
            op = "delete",
            note_id = %id,
            existed = result.rows_affected() > 0,
            "Note deleted"
        );
        Ok(())
    }
}
