//! In-process note store.
//!
//! Holds notes in memory for the lifetime of the process. Used when no data
//! service is configured and as the backend for tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use notekeep_core::{
    sort_newest_first, uuid_utils::new_v7_with_timestamp, Error, Note, NoteInput, NoteStore,
    Result,
};

/// Sample notes shown on a fresh in-memory board.
pub const SAMPLE_NOTES: [(&str, &str); 3] = [
    (
        "The Art of Programming",
        "Programming is both a science and an art form. Like any craft, it requires technical \
         knowledge and precision, but also creativity and intuition. The best programmers are \
         those who can balance these aspects, creating code that is not only functional but also \
         elegant and maintainable.\n\nJust as a writer crafts stories with words, a programmer \
         writes solutions with code. Each line serves a purpose, each function tells a story, and \
         the whole program comes together like chapters in a book. The joy of programming comes \
         from solving complex problems with simple, beautiful solutions.",
    ),
    (
        "Web Development Journey",
        "Starting my journey in web development has been an exciting adventure. From learning \
         HTML and CSS basics to diving into JavaScript and React, each step has opened new \
         possibilities. The web is an incredibly dynamic platform, constantly evolving with new \
         technologies and approaches.\n\nOne of the most fascinating aspects is how different \
         technologies work together. Frontend frameworks like React make building interactive \
         interfaces intuitive, while backend technologies handle data and business logic. \
         Understanding how these pieces fit together is like solving a complex puzzle, where \
         each piece has its own unique role.",
    ),
    (
        "Future of AI in Technology",
        "Artificial Intelligence is revolutionizing the way we approach software development and \
         problem-solving. From automated testing to code generation, AI tools are becoming an \
         integral part of a developer's toolkit. These advancements are not replacing programmers \
         but rather augmenting their capabilities and productivity.\n\nThe future looks even more \
         promising as AI continues to evolve. We're seeing the emergence of systems that can \
         understand context, generate complex code structures, and even debug applications. \
         However, it's crucial to remember that human creativity and critical thinking remain \
         essential in guiding these tools and ensuring they produce meaningful results.",
    ),
];

/// In-memory implementation of NoteStore.
#[derive(Default)]
pub struct MemoryNoteStore {
    notes: RwLock<Vec<Note>>,
}

impl MemoryNoteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with [`SAMPLE_NOTES`].
    pub async fn with_sample_notes() -> Result<Self> {
        let store = Self::new();
        for (title, content) in SAMPLE_NOTES {
            store.create(NoteInput::new(title, content)).await?;
        }
        Ok(store)
    }

    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Note>> {
        let mut notes = self.notes.read().await.clone();
        sort_newest_first(&mut notes);
        Ok(notes)
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        self.notes
            .read()
            .await
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(Error::NoteNotFound(id))
    }

    async fn create(&self, input: NoteInput) -> Result<Note> {
        let input = input.validate()?;
        let (id, now) = new_v7_with_timestamp();
        let note = Note::new(id, input, now);

        self.notes.write().await.push(note.clone());
        info!(
            subsystem = "store",
            component = "memory_notes",
            op = "create",
            note_id = %note.id,
            "Note created"
        );
        Ok(note)
    }

    async fn update(&self, id: Uuid, input: NoteInput) -> Result<Note> {
        let input = input.validate()?;
        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(Error::NoteNotFound(id))?;

        note.apply(input, Utc::now());
        info!(
            subsystem = "store",
            component = "memory_notes",
            op = "update",
            note_id = %id,
            "Note updated"
        );
        Ok(note.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| n.id != id);

        info!(
            subsystem = "store",
            component = "memory_notes",
            op = "delete",
            note_id = %id,
            existed = notes.len() < before,
            "Note deleted"
        );
        Ok(())
    }
}
