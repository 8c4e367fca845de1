//! # notekeep-core
//!
//! Core types, traits, and abstractions for notekeep.
//!
//! This crate provides the note model, input validation, the error taxonomy,
//! and the [`NoteStore`] / [`Summarizer`] traits that the storage backends and
//! the HTTP API are built on.

pub mod defaults;
pub mod error;
pub mod models;
pub mod summarize;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use summarize::TruncatingSummarizer;
pub use traits::*;
pub use uuid_utils::{extract_timestamp, new_v7};
