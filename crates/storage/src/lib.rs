//! Storage Layer
//!
//! Repository-pattern persistence for analysis output. The store only
//! defines the record shapes; frame and session payloads are the value
//! types emitted by the analysis core.

mod repository;

pub use repository::{FrameRecord, Repository, SessionRecord};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store access failed: {0}")]
    Access(String),
    #[error("Record not found")]
    NotFound,
}
