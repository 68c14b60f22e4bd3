//! History repository port
//!
//! Persistence of [`HistoryRecord`]s. The store assigns record ids.

use async_trait::async_trait;
use math_quorum_domain::{HistoryRecord, HistorySummary};
use thiserror::Error;

/// Errors from a history store
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History record not found: {0}")]
    NotFound(String),

    #[error("Invalid history id: {0}")]
    InvalidId(String),

    #[error("Malformed history record {id}: {reason}")]
    Malformed { id: String, reason: String },

    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Store for solved problems
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Persist a record and return the id it was stored under.
    async fn save(&self, record: &HistoryRecord) -> Result<String, HistoryError>;

    /// Summaries of every readable record, newest first.
    async fn list(&self) -> Result<Vec<HistorySummary>, HistoryError>;

    /// Load one record by id.
    async fn get(&self, id: &str) -> Result<HistoryRecord, HistoryError>;

    /// Load every readable record, newest first.
    async fn load_all(&self) -> Result<Vec<HistoryRecord>, HistoryError>;
}
