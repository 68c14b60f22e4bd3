//! Analyze History use case
//!
//! Loads every stored record and computes aggregate statistics.

use crate::ports::history_repository::{HistoryError, HistoryRepository};
use math_quorum_domain::HistoryStats;
use std::sync::Arc;
use tracing::info;

/// Use case for summarizing the solve history
pub struct AnalyzeHistoryUseCase {
    repository: Arc<dyn HistoryRepository>,
}

impl AnalyzeHistoryUseCase {
    pub fn new(repository: Arc<dyn HistoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<HistoryStats, HistoryError> {
        let records = self.repository.load_all().await?;
        info!("Loaded {} history records", records.len());
        Ok(HistoryStats::from_records(&records))
    }
}
