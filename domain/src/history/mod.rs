//! Solve history: persisted reconciliation snapshots and aggregate statistics.

pub mod record;
pub mod stats;

pub use record::{HistoryRecord, HistorySummary};
pub use stats::{AgreementRate, HistoryStats, LengthStats};
