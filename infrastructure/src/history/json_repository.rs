//! One pretty-printed JSON file per solved problem.
//!
//! Files are named `result_<YYYYMMDD_HHMMSS_mmm>.json`; the file stem is the
//! record id. Files that cannot be parsed are skipped when listing.

use async_trait::async_trait;
use chrono::Local;
use math_quorum_application::ports::history_repository::{HistoryError, HistoryRepository};
use math_quorum_domain::{HistoryRecord, HistorySummary};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

const FILE_PREFIX: &str = "result_";
const FILE_EXTENSION: &str = "json";

pub struct JsonHistoryRepository {
    dir: PathBuf,
}

impl JsonHistoryRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create a new record file, suffixed `_1`, `_2`, ... while the name
    /// is taken. Creation is exclusive, so concurrent saves never share a file.
    async fn create_unique(&self, stem: &str) -> Result<(String, PathBuf, File), HistoryError> {
        let mut id = stem.to_string();
        let mut counter = 0u32;
        loop {
            let path = self.path_for(&id);
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((id, path, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    counter += 1;
                    id = format!("{}_{}", stem, counter);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", id, FILE_EXTENSION))
    }

    async fn read_record(&self, id: &str, path: &Path) -> Result<HistoryRecord, HistoryError> {
        let body = tokio::fs::read_to_string(path).await?;
        let mut record: HistoryRecord =
            serde_json::from_str(&body).map_err(|e| HistoryError::Malformed {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        record.id = id.to_string();
        Ok(record)
    }

    /// Ids of every history file in the directory.
    async fn record_ids(&self) -> Result<Vec<String>, HistoryError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && stem.starts_with(FILE_PREFIX)
            {
                ids.push(stem.to_string());
            }
        }
        Ok(ids)
    }
}

/// Accept ids with or without the `.json` extension, never a path.
fn validate_id(id: &str) -> Result<&str, HistoryError> {
    let id = id.trim();
    let id = id
        .strip_suffix(&format!(".{}", FILE_EXTENSION))
        .unwrap_or(id);
    if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
        return Err(HistoryError::InvalidId(id.to_string()));
    }
    Ok(id)
}

/// Newest first by timestamp, then by id.
fn sort_newest_first(records: &mut [HistoryRecord]) {
    records.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn save(&self, record: &HistoryRecord) -> Result<String, HistoryError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let stem = format!("{}{}", FILE_PREFIX, Local::now().format("%Y%m%d_%H%M%S_%3f"));
        let body = serde_json::to_string_pretty(record).map_err(|e| HistoryError::Malformed {
            id: stem.clone(),
            reason: e.to_string(),
        })?;

        let (id, path, mut file) = self.create_unique(&stem).await?;
        file.write_all(body.as_bytes()).await?;
        file.flush().await?;

        debug!("Saved history record to {}", path.display());
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<HistorySummary>, HistoryError> {
        Ok(self
            .load_all()
            .await?
            .iter()
            .map(HistoryRecord::summary)
            .collect())
    }

    async fn get(&self, id: &str) -> Result<HistoryRecord, HistoryError> {
        let id = validate_id(id)?;
        let path = self.path_for(id);
        if !tokio::fs::try_exists(&path).await? {
            return Err(HistoryError::NotFound(id.to_string()));
        }
        self.read_record(id, &path).await
    }

    async fn load_all(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let mut records = Vec::new();
        for id in self.record_ids().await? {
            match self.read_record(&id, &self.path_for(&id)).await {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping history file {}: {}", id, e),
            }
        }
        sort_newest_first(&mut records);
        Ok(records)
    }
}
