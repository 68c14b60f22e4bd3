//! History settings from TOML (`[history]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw history configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHistoryConfig {
    /// Save every solve to the history store
    pub enabled: bool,
    /// Directory for history files; defaults to the platform data dir
    pub dir: Option<PathBuf>,
}

impl Default for FileHistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl FileHistoryConfig {
    /// Directory history files are read from and written to.
    ///
    /// `$XDG_DATA_HOME/math-quorum/history`, or `./history` when the
    /// platform has no data directory.
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("math-quorum").join("history"))
                .unwrap_or_else(|| PathBuf::from("history"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let config = FileHistoryConfig {
            enabled: true,
            dir: Some(PathBuf::from("/tmp/mq")),
        };
        assert_eq!(config.resolved_dir(), PathBuf::from("/tmp/mq"));
    }

    #[test]
    fn test_default_dir_ends_with_history() {
        let dir = FileHistoryConfig::default().resolved_dir();
        assert!(dir.ends_with("history"));
    }
}
