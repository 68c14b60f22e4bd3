//! Configuration file loading for math-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MATH_QUORUM_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./math-quorum.toml` or `./.math-quorum.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/math-quorum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAnthropicConfig, FileConfig, FileConsensusConfig, FileHistoryConfig, FileModelsConfig,
    FileOpenAiConfig, FileOutputConfig, FileOutputFormat, FileProvidersConfig, PROVIDER_NAMES,
};
pub use loader::ConfigLoader;
