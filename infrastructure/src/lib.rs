//! Infrastructure layer for math-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: LLM provider clients, the JSON history
//! store, and configuration file loading.

pub mod config;
pub mod history;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileConsensusConfig, FileHistoryConfig, FileModelsConfig,
    FileOutputConfig, FileOutputFormat, FileProvidersConfig,
};
pub use history::JsonHistoryRepository;
pub use providers::{
    AnthropicProvider, OpenAiCompatibleProvider, ProviderAdapter, ProviderKind, RoutingGateway,
    build_providers,
};
