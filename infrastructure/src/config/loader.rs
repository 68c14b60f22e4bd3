//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["math-quorum.toml", ".math-quorum.toml"];

/// Prefix for environment overrides, e.g. `MATH_QUORUM_CONSENSUS__TIMEOUT_SECS=30`
const ENV_PREFIX: &str = "MATH_QUORUM_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `MATH_QUORUM_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./math-quorum.toml` or `./.math-quorum.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/math-quorum/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();
        Self::figment(global.as_deref(), project.as_deref(), config_path.map(|p| p.as_path()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/math-quorum/config.toml` (or the platform
    /// equivalent).
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("math-quorum").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]);
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_quorum_domain::{Model, OutputFormat};
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.models.enabled.is_none());
        assert_eq!(config.consensus.timeout_secs, 60);
        assert!(config.history.enabled);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("math-quorum"));
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(
            &global,
            "[models]\nenabled = [\"claude\"]\n[output]\nformat = \"answer\"\n",
        )
        .unwrap();
        fs::write(&explicit, "[output]\nformat = \"json\"\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(Some(&global), None, Some(&explicit))
            .extract()
            .unwrap();

        assert_eq!(config.models.parse_enabled().0, vec![Model::Claude]);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        // Untouched nested defaults survive the merge
        assert_eq!(config.providers.deepseek.base_url, "https://api.deepseek.com");
        assert!(config.output.color);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[consensus]\ntimeout_secs = \"soon\"\n").unwrap();

        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(&path)).extract();
        assert!(result.is_err());
    }
}
