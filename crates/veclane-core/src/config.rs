//! Veclane configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, VeclaneError};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VeclaneConfig {
    /// Backend name, or "auto" to pick the widest one the CPU supports.
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default)]
    pub verify: VerifyConfig,
}

fn default_backend() -> String { "auto".into() }

impl Default for VeclaneConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            verify: VerifyConfig::default(),
        }
    }
}

impl VeclaneConfig {
    /// Load config from the default path (~/.veclane/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path. `~` is expanded.
    pub fn load_from(path: &Path) -> Result<Self> {
        let path = expand_path(path);
        let content = std::fs::read_to_string(&path)
            .map_err(|e| VeclaneError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| VeclaneError::Config(format!("Failed to parse config: {e}")))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let path = expand_path(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| VeclaneError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the veclane home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".veclane")
    }

    /// Whether the backend should be chosen by CPU detection.
    pub fn backend_is_auto(&self) -> bool {
        self.backend.eq_ignore_ascii_case("auto")
    }
}

/// Settings for the randomized cross-backend check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Largest vector length drawn per trial.
    #[serde(default = "default_max_len")]
    pub max_len: usize,
    #[serde(default = "default_trials")]
    pub trials: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_max_len() -> usize { 4096 }
fn default_trials() -> u32 { 64 }
fn default_seed() -> u64 { 42 }

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            max_len: default_max_len(),
            trials: default_trials(),
            seed: default_seed(),
        }
    }
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VeclaneConfig::default();
        assert!(config.backend_is_auto());
        assert_eq!(config.verify.max_len, 4096);
        assert_eq!(config.verify.trials, 64);
        assert_eq!(config.verify.seed, 42);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            backend = "sse2"

            [verify]
            max_len = 100
            seed = 7
        "#;

        let config: VeclaneConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend, "sse2");
        assert!(!config.backend_is_auto());
        assert_eq!(config.verify.max_len, 100);
        assert_eq!(config.verify.seed, 7);
        assert_eq!(config.verify.trials, 64);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: VeclaneConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend, "auto");
        assert_eq!(config.verify.trials, 64);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = VeclaneConfig::default();
        config.backend = "portable".into();
        config.verify.trials = 3;
        config.save_to(&path).unwrap();

        let loaded = VeclaneConfig::load_from(&path).unwrap();
        assert_eq!(loaded.backend, "portable");
        assert_eq!(loaded.verify.trials, 3);
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = [").unwrap();

        let err = VeclaneConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, VeclaneError::Config(_)));
    }

    #[test]
    fn test_home_dir() {
        let home = VeclaneConfig::home_dir();
        assert!(home.to_string_lossy().contains("veclane"));
    }
}
