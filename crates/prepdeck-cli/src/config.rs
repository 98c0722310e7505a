//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use prepdeck_store::HistoryStore;

/// Top-level prepdeck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepdeckConfig {
    /// Directory holding the history file.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Role used when `--role` is omitted.
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Difficulty label used when `--difficulty` is omitted.
    #[serde(default = "default_difficulty")]
    pub default_difficulty: String,
    /// Custom question bank TOML. The built-in bank when absent.
    #[serde(default)]
    pub bank: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./prepdeck-data")
}
fn default_role() -> String {
    prepdeck_core::bank::FALLBACK_ROLE.to_string()
}
fn default_difficulty() -> String {
    "Intermediate".to_string()
}

impl Default for PrepdeckConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_role: default_role(),
            default_difficulty: default_difficulty(),
            bank: None,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `prepdeck.toml` in the current directory
/// 2. `~/.config/prepdeck/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<PrepdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("prepdeck.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = global_config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PrepdeckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(PrepdeckConfig::default()),
    }
}

fn global_config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("prepdeck"))
}

/// Build the history store, with the flag overriding the config's data dir.
pub fn history_store(
    data_dir: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<HistoryStore> {
    let config = load_config_from(config_path)?;
    Ok(HistoryStore::new(data_dir.unwrap_or(config.data_dir)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PrepdeckConfig::default();
        assert_eq!(config.default_role, "software-engineer");
        assert_eq!(config.default_difficulty, "Intermediate");
        assert!(config.bank.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
data_dir = "/tmp/prepdeck"
default_role = "data-scientist"
"#;
        let config: PrepdeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/prepdeck"));
        assert_eq!(config.default_role, "data-scientist");
        assert_eq!(config.default_difficulty, "Intermediate");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("no_such_prepdeck.toml")));
        assert!(err.is_err());
    }
}
