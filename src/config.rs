// ⚙️ Configuration - defaults, optional TOML file, LEDGER_QUEST_* env vars

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "ledger-quest";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// SQLite file holding saved sessions.
    pub database_path: PathBuf,
    pub save_slot: String,
    /// JSON exercise catalog replacing the built-in one.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub log_filter: String,
    pub server_addr: String,
}

impl AppConfig {
    /// Defaults, then `<file>.toml` if present, then the environment.
    pub fn load(file: Option<&str>) -> Result<Self> {
        let builder = Config::builder()
            .set_default("database_path", "ledger-quest.db")?
            .set_default("save_slot", crate::store::DEFAULT_SLOT)?
            .set_default("log_dir", "logs")?
            .set_default("log_filter", "info,ledger_quest=debug")?
            .set_default("server_addr", "0.0.0.0:3000")?;

        let builder = match file {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder
            .add_source(Environment::with_prefix("LEDGER_QUEST"))
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: PathBuf::from("ledger-quest.db"),
            save_slot: crate::store::DEFAULT_SLOT.to_string(),
            catalog_path: None,
            log_dir: PathBuf::from("logs"),
            log_filter: "info,ledger_quest=debug".to_string(),
            server_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quest.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "save_slot = \"bob\"").unwrap();
        writeln!(f, "catalog_path = \"exercises.json\"").unwrap();

        let cfg = AppConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(cfg.save_slot, "bob");
        assert_eq!(cfg.catalog_path, Some(PathBuf::from("exercises.json")));
        assert_eq!(cfg.server_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(AppConfig::load(Some("/definitely/not/here.toml")).is_err());
    }
}
