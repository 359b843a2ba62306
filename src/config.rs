// Command-line configuration file (YAML)

use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "shoplist";
const CONFIG_FILE: &str = "shoplist.yml";

/// Optional settings for the `shoplist` binary. Command-line flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the stored documents
    pub data_dir: Option<PathBuf>,
    /// Colored output; defaults to on
    pub color: Option<bool>,
}

impl Config {
    /// `<config dir>/shoplist/shoplist.yml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`; a missing file is an empty config
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "No config file");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(path = ?path, ?config, "Loaded config");
        Ok(config)
    }

    /// Load from the explicit path, else from the default location
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => match Self::default_path() {
                Some(p) => Self::load(&p),
                None => Ok(Self::default()),
            },
        }
    }

    /// Flag, then config, then `<data dir>/shoplist`
    pub fn resolve_data_dir(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = flag.or_else(|| self.data_dir.clone()) {
            return Ok(dir);
        }
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or_else(|| eyre!("No data directory available; pass --data-dir"))
    }

    pub fn color_enabled(&self) -> bool {
        self.color.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("nope.yml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.color_enabled());
    }

    #[test]
    fn test_load_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "data_dir: /tmp/lists\ncolor: false\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/lists")));
        assert!(!config.color_enabled());
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "colour: true\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_data_dir_precedence() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            color: None,
        };
        assert_eq!(
            config.resolve_data_dir(Some(PathBuf::from("/from/flag"))).unwrap(),
            PathBuf::from("/from/flag")
        );
        assert_eq!(config.resolve_data_dir(None).unwrap(), PathBuf::from("/from/config"));
    }
}
