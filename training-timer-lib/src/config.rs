use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Result,
    fs::{config_dir, data_dir, state_dir},
};

const FILE_NAME: &str = "core.toml";
const PROGRAMS_FILE_NAME: &str = "training_programs.json";

/// Handle to the core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

/// The core configuration, serialized to TOML.
///
/// Both fields are required; a file missing either one is treated as unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Where the full training program list is persisted when no explicit path is given
    programs_file: PathBuf,
    /// Where unreadable list files are copied before they get overwritten
    backup_dir: PathBuf,
}

impl CoreConfig {
    /// Load the configuration from the config directory, writing the defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?.join(FILE_NAME), Self::default())
    }

    /// Load the configuration at `path`. `defaults` is written there if the file doesn't exist
    /// and used instead of the file if it can't be parsed.
    pub fn load_from(path: &Path, defaults: Self) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring unreadable config {}: {err}", path.display());
                defaults
            }))
        } else {
            let cfg = defaults;
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_dir()?.join(FILE_NAME))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;

        Ok(())
    }

    pub fn programs_file(&self) -> &Path {
        &self.programs_file
    }

    pub fn set_programs_file(&mut self, path: impl Into<PathBuf>) {
        self.programs_file = path.into();
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn into_handle(self) -> Cfg {
        Arc::new(RwLock::new(self))
    }

    /// A configuration that keeps everything under `dir` instead of the XDG directories.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            programs_file: dir.join(PROGRAMS_FILE_NAME),
            backup_dir: dir.join("backups"),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        // Fall back to relative paths when there is no home directory to resolve against
        Self {
            programs_file: data_dir()
                .unwrap_or_default()
                .join(PROGRAMS_FILE_NAME),
            backup_dir: state_dir().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILE_NAME);

        let cfg = CoreConfig::load_from(&path, CoreConfig::in_dir(dir.path())).unwrap();

        assert!(path.exists());
        assert_eq!(cfg, CoreConfig::in_dir(dir.path()));
        assert_eq!(
            CoreConfig::load_from(&path, CoreConfig::in_dir(Path::new("other"))).unwrap(),
            cfg
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let mut cfg = CoreConfig::in_dir(dir.path());
        cfg.set_programs_file(dir.path().join("elsewhere.json"));
        cfg.save_to(&path).unwrap();

        let loaded = CoreConfig::load_from(&path, CoreConfig::in_dir(Path::new("unused"))).unwrap();
        assert_eq!(loaded.programs_file(), dir.path().join("elsewhere.json"));
        assert_eq!(loaded.backup_dir(), dir.path().join("backups"));
    }

    #[test]
    fn test_unreadable_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "programs_file = [").unwrap();

        let cfg = CoreConfig::load_from(&path, CoreConfig::in_dir(dir.path())).unwrap();

        assert_eq!(cfg.programs_file(), dir.path().join(PROGRAMS_FILE_NAME));
        assert_eq!(cfg.backup_dir(), dir.path().join("backups"));
    }

    #[test]
    fn test_incomplete_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "programs_file = \"mine.json\"\n").unwrap();

        let cfg = CoreConfig::load_from(&path, CoreConfig::in_dir(dir.path())).unwrap();

        assert_eq!(cfg, CoreConfig::in_dir(dir.path()));
    }
}
