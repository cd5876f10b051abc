use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    Result,
    config::Cfg,
    domain::TrainingProgramListData,
    repository::TrainingProgramRepository,
};

/// Stores the training program list as a pretty-printed JSON document.
///
/// The default location is taken from the configuration every time, so changing
/// `programs_file` at runtime takes effect on the next store.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    cfg: Cfg,
}

impl JsonFileRepository {
    pub fn new(cfg: Cfg) -> Self {
        Self { cfg }
    }

    fn default_path(&self) -> PathBuf {
        self.cfg.read().programs_file().to_path_buf()
    }

    /// Copy the list file at the default location into the backup directory.
    pub fn back_up_default(&self) -> Result<PathBuf> {
        self.backup(&self.default_path())
    }

    /// Copy an unreadable list file out of the way before it gets overwritten by the next store
    fn backup(&self, path: &Path) -> Result<PathBuf> {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "training_programs".into());
        let backup_dir = self.cfg.read().backup_dir().to_path_buf();

        fs::create_dir_all(&backup_dir)?;
        let backup = backup_dir.join(format!("{stem}-{timestamp}.json.bak"));
        fs::copy(path, &backup)?;

        Ok(backup)
    }
}

impl TrainingProgramRepository for JsonFileRepository {
    fn store(&self, data: &TrainingProgramListData, path: Option<&Path>) -> Result<()> {
        let path = path.map_or_else(|| self.default_path(), Path::to_path_buf);
        let contents = serde_json::to_string_pretty(data)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;

        debug!("Stored {} training programs to {}", data.len(), path.display());

        Ok(())
    }

    fn restore(&self, path: Option<&Path>) -> Result<TrainingProgramListData> {
        let is_default = path.is_none();
        let path = path.map_or_else(|| self.default_path(), Path::to_path_buf);

        if is_default && !path.exists() {
            info!("No training programs at {} yet, starting empty", path.display());
            return Ok(TrainingProgramListData::default());
        }

        let contents = fs::read_to_string(&path)?;
        let data: TrainingProgramListData = match serde_json::from_str(&contents) {
            Ok(data) => data,
            Err(err) => {
                if is_default {
                    let backup = self.backup(&path)?;
                    warn!("Backed up unreadable {} to {}", path.display(), backup.display());
                }
                return Err(err.into());
            }
        };

        debug!("Restored {} training programs from {}", data.len(), path.display());

        Ok(data)
    }
}
