use std::{fs, path::PathBuf};

use heck::ToSnakeCase;
use serde::Deserialize;
use tracing::{error, info, warn};

use super::ListController;
use crate::{
    Result,
    domain::{ProgramId, TrainingProgram},
};

const EXTENSIONS: &[&str] = &["json"];
const LIST_FILE_NAME: &str = "training_programs.json";

/// Asks the user where to read from or write to, e.g. a file dialog.
///
/// `None` means the user backed out and the operation should quietly do nothing.
pub trait PathPicker {
    fn open_path(&self, extensions: &[&str]) -> Option<PathBuf>;

    /// `suggested_name` is a file name (not a path) the picker may offer as a default.
    fn save_path(&self, suggested_name: &str, extensions: &[&str]) -> Option<PathBuf>;
}

impl ListController {
    /// Import a single program file and inject it into the list.
    ///
    /// A missing or malformed file is logged and leaves the list untouched; only failing to read
    /// an existing file is reported as an error.
    pub fn load_training_program(&mut self, picker: &dyn PathPicker) -> Result<Option<ProgramId>> {
        info!("Load Training program..");
        let Some(path) = picker.open_path(EXTENSIONS) else {
            return Ok(None);
        };
        if !path.exists() {
            warn!("File {} does not exist", path.display());
            return Ok(None);
        }

        let serialized = fs::read_to_string(&path)?;

        let json: serde_json::Value = match serde_json::from_str(&serialized) {
            Ok(json) => json,
            Err(err) => {
                error!("Could not parse JSON Data: {err}");
                error!("Data in file was: {serialized}");
                return Ok(None);
            }
        };

        let program = match TrainingProgram::deserialize(&json) {
            Ok(program) => program,
            Err(err) => {
                error!("JSON Data does not match training program structure: {err}");
                error!(
                    "JSON Data was: {}",
                    serde_json::to_string_pretty(&json).unwrap_or(serialized)
                );
                return Ok(None);
            }
        };

        let id = program.id().clone();
        self.inject_program(program)?;

        Ok(Some(id))
    }

    /// Export a single program as a standalone file.
    pub fn save_training_program(
        &self,
        id: &ProgramId,
        picker: &dyn PathPicker,
    ) -> Result<Option<PathBuf>> {
        info!("Save Training program {id}..");
        let program = self.program(id)?;

        let suggested_name = format!("{}.json", program.name.to_snake_case());
        let Some(path) = picker.save_path(&suggested_name, EXTENSIONS) else {
            return Ok(None);
        };

        fs::write(&path, serde_json::to_string_pretty(&program)?)?;
        info!("Saved training program {id} to {}", path.display());

        Ok(Some(path))
    }

    /// Replace the list with the contents of a full list file.
    pub fn load_training_programs(&mut self, picker: &dyn PathPicker) -> Result<Option<PathBuf>> {
        info!("Load Training programs..");
        let Some(path) = picker.open_path(EXTENSIONS) else {
            return Ok(None);
        };

        self.restore_from_storage(Some(&path))?;

        Ok(Some(path))
    }

    /// Write the full list to a file other than the default location.
    pub fn save_training_programs(&self, picker: &dyn PathPicker) -> Result<Option<PathBuf>> {
        info!("Save Training programs..");
        let Some(path) = picker.save_path(LIST_FILE_NAME, EXTENSIONS) else {
            return Ok(None);
        };

        self.repository.store(&self.list_snapshot(), Some(&path))?;

        Ok(Some(path))
    }
}
