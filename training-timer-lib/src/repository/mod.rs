//! Persistence boundary for the full training program list.

use std::path::Path;

use crate::{Result, domain::TrainingProgramListData};

mod json;

pub use json::JsonFileRepository;

/// Durable storage for [`TrainingProgramListData`] snapshots.
///
/// Both operations work on the default location when `path` is `None`.
pub trait TrainingProgramRepository {
    fn store(&self, data: &TrainingProgramListData, path: Option<&Path>) -> Result<()>;

    fn restore(&self, path: Option<&Path>) -> Result<TrainingProgramListData>;
}

#[cfg(test)]
pub(crate) use mock::MockRepository;

#[cfg(test)]
mod mock {
    use std::{
        collections::HashMap,
        path::{Path, PathBuf},
    };

    use parking_lot::Mutex;

    use super::TrainingProgramRepository;
    use crate::{Error, Result, domain::TrainingProgramListData};

    /// In-memory repository that remembers every stored snapshot and counts `store` calls.
    /// Stores can be made to fail with an I/O error.
    #[derive(Debug, Default)]
    pub(crate) struct MockRepository {
        default: Mutex<Option<TrainingProgramListData>>,
        files: Mutex<HashMap<PathBuf, TrainingProgramListData>>,
        stores: Mutex<usize>,
        failing: Mutex<bool>,
    }

    impl MockRepository {
        pub fn with_default(data: TrainingProgramListData) -> Self {
            Self {
                default: Mutex::new(Some(data)),
                ..Self::default()
            }
        }

        pub fn fail_stores(&self, failing: bool) {
            *self.failing.lock() = failing;
        }

        pub fn store_count(&self) -> usize {
            *self.stores.lock()
        }

        pub fn stored(&self) -> Option<TrainingProgramListData> {
            self.default.lock().clone()
        }

        pub fn stored_at(&self, path: &Path) -> Option<TrainingProgramListData> {
            self.files.lock().get(path).cloned()
        }
    }

    impl TrainingProgramRepository for MockRepository {
        fn store(&self, data: &TrainingProgramListData, path: Option<&Path>) -> Result<()> {
            *self.stores.lock() += 1;
            if *self.failing.lock() {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "store refused",
                )));
            }
            match path {
                Some(path) => {
                    self.files.lock().insert(path.to_path_buf(), data.clone());
                }
                None => *self.default.lock() = Some(data.clone()),
            }
            Ok(())
        }

        fn restore(&self, path: Option<&Path>) -> Result<TrainingProgramListData> {
            match path {
                Some(path) => self.files.lock().get(path).cloned().ok_or_else(|| {
                    Error::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        path.display().to_string(),
                    ))
                }),
                None => Ok(self.default.lock().clone().unwrap_or_default()),
            }
        }
    }
}
