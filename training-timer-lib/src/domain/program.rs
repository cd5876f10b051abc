use std::time::Duration;

use getset::Getters;
use serde::{Deserialize, Serialize};

use super::{ProgramId, TrainingProgramEntry, millis};

pub const DEFAULT_PROGRAM_NAME: &str = "New Training Program";

/// A named, ordered collection of [`TrainingProgramEntry`]s.
///
/// The total `duration` is stored as its own field and is not kept in sync with the entries;
/// [`entries_duration`](Self::entries_duration) gives the derived value for display.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingProgram {
    #[getset(get = "pub")]
    id: ProgramId,
    pub name: String,
    #[serde(with = "millis")]
    pub duration: Duration,
    pub entries: Vec<TrainingProgramEntry>,
    /// Set on programs that ship with the application; blocks edits through the controller
    #[serde(default)]
    pub read_only: bool,
}

impl TrainingProgram {
    pub fn new(id: ProgramId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            duration: Duration::ZERO,
            entries: Vec::new(),
            read_only: false,
        }
    }

    /// A new, empty program with a freshly generated ID and the default name.
    pub(crate) fn create() -> Self {
        Self::new(ProgramId::generate(), DEFAULT_PROGRAM_NAME)
    }

    pub fn with_entries(mut self, entries: Vec<TrainingProgramEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Sum of all entry durations.
    pub fn entries_duration(&self) -> Duration {
        self.entries.iter().map(|e| e.duration).sum()
    }
}
