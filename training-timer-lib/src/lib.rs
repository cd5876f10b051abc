//! Core of the training timer: an ordered, user-editable list of training programs.
//!
//! The [`ListController`] owns the live list, pushes an immutable
//! [`TrainingProgramListData`] snapshot to every registered [`ListReceiver`] after each change
//! and persists it through a [`TrainingProgramRepository`].

use thiserror::Error;

pub mod config;
pub mod control;
pub mod domain;
pub mod fs;
pub mod repository;

pub use control::{ListController, ListReceiver, PathPicker};
pub use domain::{EntryKind, ProgramId, TrainingProgram, TrainingProgramEntry, TrainingProgramListData};
pub use repository::{JsonFileRepository, TrainingProgramRepository};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("There is no training program with ID {id} (parameter {role})")]
    NotFound { id: ProgramId, role: &'static str },
    #[error("Training program {0} is read-only")]
    ReadOnly(ProgramId),
    #[error("Training program {id} has no entry at index {index} (it has {len})")]
    EntryOutOfRange {
        id: ProgramId,
        index: usize,
        len: usize,
    },
    /// The order sequence and the program mapping disagree. This is a bug, not bad input.
    #[error("Training program list is inconsistent: {0}")]
    InconsistentState(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse training program data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Training program data is malformed: {0}")]
    Malformed(String),
    #[error("Could not parse configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Could not serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("$HOME must exist")]
    NoHomeDir,
}
