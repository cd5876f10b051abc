//! Plain data describing training programs.
//!
//! Field names and the integer-millisecond duration encoding are what program files on disk look
//! like, so they must not change.

mod entry;
mod list;
mod program;
mod program_id;

pub use entry::{EntryKind, TrainingProgramEntry};
pub use list::TrainingProgramListData;
pub use program::{DEFAULT_PROGRAM_NAME, TrainingProgram};
pub use program_id::ProgramId;

/// (De)serializes a [`Duration`](std::time::Duration) as whole milliseconds.
pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, ser::Error};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(duration.as_millis()).map_err(S::Error::custom)?;
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
