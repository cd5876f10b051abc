use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a [`TrainingProgram`](super::TrainingProgram).
///
/// Freshly created programs get a random UUID; imported programs keep whatever ID their file
/// carries, so any string is accepted.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Deref, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProgramId(String);

impl ProgramId {
    /// Allocate an ID that has never been handed out before.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProgramId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for ProgramId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(ProgramId::generate(), ProgramId::generate());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ProgramId::from("abc");

        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        assert_eq!(id.to_string(), "abc");
    }
}
