use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::millis;

/// What a [`TrainingProgramEntry`] does once its timer starts.
///
/// Persisted as an integer (`0`, `1`, `2`) so existing program files keep loading.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Display, ValueEnum, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
#[strum(serialize_all = "title_case")]
pub enum EntryKind {
    /// Just a countdown
    #[default]
    Timer,
    /// Loads the training pack given by the entry's code
    TrainingPack,
    /// Loads the workshop map given by the entry's path
    WorkshopMap,
}

impl From<EntryKind> for u8 {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Timer => 0,
            EntryKind::TrainingPack => 1,
            EntryKind::WorkshopMap => 2,
        }
    }
}

impl TryFrom<u8> for EntryKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EntryKind::Timer),
            1 => Ok(EntryKind::TrainingPack),
            2 => Ok(EntryKind::WorkshopMap),
            other => Err(format!("unknown entry type {other}")),
        }
    }
}

/// A single timed unit inside a training program. It has no identity of its own and is addressed
/// by its index in the owning program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingProgramEntry {
    pub name: String,
    #[serde(with = "millis")]
    pub duration: Duration,
    #[serde(rename = "Type")]
    pub kind: EntryKind,
    /// Only meaningful for [`EntryKind::TrainingPack`]
    #[serde(default)]
    pub training_pack_code: String,
    /// Only meaningful for [`EntryKind::WorkshopMap`], relative to the workshop folder
    #[serde(default)]
    pub workshop_map_path: String,
}

impl TrainingProgramEntry {
    /// A plain countdown entry.
    pub fn timer(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
            kind: EntryKind::Timer,
            training_pack_code: String::new(),
            workshop_map_path: String::new(),
        }
    }

    pub fn training_pack(name: impl Into<String>, duration: Duration, code: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::TrainingPack,
            training_pack_code: code.into(),
            ..Self::timer(name, duration)
        }
    }

    pub fn workshop_map(name: impl Into<String>, duration: Duration, path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::WorkshopMap,
            workshop_map_path: path.into(),
            ..Self::timer(name, duration)
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_field_names_and_encoding() {
        let entry = TrainingProgramEntry::training_pack("Aerials", Duration::from_secs(90), "A503-264B");

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "Name": "Aerials",
                "Duration": 90_000,
                "Type": 1,
                "TrainingPackCode": "A503-264B",
                "WorkshopMapPath": "",
            })
        );
    }

    #[test]
    fn test_locators_default_when_absent() {
        let entry: TrainingProgramEntry =
            serde_json::from_value(json!({ "Name": "Free play", "Duration": 500, "Type": 0 })).unwrap();

        assert_eq!(entry, TrainingProgramEntry::timer("Free play", Duration::from_millis(500)));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = serde_json::from_value::<TrainingProgramEntry>(
            json!({ "Name": "Odd", "Duration": 1, "Type": 7 }),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let result = serde_json::from_value::<TrainingProgramEntry>(
            json!({ "Name": "Odd", "Duration": -5, "Type": 0 }),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(EntryKind::WorkshopMap.to_string(), "Workshop Map");
    }
}
