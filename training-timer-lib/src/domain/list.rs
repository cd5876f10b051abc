use std::collections::{BTreeMap, BTreeSet};

use getset::Getters;
use serde::{Deserialize, Serialize};

use super::{ProgramId, TrainingProgram};

/// A point-in-time copy of the whole training program list.
///
/// Snapshots are handed to receivers and to the repository. They share nothing with the live
/// list they were taken from and expose no way to mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[getset(get = "pub")]
pub struct TrainingProgramListData {
    /// Display order
    #[serde(rename = "TrainingProgramOrder")]
    order: Vec<ProgramId>,
    #[serde(rename = "TrainingProgramData")]
    programs: BTreeMap<ProgramId, TrainingProgram>,
    #[serde(default)]
    workshop_folder_location: String,
}

impl TrainingProgramListData {
    pub fn new(
        order: Vec<ProgramId>,
        programs: BTreeMap<ProgramId, TrainingProgram>,
        workshop_folder_location: String,
    ) -> Self {
        Self {
            order,
            programs,
            workshop_folder_location,
        }
    }

    /// Programs in display order.
    pub fn iter(&self) -> impl Iterator<Item = &TrainingProgram> {
        self.order.iter().filter_map(|id| self.programs.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<ProgramId>, BTreeMap<ProgramId, TrainingProgram>, String) {
        (self.order, self.programs, self.workshop_folder_location)
    }

    /// Describe the first way in which `order` and `programs` fail to match each other, if any.
    pub(crate) fn find_inconsistency(
        order: &[ProgramId],
        programs: &BTreeMap<ProgramId, TrainingProgram>,
    ) -> Option<String> {
        let mut seen = BTreeSet::new();
        for id in order {
            if !seen.insert(id) {
                return Some(format!("{id} appears more than once in the order"));
            }
            if !programs.contains_key(id) {
                return Some(format!("{id} is ordered but has no program data"));
            }
        }

        for (key, program) in programs {
            if !seen.contains(key) {
                return Some(format!("{key} has program data but is not ordered"));
            }
            if program.id() != key {
                return Some(format!("{key} holds the program with ID {}", program.id()));
            }
        }

        None
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn programs(ids: &[&str]) -> BTreeMap<ProgramId, TrainingProgram> {
        ids.iter()
            .map(|id| (ProgramId::from(*id), TrainingProgram::new((*id).into(), *id)))
            .collect()
    }

    #[test]
    fn test_document_shape() {
        let data = TrainingProgramListData::new(
            vec!["b".into(), "a".into()],
            programs(&["a", "b"]),
            "C:/workshop".into(),
        );

        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value["TrainingProgramOrder"], json!(["b", "a"]));
        assert_eq!(value["TrainingProgramData"]["a"]["Name"], json!("a"));
        assert_eq!(value["WorkshopFolderLocation"], json!("C:/workshop"));
    }

    #[test]
    fn test_iter_follows_order() {
        let data = TrainingProgramListData::new(
            vec!["b".into(), "c".into(), "a".into()],
            programs(&["a", "b", "c"]),
            String::new(),
        );

        let names: Vec<_> = data.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[test]
    fn test_find_inconsistency() {
        let map = programs(&["a", "b"]);

        assert!(TrainingProgramListData::find_inconsistency(&["a".into(), "b".into()], &map).is_none());
        assert!(TrainingProgramListData::find_inconsistency(&["a".into()], &map).is_some());
        assert!(
            TrainingProgramListData::find_inconsistency(&["a".into(), "b".into(), "c".into()], &map)
                .is_some()
        );
        assert!(
            TrainingProgramListData::find_inconsistency(&["a".into(), "a".into(), "b".into()], &map)
                .is_some()
        );

        let mut mismatched = programs(&["a"]);
        mismatched.insert("b".into(), TrainingProgram::new("c".into(), "c"));
        assert!(
            TrainingProgramListData::find_inconsistency(&["a".into(), "b".into()], &mismatched)
                .is_some()
        );
    }
}
