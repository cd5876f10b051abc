//! The authoritative, in-memory training program list.
//!
//! Every mutation goes through [`ListController`], which re-checks that the display order and the
//! program mapping still describe the same set of programs, pushes a fresh snapshot to every
//! [`ListReceiver`] and finally persists that snapshot. A mutation that can't be persisted is
//! undone.

use std::{collections::BTreeMap, path::Path, sync::Arc, time::Duration};

use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    domain::{ProgramId, TrainingProgram, TrainingProgramEntry, TrainingProgramListData},
    repository::TrainingProgramRepository,
};

mod import;

pub use import::PathPicker;

/// Anything that wants the latest list, e.g. a display.
///
/// Called synchronously during every mutation, so implementations must be quick and must not call
/// back into the controller.
pub trait ListReceiver {
    fn receive_list(&self, data: &TrainingProgramListData);
}

pub struct ListController {
    order: Vec<ProgramId>,
    programs: BTreeMap<ProgramId, TrainingProgram>,
    workshop_folder_location: String,
    receivers: Vec<Arc<dyn ListReceiver>>,
    repository: Arc<dyn TrainingProgramRepository>,
}

impl ListController {
    /// Create an empty controller. Call [`restore_from_storage`](Self::restore_from_storage) to
    /// pick up previously stored programs.
    pub fn new(repository: Arc<dyn TrainingProgramRepository>) -> Self {
        Self {
            order: Vec::new(),
            programs: BTreeMap::new(),
            workshop_folder_location: String::new(),
            receivers: Vec::new(),
            repository,
        }
    }

    /// Receivers are notified in registration order and stay registered for the controller's
    /// lifetime.
    pub fn register_receiver(&mut self, receiver: Arc<dyn ListReceiver>) {
        self.receivers.push(receiver);
    }

    // Queries

    pub fn list_snapshot(&self) -> TrainingProgramListData {
        TrainingProgramListData::new(
            self.order.clone(),
            self.programs.clone(),
            self.workshop_folder_location.clone(),
        )
    }

    pub fn program(&self, id: &ProgramId) -> Result<TrainingProgram> {
        self.programs
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(id, "training program ID"))
    }

    pub fn workshop_folder_location(&self) -> &str {
        &self.workshop_folder_location
    }

    // List operations

    /// Append a new, empty program and return its ID.
    pub fn add_program(&mut self) -> Result<ProgramId> {
        let program = TrainingProgram::create();
        let id = program.id().clone();
        let previous = self.list_snapshot();

        self.programs.insert(id.clone(), program);
        self.order.push(id.clone());
        debug!("Added training program {id}");

        self.commit(previous)?;

        Ok(id)
    }

    pub fn remove_program(&mut self, id: &ProgramId) -> Result<()> {
        self.ensure_id_is_known(id, "training program ID")?;
        let previous = self.list_snapshot();

        self.order.retain(|ordered| ordered != id);
        self.programs.remove(id);
        debug!("Removed training program {id}");

        self.commit(previous)
    }

    /// Exchange the display positions of two programs.
    pub fn swap_programs(&mut self, first: &ProgramId, second: &ProgramId) -> Result<()> {
        self.ensure_id_is_known(first, "first training program ID")?;
        self.ensure_id_is_known(second, "second training program ID")?;

        let first_index = self.order.iter().position(|id| id == first);
        let second_index = self.order.iter().position(|id| id == second);
        let (Some(first_index), Some(second_index)) = (first_index, second_index) else {
            return Err(Error::InconsistentState(format!(
                "{first} or {second} has program data but is not ordered"
            )));
        };

        let previous = self.list_snapshot();
        self.order.swap(first_index, second_index);
        debug!("Swapped training programs {first} and {second}");

        self.commit(previous)
    }

    /// Insert or replace a program by its ID.
    ///
    /// A known program keeps its position in the list; a new one is placed first.
    pub fn inject_program(&mut self, program: TrainingProgram) -> Result<()> {
        let id = program.id().clone();
        let previous = self.list_snapshot();

        if self.programs.contains_key(&id) {
            info!("Replacing existing training program with uuid {id}");
        } else {
            info!("Injecting new training program with uuid {id}");
            self.order.insert(0, id.clone());
        }
        self.programs.insert(id, program);

        self.commit(previous)?;

        info!("Successfully injected/updated training program");

        Ok(())
    }

    /// The path is not checked; whoever loads workshop maps deals with it not existing.
    pub fn change_workshop_folder_location(&mut self, location: impl Into<String>) -> Result<()> {
        let previous = self.list_snapshot();
        self.workshop_folder_location = location.into();
        debug!("Workshop folder is now {}", self.workshop_folder_location);

        self.commit(previous)
    }

    /// Replace the whole list with what the repository has stored.
    ///
    /// An empty or missing `path` means the repository's default location. Receivers are
    /// notified, but nothing is written back. If reading fails, or the stored order and programs
    /// don't match up, the live list is left as it was.
    pub fn restore_from_storage(&mut self, path: Option<&Path>) -> Result<()> {
        let path = path.filter(|p| !p.as_os_str().is_empty());
        let data = self.repository.restore(path)?;

        if let Some(problem) = TrainingProgramListData::find_inconsistency(data.order(), data.programs())
        {
            return Err(Error::Malformed(problem));
        }

        self.replace(data);
        info!("Restored {} training programs", self.order.len());

        let data = self.list_snapshot();
        self.fan_out(&data);

        Ok(())
    }

    // Program operations

    pub fn rename_program(&mut self, id: &ProgramId, name: impl Into<String>) -> Result<()> {
        let previous = self.list_snapshot();
        let program = self.editable_program(id)?;
        program.name = name.into();
        debug!("Renamed training program {id} to {}", program.name);

        self.commit(previous)
    }

    pub fn set_program_duration(&mut self, id: &ProgramId, duration: Duration) -> Result<()> {
        let previous = self.list_snapshot();
        self.editable_program(id)?.duration = duration;
        debug!("Set duration of training program {id} to {duration:?}");

        self.commit(previous)
    }

    /// Append an entry to the end of a program.
    pub fn add_entry(&mut self, id: &ProgramId, entry: TrainingProgramEntry) -> Result<()> {
        let previous = self.list_snapshot();
        let program = self.editable_program(id)?;
        debug!("Adding entry '{}' to training program {id}", entry.name);
        program.entries.push(entry);

        self.commit(previous)
    }

    pub fn remove_entry(&mut self, id: &ProgramId, index: usize) -> Result<TrainingProgramEntry> {
        let previous = self.list_snapshot();
        let program = self.editable_program(id)?;
        ensure_entry_exists(id, program, index)?;

        let entry = program.entries.remove(index);
        debug!("Removed entry '{}' from training program {id}", entry.name);

        self.commit(previous)?;

        Ok(entry)
    }

    pub fn swap_entries(&mut self, id: &ProgramId, first: usize, second: usize) -> Result<()> {
        let previous = self.list_snapshot();
        let program = self.editable_program(id)?;
        ensure_entry_exists(id, program, first)?;
        ensure_entry_exists(id, program, second)?;

        program.entries.swap(first, second);
        debug!("Swapped entries {first} and {second} of training program {id}");

        self.commit(previous)
    }

    // Helpers

    /// Check the mutated list, hand a snapshot to every receiver and persist it.
    ///
    /// `previous` is the list as it was before the mutation. It is put back if the mutated list is
    /// inconsistent, and also if it can't be stored, in which case the receivers are told about
    /// the rollback too.
    fn commit(&mut self, previous: TrainingProgramListData) -> Result<()> {
        if let Some(problem) = TrainingProgramListData::find_inconsistency(&self.order, &self.programs)
        {
            self.replace(previous);
            return Err(Error::InconsistentState(problem));
        }

        let data = self.list_snapshot();
        self.fan_out(&data);

        if let Err(err) = self.repository.store(&data, None) {
            warn!("Could not store training programs, undoing the change: {err}");
            self.fan_out(&previous);
            self.replace(previous);
            return Err(err);
        }

        Ok(())
    }

    fn fan_out(&self, data: &TrainingProgramListData) {
        for receiver in &self.receivers {
            receiver.receive_list(data);
        }
    }

    fn replace(&mut self, data: TrainingProgramListData) {
        let (order, programs, workshop_folder_location) = data.into_parts();
        self.order = order;
        self.programs = programs;
        self.workshop_folder_location = workshop_folder_location;
    }

    fn ensure_id_is_known(&self, id: &ProgramId, role: &'static str) -> Result<()> {
        if self.programs.contains_key(id) {
            Ok(())
        } else {
            Err(not_found(id, role))
        }
    }

    fn editable_program(&mut self, id: &ProgramId) -> Result<&mut TrainingProgram> {
        let program = self
            .programs
            .get_mut(id)
            .ok_or_else(|| not_found(id, "training program ID"))?;

        if program.read_only {
            return Err(Error::ReadOnly(id.clone()));
        }

        Ok(program)
    }
}

fn not_found(id: &ProgramId, role: &'static str) -> Error {
    Error::NotFound {
        id: id.clone(),
        role,
    }
}

fn ensure_entry_exists(id: &ProgramId, program: &TrainingProgram, index: usize) -> Result<()> {
    if index < program.entries.len() {
        Ok(())
    } else {
        Err(Error::EntryOutOfRange {
            id: id.clone(),
            index,
            len: program.entries.len(),
        })
    }
}
