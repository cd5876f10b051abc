use std::time::Duration;

use clap::Subcommand;
use training_timer_lib::{EntryKind, ListController, ProgramId, Result, TrainingProgramEntry};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Append an entry to a training program
    Add {
        program: String,
        name: String,
        /// Duration in milliseconds
        ms: u64,
        #[arg(long, value_enum, default_value_t = EntryKind::Timer)]
        kind: EntryKind,
        /// Training pack code, for `--kind training-pack`
        #[arg(long)]
        code: Option<String>,
        /// Map path relative to the workshop folder, for `--kind workshop-map`
        #[arg(long)]
        map: Option<String>,
    },
    /// Remove the entry at the given position
    Remove { program: String, index: usize },
    /// Swap two entries of a training program
    Swap {
        program: String,
        first: usize,
        second: usize,
    },
}

pub fn handle(controller: &mut ListController, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Add {
            program,
            name,
            ms,
            kind,
            code,
            map,
        } => {
            let entry = TrainingProgramEntry {
                name: name.clone(),
                duration: Duration::from_millis(*ms),
                kind: *kind,
                training_pack_code: code.clone().unwrap_or_default(),
                workshop_map_path: map.clone().unwrap_or_default(),
            };
            controller.add_entry(&ProgramId::from(program.as_str()), entry)?;
        }
        Command::Remove { program, index } => {
            let removed = controller.remove_entry(&ProgramId::from(program.as_str()), *index)?;
            println!("Removed {}", removed.name);
        }
        Command::Swap {
            program,
            first,
            second,
        } => controller.swap_entries(&ProgramId::from(program.as_str()), *first, *second)?,
    }

    Ok(())
}
