use std::path::PathBuf;

use clap::Subcommand;
use training_timer_lib::{ListController, Result, TrainingProgramRepository};

use crate::picker::ArgPath;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Save the whole list to a JSON file or directory
    Save { file: PathBuf },
    /// Replace the whole list with the contents of a JSON file
    Load { file: PathBuf },
    /// Show or change the workshop folder used by workshop map entries
    Workshop { path: Option<String> },
}

pub fn handle(
    controller: &mut ListController,
    repo: &dyn TrainingProgramRepository,
    cmd: &Command,
) -> Result<()> {
    match cmd {
        Command::Save { file } => {
            if let Some(path) = controller.save_training_programs(&ArgPath(file.clone()))? {
                println!("{}", path.display());
            }
        }
        Command::Load { file } => {
            if controller
                .load_training_programs(&ArgPath(file.clone()))?
                .is_some()
            {
                // Loading never writes the default file, which the next run starts from
                let snapshot = controller.list_snapshot();
                repo.store(&snapshot, None)?;
                println!("Loaded {} training programs", snapshot.len());
            }
        }
        Command::Workshop { path: Some(path) } => {
            controller.change_workshop_folder_location(path.as_str())?
        }
        Command::Workshop { path: None } => println!("{}", controller.workshop_folder_location()),
    }

    Ok(())
}
