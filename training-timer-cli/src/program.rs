use std::{path::PathBuf, time::Duration};

use clap::Subcommand;
use colored::Colorize;
use training_timer_lib::{EntryKind, ListController, ProgramId, Result};

use crate::picker::ArgPath;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List training programs in display order
    List,
    /// Show a training program and its entries
    Show { id: String },
    /// Add a new, empty training program
    Add { name: Option<String> },
    /// Remove a training program
    Remove { id: String },
    /// Swap the positions of two training programs
    Swap { first: String, second: String },
    /// Rename a training program
    Rename { id: String, name: String },
    /// Set the total duration of a training program, in milliseconds
    Duration { id: String, ms: u64 },
    /// Import a training program from a JSON file
    Import { file: PathBuf },
    /// Export a training program to a JSON file or directory
    Export { id: String, file: PathBuf },
}

pub fn handle(controller: &mut ListController, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List => {
            for (position, program) in controller.list_snapshot().iter().enumerate() {
                let read_only = if program.read_only { " (read-only)" } else { "" };
                println!(
                    "{position}. {} [{}]{read_only} {}",
                    program.name.bold(),
                    format_duration(program.duration),
                    program.id().as_str().dimmed()
                );
            }
        }
        Command::Show { id } => {
            let program = controller.program(&ProgramId::from(id.as_str()))?;
            println!("{} {}", program.name.bold(), program.id().as_str().dimmed());
            println!(
                "Duration: {} (entries add up to {})",
                format_duration(program.duration),
                format_duration(program.entries_duration())
            );
            if program.read_only {
                println!("{}", "read-only".yellow());
            }
            for (index, entry) in program.entries.iter().enumerate() {
                let locator = match entry.kind {
                    EntryKind::Timer => String::new(),
                    EntryKind::TrainingPack => {
                        format!(" {}", entry.training_pack_code)
                    }
                    EntryKind::WorkshopMap => {
                        format!(" {}", entry.workshop_map_path)
                    }
                };
                println!(
                    "  {index}. {} [{}] {}{locator}",
                    entry.name,
                    format_duration(entry.duration),
                    entry.kind.to_string().dimmed()
                );
            }
        }
        Command::Add { name } => {
            let id = controller.add_program()?;
            if let Some(name) = name {
                controller.rename_program(&id, name.as_str())?;
            }
            println!("{id}");
        }
        Command::Remove { id } => controller.remove_program(&ProgramId::from(id.as_str()))?,
        Command::Swap { first, second } => controller.swap_programs(
            &ProgramId::from(first.as_str()),
            &ProgramId::from(second.as_str()),
        )?,
        Command::Rename { id, name } => {
            controller.rename_program(&ProgramId::from(id.as_str()), name.as_str())?
        }
        Command::Duration { id, ms } => controller
            .set_program_duration(&ProgramId::from(id.as_str()), Duration::from_millis(*ms))?,
        Command::Import { file } => {
            match controller.load_training_program(&ArgPath(file.clone()))? {
                Some(id) => println!("{id}"),
                None => eprintln!("{}", "Nothing was imported, see the log for details".yellow()),
            }
        }
        Command::Export { id, file } => {
            if let Some(path) = controller
                .save_training_program(&ProgramId::from(id.as_str()), &ArgPath(file.clone()))?
            {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

/// `m:ss`, or `h:mm:ss` for anything an hour or longer
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (
        secs.div_euclid(3600),
        secs.rem_euclid(3600).div_euclid(60),
        secs.rem_euclid(60),
    );

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "0:00");
        assert_eq!(format_duration(Duration::from_millis(90_500)), "1:30");
        assert_eq!(format_duration(Duration::from_secs(3_725)), "1:02:05");
    }
}
