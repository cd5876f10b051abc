use std::{path::PathBuf, process::ExitCode, sync::Arc};

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use training_timer_lib::{
    Error, JsonFileRepository, ListController, ListReceiver, Result, TrainingProgramListData,
    config::CoreConfig,
};

mod entry;
mod list;
mod picker;
mod program;

#[derive(Parser, Debug)]
#[command(name = "training-timer")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log what the controller is doing
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this file instead of the configured training program list
    #[arg(long, global = true)]
    programs_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Operate on training programs
    #[command(subcommand)]
    Program(program::Command),
    /// Operate on the entries of a training program
    #[command(subcommand)]
    Entry(entry::Command),
    /// Operate on the whole list
    #[command(subcommand)]
    List(list::Command),
}

/// Logs every snapshot the controller publishes
struct LogReceiver;

impl ListReceiver for LogReceiver {
    fn receive_list(&self, data: &TrainingProgramListData) {
        debug!("Training program list now has {} programs", data.len());
    }
}

fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // Logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    match run(&cli) {
        Ok(()) => sysexits::ExitCode::Ok.into(),
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            exit_code(&err).into()
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let cfg = CoreConfig::load()?.into_handle();
    if let Some(path) = &cli.programs_file {
        cfg.write().set_programs_file(path);
    }

    let repo = Arc::new(JsonFileRepository::new(cfg));
    let mut controller = ListController::new(repo.clone());
    controller.register_receiver(Arc::new(LogReceiver));
    restore_or_start_empty(&mut controller, &repo)?;

    match &cli.command {
        Command::Program(cmd) => program::handle(&mut controller, cmd),
        Command::Entry(cmd) => entry::handle(&mut controller, cmd),
        Command::List(cmd) => list::handle(&mut controller, repo.as_ref(), cmd),
    }
}

/// Load the default list. If the stored list can't be used, it is reported and the session starts
/// with an empty list instead, so that `list load` can still replace it.
fn restore_or_start_empty(
    controller: &mut ListController,
    repo: &JsonFileRepository,
) -> Result<()> {
    match controller.restore_from_storage(None) {
        // Already backed up by the repository
        Err(Error::Parse(err)) => {
            error!("Stored training programs are unreadable, starting empty: {err}");
            Ok(())
        }
        Err(Error::Malformed(problem)) => {
            let backup = repo.back_up_default()?;
            error!(
                "Stored training programs are inconsistent, starting empty. Backed up to {}: {problem}",
                backup.display()
            );
            Ok(())
        }
        result => result,
    }
}

fn exit_code(err: &Error) -> sysexits::ExitCode {
    match err {
        Error::NotFound { .. }
        | Error::ReadOnly(_)
        | Error::EntryOutOfRange { .. }
        | Error::Parse(_)
        | Error::Malformed(_) => sysexits::ExitCode::DataErr,
        Error::Io(_) => sysexits::ExitCode::IoErr,
        Error::Config(_) | Error::ConfigWrite(_) | Error::NoHomeDir => sysexits::ExitCode::Config,
        Error::InconsistentState(_) => sysexits::ExitCode::Software,
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use clap::CommandFactory;

    use super::*;

    fn open(dir: &std::path::Path) -> Result<ListController> {
        let repo = Arc::new(JsonFileRepository::new(CoreConfig::in_dir(dir).into_handle()));
        let mut controller = ListController::new(repo.clone());
        restore_or_start_empty(&mut controller, &repo)?;
        Ok(controller)
    }

    fn backups(dir: &std::path::Path) -> usize {
        fs::read_dir(dir.join("backups")).unwrap().count()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bugs_are_told_apart_from_bad_input() {
        assert_eq!(
            exit_code(&Error::InconsistentState("x".into())),
            sysexits::ExitCode::Software
        );
        assert_eq!(
            exit_code(&Error::NotFound {
                id: "x".into(),
                role: "training program ID"
            }),
            sysexits::ExitCode::DataErr
        );
    }

    #[test]
    fn test_unreadable_list_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("training_programs.json"), "{ not json").unwrap();

        let mut controller = open(dir.path()).unwrap();

        assert!(controller.list_snapshot().is_empty());
        assert_eq!(backups(dir.path()), 1);

        let id = controller.add_program().unwrap();
        assert_eq!(open(dir.path()).unwrap().list_snapshot().order(), &[id]);
    }

    #[test]
    fn test_inconsistent_list_is_backed_up_and_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let orphaned = r#"{
            "TrainingProgramOrder": ["missing"],
            "TrainingProgramData": {},
            "WorkshopFolderLocation": ""
        }"#;
        fs::write(dir.path().join("training_programs.json"), orphaned).unwrap();

        let controller = open(dir.path()).unwrap();

        assert!(controller.list_snapshot().is_empty());
        assert_eq!(backups(dir.path()), 1);
    }

    #[test]
    fn test_unreachable_list_is_still_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("training_programs.json")).unwrap();

        assert!(matches!(open(dir.path()), Err(Error::Io(_))));
    }
}
