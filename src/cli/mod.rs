pub mod chart;
pub mod history;
pub mod reasons;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use crate::{
    analysis::period::Period,
    data::DataManager,
    storage::key_value::FileKeyValueStore,
    utils::{
        dir::create_application_default_path,
        logging::enable_logging,
    },
};

use self::{history::ExportCommand, reasons::ReasonsCommand};

#[derive(Parser, Debug)]
#[command(name = "WakeLog", version, long_about = None)]
#[command(about = "Log why you woke up at night", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default uses $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Log a wake-up with one or more reasons")]
    Log {
        #[arg(required = true, help = "Reason ids or names. Use \"other\" for anything else")]
        reasons: Vec<String>,
        #[arg(long, help = "Describes what the \"other\" reason was")]
        other: Option<String>,
    },
    #[command(about = "Show logged wake-ups, most recent first")]
    History,
    #[command(about = "Delete wake-ups using the numbers shown by history")]
    Delete {
        #[arg(required = true)]
        numbers: Vec<usize>,
    },
    #[command(about = "Delete every logged wake-up")]
    Clear {
        #[arg(long, help = "Confirm that all entries should be deleted")]
        yes: bool,
    },
    #[command(about = "Chart how often each reason woke you up")]
    Chart {
        #[arg(short, long, default_value_t = Period::AllTime)]
        period: Period,
    },
    #[command(about = "Export the history as CSV")]
    Export {
        #[command(flatten)]
        command: ExportCommand,
    },
    #[command(about = "Manage wake-up reasons")]
    Reasons {
        #[command(subcommand)]
        command: ReasonsCommand,
    },
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args.dir.map_or_else(create_application_default_path, Ok)?;

    enable_logging(&app_dir, args.log)?;

    let mut manager = DataManager::new(FileKeyValueStore::new(app_dir.join("data"))?);

    match args.commands {
        Commands::Log { reasons, other } => history::log_wake_up(&mut manager, &reasons, other),
        Commands::History => {
            print!("{}", history::render_history(&manager));
            Ok(())
        }
        Commands::Delete { numbers } => history::delete(&mut manager, &numbers),
        Commands::Clear { yes } => history::clear(&mut manager, yes),
        Commands::Chart { period } => {
            print!("{}", chart::render_chart(&manager.summarize(period), chart::use_colors()));
            Ok(())
        }
        Commands::Export { command } => history::export(&manager, command),
        Commands::Reasons { command } => reasons::process_reasons_command(&mut manager, command),
    }
}

/// Builds a clap style error so that invalid values look the same as parsing failures.
pub(crate) fn validation_error(message: impl std::fmt::Display) -> anyhow::Error {
    Args::command()
        .error(clap::error::ErrorKind::ValueValidation, message)
        .into()
}
