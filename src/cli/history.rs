use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use crate::{
    data::DataManager,
    storage::key_value::KeyValueStore,
    utils::time::format_entry_time,
};

use super::validation_error;

#[derive(Debug, clap::Args)]
pub struct ExportCommand {
    #[arg(
        short,
        long,
        help = "Directory the CSV file is written into. Defaults to the temporary directory"
    )]
    output: Option<PathBuf>,
    #[arg(long, help = "Print the CSV instead of writing a file", conflicts_with = "output")]
    stdout: bool,
}

pub fn log_wake_up<S: KeyValueStore>(
    manager: &mut DataManager<S>,
    reasons: &[String],
    other: Option<String>,
) -> Result<()> {
    let mut reason_ids = Vec::with_capacity(reasons.len());
    for value in reasons {
        let Some(reason) = manager.reasons().resolve(value) else {
            return Err(validation_error(format!(
                "Unknown reason \"{value}\". Run `wakelog reasons list` to see available reasons"
            )));
        };
        reason_ids.push(reason.id);
    }

    let entry = manager.add_entry(reason_ids, other)?;
    println!("Logged! {}", entry.reasons_description(&manager.all_reasons()));
    Ok(())
}

/// Numbered history, the numbers are the ones `delete` accepts.
pub fn render_history<S: KeyValueStore>(manager: &DataManager<S>) -> String {
    let entries = manager.entries();
    if entries.is_empty() {
        return "No wake-ups logged yet\n".to_string();
    }

    let reasons = manager.all_reasons();
    let mut output = String::new();
    for (index, entry) in entries.iter().enumerate() {
        output += &format!(
            "{}\t{}\t{}\n",
            index + 1,
            format_entry_time(&entry.timestamp.with_timezone(&Local)),
            entry.reasons_description(&reasons)
        );
    }
    output
}

pub fn delete<S: KeyValueStore>(manager: &mut DataManager<S>, numbers: &[usize]) -> Result<()> {
    let count = manager.entries().len();
    let mut indices = Vec::with_capacity(numbers.len());
    for number in numbers {
        if *number == 0 || *number > count {
            return Err(validation_error(format!(
                "There is no entry number {number}, history has {count} entries"
            )));
        }
        indices.push(number - 1);
    }

    let removed = manager.delete_entries(&indices)?;
    println!("Deleted {removed} entries");
    Ok(())
}

pub fn clear<S: KeyValueStore>(manager: &mut DataManager<S>, confirmed: bool) -> Result<()> {
    if !confirmed {
        println!(
            "This will permanently delete all logged wake-ups. This cannot be undone.\n\
             Run again with --yes to confirm."
        );
        return Ok(());
    }
    let removed = manager.clear_entries()?;
    println!("Deleted {removed} entries");
    Ok(())
}

pub fn export<S: KeyValueStore>(manager: &DataManager<S>, command: ExportCommand) -> Result<()> {
    if command.stdout {
        print!("{}", manager.export_csv()?);
        return Ok(());
    }
    let dir = command.output.unwrap_or_else(std::env::temp_dir);
    let path = manager.write_csv_export(&dir)?;
    println!("{}", path.display());
    Ok(())
}
