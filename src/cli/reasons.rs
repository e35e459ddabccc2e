use anyhow::Result;
use clap::Subcommand;

use crate::{
    data::DataManager,
    storage::{
        entities::{Reason, MAX_CUSTOM_REASONS, OTHER_REASON_NAME},
        key_value::KeyValueStore,
    },
};

use super::{chart::use_colors, validation_error};

#[derive(Subcommand, Debug)]
pub enum ReasonsCommand {
    #[command(about = "List reasons in the order they are shown")]
    List,
    #[command(about = "Add a custom reason")]
    Add { name: String },
    #[command(about = "Rename a custom reason")]
    Rename {
        #[arg(help = "Id or current name of the reason")]
        reason: String,
        name: String,
    },
    #[command(about = "Remove a custom reason. Logged wake-ups keep their reasons")]
    Remove {
        #[arg(help = "Id or current name of the reason")]
        reason: String,
    },
    #[command(about = "Move a reason to another position, positions start at 1")]
    Move { from: usize, to: usize },
}

pub fn process_reasons_command<S: KeyValueStore>(
    manager: &mut DataManager<S>,
    command: ReasonsCommand,
) -> Result<()> {
    match command {
        ReasonsCommand::List => {
            print!("{}", render_reasons(manager, use_colors()));
        }
        ReasonsCommand::Add { name } => {
            let reason = manager.add_reason(&name)?;
            println!("Added {} ({})", reason.name, reason.id);
        }
        ReasonsCommand::Rename { reason, name } => {
            let reason = find_custom(manager, &reason)?;
            manager.update_reason(&reason.id, &name)?;
        }
        ReasonsCommand::Remove { reason } => {
            let reason = find_custom(manager, &reason)?;
            manager.remove_reason(&reason.id)?;
            println!("Removed {}", reason.name);
        }
        ReasonsCommand::Move { from, to } => {
            if from == 0 || from > manager.custom_reasons().len() {
                return Err(validation_error(format!("There is no reason at position {from}")));
            }
            manager.reorder_reasons(from - 1, to.saturating_sub(1))?;
        }
    }
    Ok(())
}

/// Resolves a reason the user can edit, "Other" excluded.
fn find_custom<S: KeyValueStore>(manager: &DataManager<S>, value: &str) -> Result<Reason> {
    manager
        .reasons()
        .resolve(value)
        .filter(|reason| !reason.is_other())
        .ok_or_else(|| validation_error(format!("There is no custom reason \"{value}\"")))
}

pub fn render_reasons<S: KeyValueStore>(manager: &DataManager<S>, colored: bool) -> String {
    let mut output = String::new();
    for (index, reason) in manager.custom_reasons().iter().enumerate() {
        output += &format!(
            "{}. {} {} ({})\n",
            index + 1,
            swatch(manager, &reason.id, colored),
            reason.name,
            reason.id
        );
    }
    output += &format!(
        "   {} {OTHER_REASON_NAME} (always shown)\n\n",
        swatch(manager, &Reason::other().id, colored)
    );

    if manager.can_add_reason() {
        output += &format!(
            "{} of {MAX_CUSTOM_REASONS} custom reasons used.\n",
            manager.custom_reasons().len()
        );
    } else {
        output += &format!("Maximum of {MAX_CUSTOM_REASONS} custom reasons reached.\n");
    }
    output
}

fn swatch<S: KeyValueStore>(manager: &DataManager<S>, reason_id: &str, colored: bool) -> String {
    let color = manager.color_for(reason_id);
    if colored {
        ansi_term::Colour::RGB(color.r, color.g, color.b)
            .paint("■")
            .to_string()
    } else {
        color.to_string()
    }
}
