use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run_add(app: &App, name: &str, format: &OutputFormat) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        println!("Nothing to add: the subject name is empty.");
        return Ok(());
    }

    let already_tracked = app.store.plan().subjects.iter().any(|s| s == trimmed);
    let plan = app.tolerate_save_failure(app.store.add_subject(name));

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&plan.subjects)?);
        }
        OutputFormat::Plain => {
            if already_tracked {
                println!("Already tracking '{}'.", trimmed);
            } else {
                println!("Now tracking '{}'.", trimmed);
            }
        }
    }

    Ok(())
}

pub fn run_list(app: &App, format: &OutputFormat) -> Result<()> {
    let plan = app.store.plan();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&plan.subjects)?);
        }
        OutputFormat::Plain => {
            if plan.subjects.is_empty() {
                println!("No subjects tracked. Add one with 'melete subject add'.");
                return Ok(());
            }

            for subject in &plan.subjects {
                println!("  \u{2022} {}", subject);
            }
            println!("\n{} subjects", plan.subjects.len());
        }
    }

    Ok(())
}

pub fn run_remove(app: &App, name: &str, format: &OutputFormat) -> Result<()> {
    let was_tracked = app.store.plan().subjects.iter().any(|s| s == name);
    let plan = app.tolerate_save_failure(app.store.delete_subject(name));

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&plan.subjects)?);
        }
        OutputFormat::Plain => {
            if was_tracked {
                println!("Stopped tracking '{}'.", name);
            } else {
                println!("Not tracking '{}' (names are exact, including case).", name);
            }
        }
    }

    Ok(())
}
