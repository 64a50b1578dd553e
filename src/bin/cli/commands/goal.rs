use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{checkbox, short_id, Color};
use crate::OutputFormat;

use melete_lib::planner::dates;
use melete_lib::planner::Goal;

pub fn run_add(
    app: &App,
    description: &str,
    due: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let before = app.store.plan().goals.len();
    let plan = app.tolerate_save_failure(app.store.add_goal(description, due));

    if plan.goals.len() == before {
        println!("Nothing to add: the description is empty.");
        return Ok(());
    }
    let Some(goal) = plan.goals.last() else {
        return Ok(());
    };

    if let Some(raw) = due {
        if goal.target_date.is_none() {
            eprintln!("note: could not parse '{}'; goal saved without a target date", raw);
        }
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(goal)?);
        }
        OutputFormat::Plain => {
            match goal.target_date {
                Some(date) => println!(
                    "Added goal {}: {} (due {})",
                    short_id(&goal.id),
                    goal.description,
                    dates::format_display_date(Some(&date.to_rfc3339()))
                ),
                None => println!("Added goal {}: {}", short_id(&goal.id), goal.description),
            }
        }
    }

    Ok(())
}

pub fn run_list(
    app: &App,
    completed: bool,
    pending: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let plan = app.store.plan();
    let goals: Vec<&Goal> = plan
        .goals
        .iter()
        .filter(|g| {
            if completed {
                g.completed
            } else if pending {
                !g.completed
            } else {
                true
            }
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&goals)?);
        }
        OutputFormat::Plain => {
            if goals.is_empty() {
                println!("No goals yet. Add one with 'melete goal add'.");
                return Ok(());
            }

            let max_desc_len = goals
                .iter()
                .map(|g| g.description.len())
                .max()
                .unwrap_or(4)
                .max(4);

            println!("{:<8} {:<3} {:<width$} Due", "Id", "", "Goal", width = max_desc_len);
            println!(
                "{} {} {} {}",
                "\u{2500}".repeat(8),
                "\u{2500}".repeat(3),
                "\u{2500}".repeat(max_desc_len),
                "\u{2500}".repeat(12)
            );

            for goal in &goals {
                let due = dates::format_display_date(
                    goal.target_date.map(|d| d.to_rfc3339()).as_deref(),
                );
                let mark = checkbox(goal.completed);
                let mark = if use_color && goal.completed {
                    format!("{}{}{}", Color::GREEN, mark, Color::RESET)
                } else {
                    mark.to_string()
                };

                if use_color {
                    println!(
                        "{}{}{} {} {:<width$} {}",
                        Color::GRAY,
                        short_id(&goal.id),
                        Color::RESET,
                        mark,
                        goal.description,
                        due,
                        width = max_desc_len
                    );
                } else {
                    println!(
                        "{} {} {:<width$} {}",
                        short_id(&goal.id),
                        mark,
                        goal.description,
                        due,
                        width = max_desc_len
                    );
                }
            }

            let percent = (plan.completion_ratio() * 100.0).round() as u32;
            println!(
                "\n{} goals, {} completed ({}%)",
                plan.goals.len(),
                plan.completed_goals(),
                percent
            );
        }
    }

    Ok(())
}

pub fn run_toggle(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    let goal = app.find_goal(id)?;
    let plan = app.tolerate_save_failure(app.store.toggle_goal(goal.id));

    let Some(updated) = plan.goals.iter().find(|g| g.id == goal.id) else {
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(updated)?);
        }
        OutputFormat::Plain => {
            if updated.completed {
                println!("Marked done: {}", updated.description);
            } else {
                println!("Reopened: {}", updated.description);
            }
        }
    }

    Ok(())
}

pub fn run_remove(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    let goal = app.find_goal(id)?;
    app.tolerate_save_failure(app.store.delete_goal(goal.id));

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "removed": goal.id.to_string(),
                "description": goal.description,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Removed goal {}: {}", short_id(&goal.id), goal.description);
        }
    }

    Ok(())
}
