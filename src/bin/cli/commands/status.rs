use anyhow::Result;

use crate::app::App;
use crate::render::terminal::Color;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let plan = app.store.plan();
    let progress = plan.progress();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "userId": plan.user_id,
                "progress": progress,
                "subjects": plan.subjects,
                "lastUpdated": plan.last_updated,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let percent = (progress.completion_ratio * 100.0).round() as u32;

            if use_color {
                println!("{}Study plan for {}{}", Color::BOLD, plan.user_id, Color::RESET);
            } else {
                println!("Study plan for {}", plan.user_id);
            }

            println!(
                "  Goals:    {} total, {} completed, {} pending ({}%)",
                progress.total_goals, progress.completed_goals, progress.incomplete_goals, percent
            );

            if plan.subjects.is_empty() {
                println!("  Subjects: (none)");
            } else {
                println!("  Subjects: {}", plan.subjects.join(", "));
            }

            println!("  Updated:  {}", plan.last_updated.format("%b %-d, %Y %H:%M"));
        }
    }

    Ok(())
}
