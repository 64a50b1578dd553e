mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "melete", about = "Study planner and AI study-aid CLI", version)]
struct Cli {
    /// Store plans in a specific directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Act as a specific user (default: from config)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Manage study goals
    #[command(subcommand)]
    Goal(GoalCommand),

    /// Manage tracked subjects
    #[command(subcommand)]
    Subject(SubjectCommand),

    /// Show plan progress
    Status,

    /// Generate flashcards from notes
    Flashcards {
        /// Notes file to read (use "-" or pipe for stdin)
        notes: Option<String>,
    },

    /// Generate a quiz from study text
    Quiz {
        /// Text file to read (use "-" or pipe for stdin)
        text: Option<String>,
    },

    /// Ask the study buddy a question
    Ask {
        /// The question to ask
        #[arg(required = true)]
        question: Vec<String>,
    },
}

#[derive(Subcommand)]
enum GoalCommand {
    /// Add a new goal
    Add {
        /// What to accomplish
        description: String,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// List goals
    List {
        /// Show only completed goals
        #[arg(long, conflicts_with = "pending")]
        completed: bool,
        /// Show only pending goals
        #[arg(long)]
        pending: bool,
    },

    /// Flip a goal between open and done
    Toggle {
        /// Goal id (unique prefix accepted)
        id: String,
    },

    /// Remove a goal
    Remove {
        /// Goal id (unique prefix accepted)
        id: String,
    },
}

#[derive(Subcommand)]
enum SubjectCommand {
    /// Track a subject
    Add {
        /// Subject name
        name: String,
    },

    /// List tracked subjects
    List,

    /// Stop tracking a subject
    Remove {
        /// Subject name (exact match)
        name: String,
    },
}

/// Read study material from a file argument, or stdin when piped or "-"
fn read_material(path: Option<&str>) -> anyhow::Result<String> {
    use anyhow::Context;

    match path {
        Some("-") => {
            // Explicit stdin read
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
            Ok(buf)
        }
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        None => {
            if stdin_is_tty() {
                anyhow::bail!("No input. Pass a file argument or pipe text on stdin.");
            }
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
            if buf.trim().is_empty() {
                anyhow::bail!("No input. Pass a file argument or pipe text on stdin.");
            }
            Ok(buf)
        }
    }
}

/// Check if stdin is a terminal (not piped)
fn stdin_is_tty() -> bool {
    unsafe { libc_isatty(0) != 0 }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();

    let app = app::App::new(cli.data_dir.clone(), cli.user.clone())?;

    match cli.command {
        Command::Goal(subcmd) => match subcmd {
            GoalCommand::Add { description, due } => {
                commands::goal::run_add(&app, &description, due.as_deref(), &cli.format)?;
            }
            GoalCommand::List { completed, pending } => {
                commands::goal::run_list(&app, completed, pending, &cli.format, use_color)?;
            }
            GoalCommand::Toggle { id } => {
                commands::goal::run_toggle(&app, &id, &cli.format)?;
            }
            GoalCommand::Remove { id } => {
                commands::goal::run_remove(&app, &id, &cli.format)?;
            }
        },
        Command::Subject(subcmd) => match subcmd {
            SubjectCommand::Add { name } => {
                commands::subject::run_add(&app, &name, &cli.format)?;
            }
            SubjectCommand::List => {
                commands::subject::run_list(&app, &cli.format)?;
            }
            SubjectCommand::Remove { name } => {
                commands::subject::run_remove(&app, &name, &cli.format)?;
            }
        },
        Command::Status => {
            commands::status::run(&app, &cli.format, use_color)?;
        }
        Command::Flashcards { notes } => {
            let material = read_material(notes.as_deref())?;
            commands::study::run_flashcards(&app, &material, &cli.format, use_color)?;
        }
        Command::Quiz { text } => {
            let material = read_material(text.as_deref())?;
            commands::study::run_quiz(&app, &material, &cli.format, use_color)?;
        }
        Command::Ask { question } => {
            commands::study::run_ask(&app, &question.join(" "), &cli.format)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
