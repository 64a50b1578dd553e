use anyhow::{bail, Result};

use crate::app::App;
use crate::render::terminal::{option_marker, wrap_lines, Color};
use crate::OutputFormat;

pub fn run_flashcards(
    app: &App,
    notes: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let client = app.study_tools()?;
    let cards = match client.generate_flashcards(notes) {
        Ok(cards) => cards,
        Err(e) => {
            log::error!("Flashcard generation failed: {}", e);
            bail!(
                "Could not generate flashcards. Is the study tools server reachable at {}?",
                app.config.study_tools.base_url
            );
        }
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No flashcards came back. Try longer notes.");
                return Ok(());
            }

            for (i, card) in cards.iter().enumerate() {
                if use_color {
                    println!("{}{}. {}{}", Color::BOLD, i + 1, card.question, Color::RESET);
                } else {
                    println!("{}. {}", i + 1, card.question);
                }
                for line in wrap_lines(&card.answer, "   ", 80) {
                    println!("{}", line);
                }
                println!();
            }
            println!("{} flashcards", cards.len());
        }
    }

    Ok(())
}

pub fn run_quiz(app: &App, text: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let client = app.study_tools()?;
    let quiz = match client.generate_quiz(text) {
        Ok(quiz) => quiz,
        Err(e) => {
            log::error!("Quiz generation failed: {}", e);
            bail!(
                "Could not generate a quiz. Is the study tools server reachable at {}?",
                app.config.study_tools.base_url
            );
        }
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&quiz)?);
        }
        OutputFormat::Plain => {
            if quiz.is_empty() {
                println!("No questions came back. Try longer text.");
                return Ok(());
            }

            for (i, question) in quiz.iter().enumerate() {
                if use_color {
                    println!("{}{}. {}{}", Color::BOLD, i + 1, question.question, Color::RESET);
                } else {
                    println!("{}. {}", i + 1, question.question);
                }
                for (j, option) in question.options.iter().enumerate() {
                    println!("   {} {}", option_marker(j), option);
                }
                if use_color {
                    println!("   {}Answer: {}{}", Color::DIM, question.answer, Color::RESET);
                } else {
                    println!("   Answer: {}", question.answer);
                }
                println!();
            }
            println!("{} questions", quiz.len());
        }
    }

    Ok(())
}

pub fn run_ask(app: &App, question: &str, format: &OutputFormat) -> Result<()> {
    let client = app.study_tools()?;
    let answer = match client.ask(question) {
        Ok(answer) => answer,
        Err(e) => {
            log::error!("Study buddy request failed: {}", e);
            bail!(
                "Could not reach the study buddy. Is the study tools server reachable at {}?",
                app.config.study_tools.base_url
            );
        }
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "answer": answer });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for line in wrap_lines(&answer, "", 80) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
