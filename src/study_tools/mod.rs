//! AI study tools: flashcard generation, quizzes, and the study buddy

pub mod client;
pub mod models;

pub use client::{StudyToolsClient, StudyToolsError};
pub use models::*;
