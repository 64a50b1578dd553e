//! Request and response shapes for the study tool endpoints
//!
//! The endpoints are opaque inference services; these shapes mirror what
//! they return and nothing more. Responses are not validated beyond
//! deserialization.

use serde::{Deserialize, Serialize};

/// A generated question/answer pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// A generated quiz question
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    /// Offered choices; generators omit them for open-ended questions
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: String,
}

/// Body for POST /api/flashcards
#[derive(Debug, Serialize)]
pub struct FlashcardsRequest<'a> {
    pub notes: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct FlashcardsResponse {
    pub flashcards: Vec<Flashcard>,
}

/// Body for POST /api/quiz
#[derive(Debug, Serialize)]
pub struct QuizRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct QuizResponse {
    pub quiz: Vec<QuizQuestion>,
}

/// Body for POST /api/study-buddy
#[derive(Debug, Serialize)]
pub struct StudyBuddyRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct StudyBuddyResponse {
    pub answer: String,
}
