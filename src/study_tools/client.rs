//! HTTP client for the study tool endpoints

use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::models::{
    Flashcard, FlashcardsRequest, FlashcardsResponse, QuizQuestion, QuizRequest, QuizResponse,
    StudyBuddyRequest, StudyBuddyResponse,
};

#[derive(Error, Debug)]
pub enum StudyToolsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Server error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Client for the flashcard, quiz, and study buddy endpoints.
///
/// The endpoints are treated as opaque: requests carry the raw study
/// material, responses are decoded as-is, and failures are reported
/// without retrying.
pub struct StudyToolsClient {
    client: Client,
    base_url: String,
}

impl StudyToolsClient {
    /// Create a client against `base_url`
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, StudyToolsError> {
        // Normalize URL - ensure no trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(StudyToolsError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Generate flashcards from free-form notes
    pub fn generate_flashcards(&self, notes: &str) -> Result<Vec<Flashcard>, StudyToolsError> {
        let response: FlashcardsResponse =
            self.post_json("/api/flashcards", &FlashcardsRequest { notes })?;
        Ok(response.flashcards)
    }

    /// Generate a quiz from study text
    pub fn generate_quiz(&self, text: &str) -> Result<Vec<QuizQuestion>, StudyToolsError> {
        let response: QuizResponse = self.post_json("/api/quiz", &QuizRequest { text })?;
        Ok(response.quiz)
    }

    /// Ask the study buddy a free-form question
    pub fn ask(&self, question: &str) -> Result<String, StudyToolsError> {
        let response: StudyBuddyResponse =
            self.post_json("/api/study-buddy", &StudyBuddyRequest { question })?;
        Ok(response.answer)
    }

    fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, StudyToolsError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(StudyToolsError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        Ok(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_non_http_urls() {
        let result = StudyToolsClient::new("localhost:3000".to_string(), Duration::from_secs(5));
        assert!(matches!(result, Err(StudyToolsError::InvalidUrl(_))));
    }

    #[test]
    fn test_new_accepts_http_and_trims_trailing_slash() {
        let client =
            StudyToolsClient::new("http://localhost:3000/".to_string(), Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
