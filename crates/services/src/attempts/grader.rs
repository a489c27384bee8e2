use std::env;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;

use assess_core::model::{QuizAnswer, QuizId, QuizSubmissionRecord};

use crate::error::GraderError;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// External quiz grading collaborator.
///
/// The collaborator is the sole authority on scoring, pass threshold and
/// attempt-count bookkeeping; the controller sends one submission and
/// treats the returned record as final.
#[async_trait]
pub trait QuizGrader: Send + Sync {
    /// Submit one attempt for grading.
    ///
    /// # Errors
    ///
    /// Returns `GraderError` on transport failure or a non-success status.
    async fn submit_quiz(
        &self,
        quiz_id: QuizId,
        answers: &[QuizAnswer],
        started_at: DateTime<Utc>,
    ) -> Result<QuizSubmissionRecord, GraderError>;
}

#[derive(Clone, Debug)]
pub struct GraderConfig {
    pub base_url: String,
}

impl GraderConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("ASSESS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self { base_url }
    }
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

/// HTTP implementation of the quiz grading collaborator.
#[derive(Clone)]
pub struct HttpQuizGrader {
    client: Client,
    config: GraderConfig,
}

#[derive(Debug, Serialize)]
struct SubmissionRequest<'a> {
    answers: &'a [QuizAnswer],
    started_at: DateTime<Utc>,
}

impl HttpQuizGrader {
    #[must_use]
    pub fn new(config: GraderConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GraderConfig::from_env())
    }
}

#[async_trait]
impl QuizGrader for HttpQuizGrader {
    async fn submit_quiz(
        &self,
        quiz_id: QuizId,
        answers: &[QuizAnswer],
        started_at: DateTime<Utc>,
    ) -> Result<QuizSubmissionRecord, GraderError> {
        let url = format!(
            "{}/quizzes/{quiz_id}/submissions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = SubmissionRequest {
            answers,
            started_at,
        };

        let response = self.client.post(url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(GraderError::HttpStatus(response.status()));
        }

        let record: QuizSubmissionRecord = response.json().await?;
        Ok(record)
    }
}
