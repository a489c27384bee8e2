//! Client contract for the practice-exercise grading collaborator.
//!
//! Practice submissions are graded entirely server-side with a
//! points-weighted scheme; this module only carries the request/response
//! shapes and treats the returned record as authoritative.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use assess_core::model::PracticeId;

use crate::attempts::GraderConfig;
use crate::error::GraderError;

/// Pre-graded practice submission as returned by the collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSubmissionRecord {
    pub practice_id: PracticeId,
    pub score: f64,
    pub total_points: f64,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
}

/// External practice grading collaborator.
#[async_trait]
pub trait PracticeGrader: Send + Sync {
    /// Submit practice code for server-side grading.
    ///
    /// # Errors
    ///
    /// Returns `GraderError` on transport failure or a non-success status.
    async fn submit_practice(
        &self,
        practice_id: PracticeId,
        code: &str,
        language: &str,
    ) -> Result<PracticeSubmissionRecord, GraderError>;
}

/// HTTP implementation of the practice grading collaborator.
#[derive(Clone)]
pub struct HttpPracticeGrader {
    client: Client,
    config: GraderConfig,
}

#[derive(Debug, Serialize)]
struct PracticeRequest<'a> {
    code: &'a str,
    language: &'a str,
}

impl HttpPracticeGrader {
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
impl PracticeGrader for HttpPracticeGrader {
    async fn submit_practice(
        &self,
        practice_id: PracticeId,
        code: &str,
        language: &str,
    ) -> Result<PracticeSubmissionRecord, GraderError> {
        let url = format!(
            "{}/practices/{practice_id}/submissions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = PracticeRequest { code, language };

        let response = self.client.post(url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(GraderError::HttpStatus(response.status()));
        }

        let record: PracticeSubmissionRecord = response.json().await?;
        Ok(record)
    }
}
