//! Request payloads for the remote service

use serde::{Deserialize, Serialize};

/// Requested number of questions per difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCount {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self {
            easy: 2,
            medium: 2,
            hard: 1,
        }
    }
}

impl QuestionCount {
    pub fn total(&self) -> u32 {
        self.easy + self.medium + self.hard
    }
}

/// Body of `/api/match` and `/api/more-questions`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub resume_text: String,
    pub job_description_text: String,
    #[serde(default)]
    pub question_count: QuestionCount,
}

impl MatchRequest {
    pub fn new(resume_text: impl Into<String>, job_description_text: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            job_description_text: job_description_text.into(),
            question_count: QuestionCount::default(),
        }
    }
}

/// Body of `/api/evaluate`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    pub question: String,
    pub answer: String,
    pub resume_text: String,
    pub job_description_text: String,
}
