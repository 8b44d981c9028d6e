//! Response contracts of the remote text-generation service
//!
//! Fields the service fills loosely are kept as raw JSON values and
//! type-checked on access, so a wrong shape degrades to "absent".

use crate::error::Result;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `/api/match` response: free-form analysis text plus a question list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(default)]
    pub match_score: Value,
    #[serde(default)]
    pub interview_questions: Value,
}

impl MatchResponse {
    pub fn match_text(&self) -> Option<&str> {
        self.match_score.as_str()
    }
}

/// `/api/more-questions` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoreQuestionsResponse {
    #[serde(default)]
    pub additional_questions: Value,
}

/// `/api/evaluate` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationResponse {
    #[serde(default)]
    pub evaluation: Value,
}

impl EvaluationResponse {
    pub fn evaluation_text(&self) -> Option<&str> {
        self.evaluation.as_str()
    }
}

pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

/// The first "NN%" figure in the service's own analysis, if it reports one
pub fn extract_reported_score(text: &str) -> Option<u8> {
    let re = Regex::new(r"(\d{1,3})\s*%").expect("Invalid score regex");
    let value: u16 = re.captures(text)?.get(1)?.as_str().parse().ok()?;
    u8::try_from(value).ok().filter(|v| *v <= 100)
}
