//! Merged result handed to the display layer

use crate::processing::{MatchScoreResult, ScoreBreakdown};
use crate::response::{ParsedAnalysis, QuestionSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Local score, parsed service analysis and normalized questions in one object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    /// Local heuristic percentage, string-encoded
    pub score: String,
    pub breakdown: ScoreBreakdown,
    pub missing_skills: Vec<String>,
    pub qualified_skills: Vec<String>,
    pub analysis: String,
    /// Percentage quoted by the remote service in its own text, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_score: Option<u8>,
    pub interview_questions: QuestionSet,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    /// True when no service response was merged in
    pub local_only: bool,
}

impl ReportMetadata {
    pub fn new(local_only: bool) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            local_only,
        }
    }
}

impl MatchReport {
    pub fn new(
        score: MatchScoreResult,
        analysis: ParsedAnalysis,
        interview_questions: QuestionSet,
        reported_score: Option<u8>,
        local_only: bool,
    ) -> Self {
        Self {
            score: score.score,
            breakdown: score.breakdown,
            missing_skills: analysis.missing_skills,
            qualified_skills: analysis.qualified_skills,
            analysis: analysis.analysis,
            reported_score,
            interview_questions,
            metadata: ReportMetadata::new(local_only),
        }
    }

    pub fn score_value(&self) -> u32 {
        self.score.parse().unwrap_or(0)
    }

    /// Verdict bucket used by the formatters
    pub fn verdict(&self) -> &'static str {
        match self.score_value() {
            80..=100 => "Strong match",
            60..=79 => "Good match",
            40..=59 => "Partial match",
            _ => "Weak match",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultResponses;
    use crate::response::{Difficulty, Question};

    fn report(score: &str) -> MatchReport {
        MatchReport::new(
            MatchScoreResult {
                score: score.to_string(),
                breakdown: ScoreBreakdown { skills: 27, experience: 30, education: 0, keywords: 4 },
            },
            ParsedAnalysis::from_defaults(&DefaultResponses::default()),
            QuestionSet::new(vec![Question {
                question: "What is X?".to_string(),
                difficulty: Difficulty::Easy,
            }]),
            Some(72),
            false,
        )
    }

    #[test]
    fn test_camel_case_serialization() {
        let json = serde_json::to_value(report("61")).unwrap();

        assert_eq!(json["score"], "61");
        assert_eq!(json["breakdown"]["experience"], 30);
        assert_eq!(json["missingSkills"].as_array().unwrap().len(), 5);
        assert_eq!(json["qualifiedSkills"].as_array().unwrap().len(), 5);
        assert_eq!(json["reportedScore"], 72);
        assert_eq!(json["interviewQuestions"][0]["difficulty"], "easy");
        assert_eq!(json["metadata"]["localOnly"], false);
    }

    #[test]
    fn test_verdict_buckets() {
        assert_eq!(report("85").verdict(), "Strong match");
        assert_eq!(report("61").verdict(), "Good match");
        assert_eq!(report("40").verdict(), "Partial match");
        assert_eq!(report("0").verdict(), "Weak match");
    }
}
