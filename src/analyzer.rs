//! Match analysis engine combining the local score with the service response

use crate::config::Config;
use crate::error::Result;
use crate::output::report::MatchReport;
use crate::processing::{MatchScoreResult, MatchScorer};
use crate::response::{
    extract_reported_score, format_evaluation, parse_question_blocks, AnalysisParser,
    EvaluationFeedback, EvaluationResponse, MatchResponse, MoreQuestionsResponse, Question,
    QuestionNormalizer, QuestionSet,
};
use log::{debug, info, warn};
use serde_json::Value;

/// Coordinates scoring, response parsing and question normalization
pub struct MatchAnalyzer {
    scorer: MatchScorer,
    parser: AnalysisParser,
    normalizer: QuestionNormalizer,
}

impl MatchAnalyzer {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            scorer: MatchScorer::new(&config.scoring)?,
            parser: AnalysisParser::new(&config.parsing)?,
            normalizer: QuestionNormalizer::new(&config.questions)?,
        })
    }

    pub fn score(&self, resume: &str, job: &str) -> MatchScoreResult {
        self.scorer.score(resume, job)
    }

    /// Build the merged report. Without a service response the analysis
    /// sections fall back to the configured defaults.
    pub fn analyze(
        &self,
        resume: &str,
        job: &str,
        response: Option<&MatchResponse>,
    ) -> MatchReport {
        let score = self.scorer.score(resume, job);
        info!("Local match score: {}%", score.score);

        let Some(response) = response else {
            debug!("No service response, using default analysis");
            return MatchReport::new(
                score,
                self.parser.parse_optional(None),
                QuestionSet::default(),
                None,
                true,
            );
        };

        let text = response.match_text();
        if text.is_none() && !response.match_score.is_null() {
            warn!("Service match text is not a string, using default analysis");
        }

        let analysis = self.parser.parse_optional(text);
        let reported_score = text.and_then(extract_reported_score);
        let questions = QuestionSet::new(self.questions(&response.interview_questions));
        debug!("Normalized {} interview questions", questions.len());

        MatchReport::new(score, analysis, questions, reported_score, false)
    }

    /// Append a load-more batch; returns how many questions were added
    pub fn more_questions(
        &self,
        questions: &mut QuestionSet,
        response: &MoreQuestionsResponse,
    ) -> usize {
        let added = self.questions(&response.additional_questions);
        let count = added.len();
        questions.extend(added);
        count
    }

    /// Blank-line-free evaluation text, or `None` when the service sent no string
    pub fn evaluate(&self, response: &EvaluationResponse) -> Option<String> {
        response.evaluation_text().map(format_evaluation)
    }

    pub fn evaluation_feedback(&self, response: &EvaluationResponse) -> Option<EvaluationFeedback> {
        self.evaluate(response).map(|text| EvaluationFeedback::from_text(&text))
    }

    /// Question lists arrive as JSON arrays; a plain-text block layout is
    /// accepted as well.
    pub fn questions(&self, raw: &Value) -> Vec<Question> {
        match raw.as_str() {
            Some(text) => self.normalizer.normalize_raw(&parse_question_blocks(text)),
            None => self.normalizer.normalize(raw),
        }
    }

    pub fn parser(&self) -> &AnalysisParser {
        &self.parser
    }

    pub fn normalizer(&self) -> &QuestionNormalizer {
        &self.normalizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Difficulty;
    use serde_json::json;

    fn analyzer() -> MatchAnalyzer {
        MatchAnalyzer::new(&Config::default()).unwrap()
    }

    const RESUME: &str = "I have 5 years experience with python and react";
    const JOB: &str = "Looking for python, react, and aws experience, bachelor degree required";

    #[test]
    fn test_local_only_report() {
        let report = analyzer().analyze(RESUME, JOB, None);

        assert_eq!(report.score, "61");
        assert!(report.metadata.local_only);
        assert_eq!(report.qualified_skills.len(), 5);
        assert_eq!(report.missing_skills.len(), 5);
        assert!(report.interview_questions.is_empty());
        assert_eq!(report.reported_score, None);
    }

    #[test]
    fn test_report_with_service_response() {
        let response = MatchResponse {
            match_score: json!(
                "Match Score: 78%\n\
                 Missing Skills:\n• Kubernetes\n• GraphQL\n\
                 Qualified Skills:\n• Python\n• React\n\
                 Compatibility Analysis:\nThe candidate covers the core stack and has \
                 shipped production React applications for several years."
            ),
            interview_questions: json!([
                {"question": "1. What is X? Rationale: because Y", "difficulty": "easy"},
                {"question": "Here are some questions", "difficulty": "hard"}
            ]),
        };

        let report = analyzer().analyze(RESUME, JOB, Some(&response));

        assert!(!report.metadata.local_only);
        assert_eq!(report.reported_score, Some(78));
        assert_eq!(report.missing_skills, vec!["Kubernetes", "GraphQL"]);
        assert_eq!(report.qualified_skills, vec!["Python", "React"]);
        assert!(report.analysis.starts_with("The candidate covers the core stack"));
        assert_eq!(report.interview_questions.len(), 1);
        assert_eq!(report.interview_questions.as_slice()[0].question, "What is X?");
        assert_eq!(report.interview_questions.as_slice()[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_non_string_match_text_falls_back() {
        let response = MatchResponse {
            match_score: json!(80),
            interview_questions: json!({"question": "not a list"}),
        };
        let report = analyzer().analyze(RESUME, JOB, Some(&response));

        assert_eq!(report.qualified_skills.len(), 5);
        assert_eq!(report.reported_score, None);
        assert!(report.interview_questions.is_empty());
    }

    #[test]
    fn test_more_questions_appended() {
        let analyzer = analyzer();
        let mut questions = QuestionSet::new(analyzer.questions(&json!([{"question": "First?"}])));

        let added = analyzer.more_questions(
            &mut questions,
            &MoreQuestionsResponse {
                additional_questions: json!([
                    {"question": "Second?", "difficulty": "hard"},
                    {"question": 42}
                ]),
            },
        );

        assert_eq!(added, 1);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions.get(Difficulty::Hard, 0).unwrap().question, "Second?");
    }

    #[test]
    fn test_plain_text_question_blocks() {
        let raw = json!("Easy:\nWhat is Rust?\n\nHard:\nExplain lifetimes.");
        let questions = analyzer().questions(&raw);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].difficulty, Difficulty::Easy);
        assert_eq!(questions[1].question, "Explain lifetimes.");
    }

    #[test]
    fn test_evaluate() {
        let analyzer = analyzer();
        let response = EvaluationResponse {
            evaluation: json!("Overall Score: 8/10\n\nStrengths:\n• Good communication\n"),
        };

        assert_eq!(
            analyzer.evaluate(&response).as_deref(),
            Some("Overall Score: 8/10\nStrengths:\n• Good communication")
        );
        let feedback = analyzer.evaluation_feedback(&response).unwrap();
        assert_eq!(feedback.strengths, vec!["Good communication"]);

        assert_eq!(analyzer.evaluate(&EvaluationResponse::default()), None);
    }
}
