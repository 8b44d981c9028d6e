//! Normalization of the remote service's loosely-structured responses

pub mod contracts;
pub mod analysis_parser;
pub mod questions;
pub mod evaluation;

pub use analysis_parser::{AnalysisParser, ParsedAnalysis};
pub use contracts::{
    extract_reported_score, EvaluationResponse, MatchResponse, MoreQuestionsResponse,
};
pub use evaluation::{
    classify_evaluation, classify_line, format_evaluation, EvaluationFeedback, FeedbackLine,
};
pub use questions::{
    parse_question_blocks, Difficulty, Question, QuestionNormalizer, QuestionSet, RawQuestion,
};
