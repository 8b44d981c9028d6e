//! Local heuristic scoring: skill extraction, sub-scores and aggregation

pub mod skill_extractor;
pub mod sub_scores;
pub mod match_scorer;

pub use match_scorer::{MatchScoreResult, MatchScorer, ScoreBreakdown, SubScores};
pub use skill_extractor::SkillExtractor;
