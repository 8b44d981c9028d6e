//! Weighted aggregation of the sub-scores into a single match percentage

use crate::config::{ScoreWeights, ScoringConfig};
use crate::error::{Result, ResumeMatcherError};
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::sub_scores::{self, KeywordTokenizer};
use log::{debug, error};
use serde::{Deserialize, Serialize};

/// Raw sub-score ratios, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub keywords: f64,
}

/// Weighted contributions as whole percentage points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: u32,
    pub experience: u32,
    pub education: u32,
    pub keywords: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScoreResult {
    /// Percentage 0-100, string-encoded for the display layer
    pub score: String,
    pub breakdown: ScoreBreakdown,
}

impl MatchScoreResult {
    pub fn zero() -> Self {
        Self {
            score: "0".to_string(),
            breakdown: ScoreBreakdown::default(),
        }
    }

    pub fn score_value(&self) -> u32 {
        self.score.parse().unwrap_or(0)
    }
}

/// Computes the local heuristic compatibility score for a resume/job pair
pub struct MatchScorer {
    extractor: SkillExtractor,
    tokenizer: KeywordTokenizer,
    experience_keywords: Vec<String>,
    education_keywords: Vec<String>,
    weights: ScoreWeights,
}

impl MatchScorer {
    pub fn new(config: &ScoringConfig) -> Result<Self> {
        let lower = |words: &[String]| words.iter().map(|w| w.to_lowercase()).collect();

        Ok(Self {
            extractor: SkillExtractor::new(&config.skill_vocabulary)?,
            tokenizer: KeywordTokenizer::new(config.min_keyword_len),
            experience_keywords: lower(&config.experience_keywords),
            education_keywords: lower(&config.education_keywords),
            weights: config.weights,
        })
    }

    /// Score a resume against a job description; degrades to zero instead of failing
    pub fn score(&self, resume: &str, job: &str) -> MatchScoreResult {
        match self.try_score(resume, job) {
            Ok(result) => result,
            Err(e) => {
                error!("Error calculating match score: {}", e);
                MatchScoreResult::zero()
            }
        }
    }

    pub fn sub_scores(&self, resume: &str, job: &str) -> SubScores {
        let resume = resume.to_lowercase();
        let job = job.to_lowercase();

        SubScores {
            skills: sub_scores::skills_ratio(&self.extractor, &resume, &job),
            experience: sub_scores::experience_ratio(&self.experience_keywords, &resume, &job),
            education: sub_scores::education_ratio(&self.education_keywords, &resume, &job),
            keywords: self.tokenizer.overlap_ratio(&resume, &job),
        }
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    fn try_score(&self, resume: &str, job: &str) -> Result<MatchScoreResult> {
        let sub = self.sub_scores(resume, job);
        debug!("Sub-scores: {:?}", sub);

        let skills = sub.skills * self.weights.skills * 100.0;
        let experience = sub.experience * self.weights.experience * 100.0;
        let education = sub.education * self.weights.education * 100.0;
        let keywords = sub.keywords * self.weights.keywords * 100.0;

        // Total is rounded once over the unrounded terms; the breakdown is
        // rounded per field, so the parts may not add up to the total exactly.
        let total = skills + experience + education + keywords;

        Ok(MatchScoreResult {
            score: to_percentage(total)?.to_string(),
            breakdown: ScoreBreakdown {
                skills: to_percentage(skills)?,
                experience: to_percentage(experience)?,
                education: to_percentage(education)?,
                keywords: to_percentage(keywords)?,
            },
        })
    }
}

fn to_percentage(value: f64) -> Result<u32> {
    if !value.is_finite() || value < 0.0 {
        return Err(ResumeMatcherError::Processing(format!(
            "Score component out of range: {}",
            value
        )));
    }
    Ok(value.round().min(100.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> MatchScorer {
        MatchScorer::new(&ScoringConfig::default()).unwrap()
    }

    #[test]
    fn test_scenario_breakdown() {
        let result = scorer().score(
            "I have 5 years experience with python and react",
            "Looking for python, react, and aws experience, bachelor degree required",
        );

        // skills 2/3 * 40, experience 1 * 30, education 0, keywords 3/7 * 10
        assert_eq!(result.breakdown.skills, 27);
        assert_eq!(result.breakdown.experience, 30);
        assert_eq!(result.breakdown.education, 0);
        assert_eq!(result.breakdown.keywords, 4);
        assert_eq!(result.score, "61");
    }

    #[test]
    fn test_identical_documents_score_high() {
        let text = "Senior engineer, 8 years experience: Python, AWS, Docker. Master degree.";
        let result = scorer().score(text, text);
        assert_eq!(result.score, "100");
        assert_eq!(
            result.breakdown,
            ScoreBreakdown { skills: 40, experience: 30, education: 20, keywords: 10 }
        );
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let result = scorer().score("", "");
        assert_eq!(result, MatchScoreResult::zero());
    }

    #[test]
    fn test_score_is_bounded_percentage() {
        let scorer = scorer();
        let pairs = [
            ("python", "python java aws"),
            ("phd bachelor master degree diploma certification", "degree"),
            ("lorem ipsum", "dolor sit amet consectetur"),
        ];
        for (resume, job) in pairs {
            let result = scorer.score(resume, job);
            let value: u32 = result.score.parse().unwrap();
            assert!(value <= 100);
            assert_eq!(result.score_value(), value);
        }
    }

    #[test]
    fn test_non_finite_weights_degrade_to_zero() {
        let mut config = ScoringConfig::default();
        config.weights.skills = f64::NAN;
        let scorer = MatchScorer::new(&config).unwrap();

        let result = scorer.score("python", "python");
        assert_eq!(result, MatchScoreResult::zero());
    }

    #[test]
    fn test_sub_scores_lowercase_inputs() {
        let sub = scorer().sub_scores("PYTHON", "python");
        assert_eq!(sub.skills, 1.0);
        assert_eq!(sub.keywords, 1.0);
    }
}
