//! Configuration management for the resume matcher
//!
//! Every vocabulary, label list and fallback text used by the engines lives
//! here and is handed to them at construction time, so tests can swap any of
//! it out without touching the algorithms.

use crate::error::{Result, ResumeMatcherError};
use crate::response::questions::Difficulty;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub parsing: ParsingConfig,
    pub questions: QuestionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub skill_vocabulary: Vec<String>,
    pub experience_keywords: Vec<String>,
    pub education_keywords: Vec<String>,
    /// Job description tokens must be longer than this to count as keywords
    pub min_keyword_len: usize,
    pub weights: ScoreWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub keywords: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Item separators, including the mis-decoded form of `•`
    pub bullet_markers: Vec<String>,
    /// Analysis text must be longer than this or the default paragraph is used
    pub min_analysis_chars: usize,
    pub missing_skills: SectionRule,
    pub qualified_skills: SectionRule,
    pub analysis: SectionRule,
    pub defaults: DefaultResponses,
}

/// How one labelled section of the service response is located and cleaned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRule {
    /// Accepted labels, highest priority first
    pub labels: Vec<String>,
    /// Fragments containing any of these (case-insensitive) are dropped
    pub reject_terms: Vec<String>,
    pub min_fragment_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultResponses {
    pub qualified_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionConfig {
    /// Questions containing any of these are treated as preamble noise
    pub noise_phrases: Vec<String>,
    /// Questions starting with any of these are treated as preamble noise
    pub noise_prefixes: Vec<String>,
    /// Everything from this marker on is cut from a question
    pub rationale_marker: String,
    pub default_difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Markdown,
    Html,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skill_vocabulary: strings(&[
                "javascript", "python", "java", "c++", "c#", "ruby", "php",
                "react", "angular", "vue", "node.js", "express", "django",
                "flask", "spring", "sql", "mongodb", "aws", "azure", "gcp",
                "docker", "kubernetes", "git", "agile", "scrum", "ci/cd",
                "machine learning", "ai", "data science", "analytics",
                "project management", "leadership", "communication",
            ]),
            experience_keywords: strings(&[
                "experience", "years", "worked", "job", "position", "role",
            ]),
            education_keywords: strings(&[
                "bachelor", "master", "phd", "degree", "diploma", "certification",
            ]),
            min_keyword_len: 4,
            weights: ScoreWeights::default(),
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skills: 0.4,
            experience: 0.3,
            education: 0.2,
            keywords: 0.1,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.education + self.keywords
    }

    pub fn validate(&self) -> Result<()> {
        let all = [self.skills, self.experience, self.education, self.keywords];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ResumeMatcherError::Configuration(
                "Score weights must be finite and non-negative".to_string(),
            ));
        }
        if (self.sum() - 1.0).abs() > 1e-6 {
            return Err(ResumeMatcherError::Configuration(format!(
                "Score weights must sum to 1.0, got {}",
                self.sum()
            )));
        }
        Ok(())
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            bullet_markers: strings(&["â€¢", "•", "-", "*"]),
            min_analysis_chars: 50,
            missing_skills: SectionRule {
                labels: strings(&["Missing Skills:", "Skills to Develop:"]),
                reject_terms: strings(&["skills", "analysis"]),
                min_fragment_chars: 3,
            },
            qualified_skills: SectionRule {
                labels: strings(&["Qualified Skills:", "Matching Skills:"]),
                reject_terms: strings(&["skills", "analysis"]),
                min_fragment_chars: 3,
            },
            analysis: SectionRule {
                labels: strings(&["Compatibility Analysis:", "Analysis:"]),
                reject_terms: strings(&["analysis"]),
                min_fragment_chars: 1,
            },
            defaults: DefaultResponses::default(),
        }
    }
}

impl Default for DefaultResponses {
    fn default() -> Self {
        Self {
            qualified_skills: strings(&[
                "Communication Skills",
                "Team Collaboration",
                "Problem Solving",
                "Time Management",
                "Adaptability",
            ]),
            missing_skills: strings(&[
                "Advanced Technical Skills",
                "Industry-specific Knowledge",
                "Leadership Experience",
                "Project Management",
                "Specialized Certifications",
            ]),
            analysis: "Based on the resume and job description analysis, there are several areas \
                where your profile aligns well with the position, and some areas where additional \
                development could enhance your candidacy. Focus on developing the missing skills \
                while highlighting your existing strengths in your application."
                .to_string(),
        }
    }
}

impl Default for QuestionConfig {
    fn default() -> Self {
        Self {
            noise_phrases: strings(&["here are"]),
            noise_prefixes: strings(&["rationale:"]),
            rationale_marker: "Rationale:".to_string(),
            default_difficulty: Difficulty::Medium,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load the user configuration, writing the defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| {
                ResumeMatcherError::Configuration(format!("Failed to parse config: {}", e))
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| {
                ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overwrite `path` with the defaults; the existing file is never parsed
    pub fn reset_at(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.weights.validate()?;

        let sections = [
            ("missing_skills", &self.parsing.missing_skills),
            ("qualified_skills", &self.parsing.qualified_skills),
            ("analysis", &self.parsing.analysis),
        ];
        for (name, rule) in sections {
            if rule.labels.iter().all(|l| l.trim().is_empty()) {
                return Err(ResumeMatcherError::Configuration(format!(
                    "Section '{}' needs at least one label",
                    name
                )));
            }
        }

        if self.parsing.bullet_markers.iter().all(|m| m.is_empty()) {
            return Err(ResumeMatcherError::Configuration(
                "At least one bullet marker is required".to_string(),
            ));
        }

        Ok(())
    }
}
