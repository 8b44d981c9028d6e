//! Answer-evaluation feedback: blank-line cleanup and line classification

use serde::{Deserialize, Serialize};

const SCORE_PREFIX: &str = "Overall Score:";
const STRENGTHS_HEADER: &str = "Strengths:";
const IMPROVEMENTS_HEADER: &str = "Areas for Improvement:";
const TIP_PREFIX: &str = "Quick Tip:";
const BULLETS: [&str; 2] = ["•", "â€¢"];

/// Drop blank lines and re-join the rest, order preserved
pub fn format_evaluation(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One recognized line of evaluation feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum FeedbackLine {
    Score(String),
    StrengthsHeader,
    ImprovementsHeader,
    Point(String),
    Tip(String),
}

/// Classify a single line; unrecognized lines yield `None` and are not rendered
pub fn classify_line(line: &str) -> Option<FeedbackLine> {
    let line = line.trim();

    if line.starts_with(SCORE_PREFIX) {
        // The value sits between the first and second colon
        let value = line.split(':').nth(1).unwrap_or_default().trim();
        return Some(FeedbackLine::Score(value.to_string()));
    }
    if line == STRENGTHS_HEADER {
        return Some(FeedbackLine::StrengthsHeader);
    }
    if line == IMPROVEMENTS_HEADER {
        return Some(FeedbackLine::ImprovementsHeader);
    }
    if let Some(point) = BULLETS.iter().find_map(|b| line.strip_prefix(b)) {
        return Some(FeedbackLine::Point(point.trim().to_string()));
    }
    if let Some(tip) = line.strip_prefix(TIP_PREFIX) {
        return Some(FeedbackLine::Tip(tip.trim().to_string()));
    }

    None
}

pub fn classify_evaluation(text: &str) -> Vec<FeedbackLine> {
    text.lines().filter_map(classify_line).collect()
}

/// Feedback grouped into display sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationFeedback {
    pub score: Option<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    /// Bullet points that appear before any section header
    pub notes: Vec<String>,
    pub tip: Option<String>,
}

impl EvaluationFeedback {
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(classify_evaluation(text))
    }

    pub fn from_lines(lines: impl IntoIterator<Item = FeedbackLine>) -> Self {
        enum Section {
            None,
            Strengths,
            Improvements,
        }

        let mut feedback = Self::default();
        let mut section = Section::None;

        for line in lines {
            match line {
                FeedbackLine::Score(score) => feedback.score = Some(score),
                FeedbackLine::StrengthsHeader => section = Section::Strengths,
                FeedbackLine::ImprovementsHeader => section = Section::Improvements,
                FeedbackLine::Point(point) => match section {
                    Section::Strengths => feedback.strengths.push(point),
                    Section::Improvements => feedback.improvements.push(point),
                    Section::None => feedback.notes.push(point),
                },
                FeedbackLine::Tip(tip) => feedback.tip = Some(tip),
            }
        }

        feedback
    }

    pub fn is_empty(&self) -> bool {
        self.score.is_none()
            && self.strengths.is_empty()
            && self.improvements.is_empty()
            && self.notes.is_empty()
            && self.tip.is_none()
    }
}
