//! Interview question normalization
//!
//! Question lists come back from the remote service as loosely-typed JSON
//! with preamble lines, numbering and rationale text mixed in. They are
//! filtered and cleaned into [`Question`]s with a closed [`Difficulty`].

use crate::config::QuestionConfig;
use crate::error::Result;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Display label for tabs and headings
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Case-insensitive; `None` for anything outside the three levels
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A question as received from the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl RawQuestion {
    pub fn new(question: impl Into<String>, difficulty: Option<&str>) -> Self {
        Self {
            question: question.into(),
            difficulty: difficulty.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub difficulty: Difficulty,
}

pub struct QuestionNormalizer {
    noise_phrases: Vec<String>,
    noise_prefixes: Vec<String>,
    rationale: Option<Regex>,
    ordinal: Regex,
    default_difficulty: Difficulty,
}

impl QuestionNormalizer {
    pub fn new(config: &QuestionConfig) -> Result<Self> {
        let lower = |items: &[String]| -> Vec<String> {
            items
                .iter()
                .map(|s| s.to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        };

        let rationale = match config.rationale_marker.trim() {
            "" => None,
            marker => Some(Regex::new(&format!("(?i){}", regex::escape(marker)))?),
        };

        Ok(Self {
            noise_phrases: lower(&config.noise_phrases),
            noise_prefixes: lower(&config.noise_prefixes),
            rationale,
            ordinal: Regex::new(r"^\d+\.\s*")?,
            default_difficulty: config.default_difficulty,
        })
    }

    /// Normalize an untyped question list; anything but an array yields nothing
    pub fn normalize(&self, raw: &Value) -> Vec<Question> {
        let Some(items) = raw.as_array() else {
            if !raw.is_null() {
                warn!("Expected a question array, got {}", json_kind(raw));
            }
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| {
                let object = item.as_object()?;
                let Some(text) = object.get("question").and_then(Value::as_str) else {
                    debug!("Skipping malformed question entry: {}", item);
                    return None;
                };
                let difficulty = object.get("difficulty").and_then(Value::as_str);
                self.normalize_one(text, difficulty)
            })
            .collect()
    }

    pub fn normalize_raw(&self, raw: &[RawQuestion]) -> Vec<Question> {
        raw.iter()
            .filter_map(|q| self.normalize_one(&q.question, q.difficulty.as_deref()))
            .collect()
    }

    pub fn normalize_one(&self, text: &str, difficulty: Option<&str>) -> Option<Question> {
        if self.is_noise(text) {
            debug!("Dropping preamble line: {}", text);
            return None;
        }

        let question = self.clean(text);
        if question.is_empty() {
            return None;
        }

        Some(Question {
            question,
            difficulty: self.resolve_difficulty(difficulty),
        })
    }

    /// Preamble ("Here are...") and stray rationale lines are not questions
    pub fn is_noise(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        self.noise_phrases.iter().any(|p| lower.contains(p.as_str()))
            || self.noise_prefixes.iter().any(|p| lower.starts_with(p.as_str()))
    }

    /// Cut the rationale, trim, then strip a leading "N. " ordinal
    pub fn clean(&self, text: &str) -> String {
        let text = match &self.rationale {
            Some(marker) => match marker.find(text) {
                Some(m) => &text[..m.start()],
                None => text,
            },
            None => text,
        };

        self.ordinal.replace(text.trim(), "").trim().to_string()
    }

    /// Unknown difficulty strings are logged and coerced to the default level
    pub fn resolve_difficulty(&self, value: Option<&str>) -> Difficulty {
        match value.map(str::trim) {
            None | Some("") => self.default_difficulty,
            Some(value) => Difficulty::parse(value).unwrap_or_else(|| {
                warn!(
                    "Unrecognized difficulty '{}', using '{}'",
                    value, self.default_difficulty
                );
                self.default_difficulty
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse the service's plain-text question layout:
///
/// ```text
/// Easy:
/// First easy question
/// Medium:
/// First medium question
/// ```
///
/// Lines before the first header carry no difficulty; other lines ending in
/// `:` are skipped.
pub fn parse_question_blocks(text: &str) -> Vec<RawQuestion> {
    let mut questions = Vec::new();
    let mut current: Option<Difficulty> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.ends_with(':') {
            if let Some(difficulty) = Difficulty::ALL
                .iter()
                .find(|d| line.eq_ignore_ascii_case(&format!("{}:", d.as_str())))
            {
                current = Some(*difficulty);
            }
            continue;
        }

        questions.push(RawQuestion::new(line, current.map(|d| d.as_str())));
    }

    questions
}

/// Ordered question list shown in the practice flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Append a further batch, keeping the existing order
    pub fn extend(&mut self, more: impl IntoIterator<Item = Question>) {
        self.questions.extend(more);
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .collect()
    }

    /// The `index`-th question within one difficulty tab
    pub fn get(&self, difficulty: Difficulty, index: usize) -> Option<&Question> {
        self.questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .nth(index)
    }

    /// Resolve a `"<difficulty>-<index>"` key, e.g. `"medium-1"`
    pub fn get_by_key(&self, key: &str) -> Option<&Question> {
        let (difficulty, index) = key.split_once('-')?;
        self.get(Difficulty::parse(difficulty)?, index.parse().ok()?)
    }

    pub fn counts(&self) -> Vec<(Difficulty, usize)> {
        Difficulty::ALL
            .iter()
            .map(|d| (*d, self.by_difficulty(*d).len()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
