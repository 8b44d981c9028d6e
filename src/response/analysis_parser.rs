//! Structured-text parser for the free-form match analysis returned by the
//! remote text-generation service
//!
//! The service is asked for "Missing Skills", "Qualified Skills" and
//! "Compatibility Analysis" sections, but the labels, bullets and encoding it
//! answers with vary. Each section is located by its first label occurrence
//! and cut at the next label of any section; bullets split it into items.
//! A label mentioned inside an item's own text therefore shortens the
//! section early. That is a known limitation of the heuristic.
//!
//! `-` is one of the bullet markers, so hyphenated words in prose are split
//! as well: "hands-on" in the analysis comes out as "hands" and "on" on
//! separate lines.

use crate::config::{DefaultResponses, ParsingConfig, SectionRule};
use crate::error::{Result, ResumeMatcherError};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAnalysis {
    pub missing_skills: Vec<String>,
    pub qualified_skills: Vec<String>,
    pub analysis: String,
}

impl ParsedAnalysis {
    pub fn from_defaults(defaults: &DefaultResponses) -> Self {
        Self {
            missing_skills: defaults.missing_skills.clone(),
            qualified_skills: defaults.qualified_skills.clone(),
            analysis: defaults.analysis.clone(),
        }
    }
}

/// Compiled form of a [`SectionRule`]
struct SectionMatcher {
    name: &'static str,
    label: Regex,
    boundary: Regex,
    reject_terms: Vec<String>,
    min_fragment_chars: usize,
}

impl SectionMatcher {
    fn new(name: &'static str, rule: &SectionRule, all_labels: &[String]) -> Result<Self> {
        Ok(Self {
            name,
            label: label_pattern(&rule.labels)?,
            boundary: label_pattern(all_labels)?,
            reject_terms: rule.reject_terms.iter().map(|t| t.to_lowercase()).collect(),
            min_fragment_chars: rule.min_fragment_chars,
        })
    }

    /// Text between this section's first label and the next label of any section
    fn locate<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = self.label.find(text)?.end();
        let rest = &text[start..];

        match self.boundary.find(rest) {
            Some(next) => Some(&rest[..next.start()]),
            None => Some(rest),
        }
    }

    fn accepts(&self, fragment: &str) -> bool {
        if fragment.is_empty() || fragment.chars().count() < self.min_fragment_chars {
            return false;
        }
        let lower = fragment.to_lowercase();
        !self.reject_terms.iter().any(|term| lower.contains(term.as_str()))
    }
}

/// Case-insensitive alternation over the labels, in priority order
fn label_pattern(labels: &[String]) -> Result<Regex> {
    let alternatives: Vec<String> = labels
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(regex::escape)
        .collect();

    if alternatives.is_empty() {
        return Err(ResumeMatcherError::Configuration(
            "Section rule has no labels".to_string(),
        ));
    }

    Ok(Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))?)
}

pub struct AnalysisParser {
    missing_skills: SectionMatcher,
    qualified_skills: SectionMatcher,
    analysis: SectionMatcher,
    bullets: Regex,
    min_analysis_chars: usize,
    defaults: DefaultResponses,
}

impl AnalysisParser {
    pub fn new(config: &ParsingConfig) -> Result<Self> {
        let all_labels: Vec<String> = [
            &config.missing_skills,
            &config.qualified_skills,
            &config.analysis,
        ]
        .iter()
        .flat_map(|rule| rule.labels.iter().cloned())
        .collect();

        // Longest marker first so multi-byte mis-decodings win over single chars
        let mut markers: Vec<&String> = config
            .bullet_markers
            .iter()
            .filter(|m| !m.is_empty())
            .collect();
        markers.sort_by(|a, b| b.len().cmp(&a.len()));
        if markers.is_empty() {
            return Err(ResumeMatcherError::Configuration(
                "At least one bullet marker is required".to_string(),
            ));
        }
        let bullets = Regex::new(
            &markers
                .iter()
                .map(|m| regex::escape(m))
                .collect::<Vec<_>>()
                .join("|"),
        )?;

        Ok(Self {
            missing_skills: SectionMatcher::new(
                "missing skills",
                &config.missing_skills,
                &all_labels,
            )?,
            qualified_skills: SectionMatcher::new(
                "qualified skills",
                &config.qualified_skills,
                &all_labels,
            )?,
            analysis: SectionMatcher::new("analysis", &config.analysis, &all_labels)?,
            bullets,
            min_analysis_chars: config.min_analysis_chars,
            defaults: config.defaults.clone(),
        })
    }

    /// Parse the service's match text; every field falls back independently
    pub fn parse(&self, text: &str) -> ParsedAnalysis {
        let missing_skills =
            self.skill_list(&self.missing_skills, text, &self.defaults.missing_skills);
        let qualified_skills =
            self.skill_list(&self.qualified_skills, text, &self.defaults.qualified_skills);

        let analysis = self
            .fragments(&self.analysis, text)
            .join("\n")
            .trim()
            .to_string();
        let analysis = if analysis.chars().count() > self.min_analysis_chars {
            analysis
        } else {
            debug!("Analysis section missing or too short, using default text");
            self.defaults.analysis.clone()
        };

        ParsedAnalysis {
            missing_skills,
            qualified_skills,
            analysis,
        }
    }

    /// Parse optional, possibly non-string content from a service response
    pub fn parse_optional(&self, text: Option<&str>) -> ParsedAnalysis {
        match text {
            Some(text) => self.parse(text),
            None => ParsedAnalysis::from_defaults(&self.defaults),
        }
    }

    pub fn defaults(&self) -> &DefaultResponses {
        &self.defaults
    }

    fn skill_list(&self, section: &SectionMatcher, text: &str, fallback: &[String]) -> Vec<String> {
        let skills = self.fragments(section, text);
        if skills.is_empty() {
            debug!("No {} extracted, using defaults", section.name);
            fallback.to_vec()
        } else {
            skills
        }
    }

    fn fragments(&self, section: &SectionMatcher, text: &str) -> Vec<String> {
        let Some(body) = section.locate(text) else {
            return Vec::new();
        };

        self.bullets
            .split(body)
            .map(str::trim)
            .filter(|fragment| section.accepts(fragment))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = "Match Score: 72%\n\n\
        Missing Skills:\n\
        • Kubernetes\n\
        • GraphQL\n\n\
        Qualified Skills:\n\
        • Python\n\
        • React\n\
        • AWS\n\n\
        Compatibility Analysis:\n\
        • The candidate has strong backend experience with Python and cloud services.\n\
        • Frontend work with React aligns with the role.\n";

    fn parser() -> AnalysisParser {
        AnalysisParser::new(&ParsingConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_all_sections() {
        let parsed = parser().parse(FULL_RESPONSE);

        assert_eq!(parsed.missing_skills, vec!["Kubernetes", "GraphQL"]);
        assert_eq!(parsed.qualified_skills, vec!["Python", "React", "AWS"]);
        assert_eq!(
            parsed.analysis,
            "The candidate has strong backend experience with Python and cloud services.\n\
             Frontend work with React aligns with the role."
        );
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        let parser = parser();
        let expected = ParsedAnalysis::from_defaults(&DefaultResponses::default());

        assert_eq!(parser.parse(""), expected);
        assert_eq!(parser.parse("Nothing useful here at all."), expected);
        assert_eq!(parser.parse_optional(None), expected);
        assert_eq!(expected.qualified_skills.len(), 5);
        assert_eq!(expected.missing_skills.len(), 5);
    }

    #[test]
    fn test_synonym_labels_case_insensitive() {
        let text = "skills to develop: - Terraform - Golang\n\
                    MATCHING SKILLS: * Docker * Linux\n\
                    analysis: - This profile covers most of the infrastructure work \
                    described in the posting.";
        let parsed = parser().parse(text);

        assert_eq!(parsed.missing_skills, vec!["Terraform", "Golang"]);
        assert_eq!(parsed.qualified_skills, vec!["Docker", "Linux"]);
        assert!(parsed.analysis.starts_with("This profile covers"));
    }

    #[test]
    fn test_misdecoded_bullets() {
        let text = "Missing Skills: â€¢ Docker â€¢ Terraform\n\
                    Qualified Skills: â€¢ Python";
        let parsed = parser().parse(text);

        assert_eq!(parsed.missing_skills, vec!["Docker", "Terraform"]);
        assert_eq!(parsed.qualified_skills, vec!["Python"]);
    }

    #[test]
    fn test_markdown_bold_labels() {
        let text = "**Missing Skills:**\n* Kafka\n* Redis\n\n**Qualified Skills:**\n* Rust\n";
        let parsed = parser().parse(text);

        assert_eq!(parsed.missing_skills, vec!["Kafka", "Redis"]);
        assert_eq!(parsed.qualified_skills, vec!["Rust"]);
    }

    #[test]
    fn test_short_and_label_fragments_dropped() {
        let text = "Missing Skills:\n- Go\n- Soft skills\n- Data Analysis\n- Elixir\n\
                    Qualified Skills:\n- C";
        let parsed = parser().parse(text);

        assert_eq!(parsed.missing_skills, vec!["Elixir"]);
        // Nothing survives, so the defaults are used
        assert_eq!(parsed.qualified_skills, DefaultResponses::default().qualified_skills);
    }

    #[test]
    fn test_fields_fall_back_independently() {
        let text = "Qualified Skills:\n• SQL\n• Tableau\nAnalysis: too short";
        let parsed = parser().parse(text);

        assert_eq!(parsed.qualified_skills, vec!["SQL", "Tableau"]);
        assert_eq!(parsed.missing_skills, DefaultResponses::default().missing_skills);
        assert_eq!(parsed.analysis, DefaultResponses::default().analysis);
    }

    #[test]
    fn test_section_order_does_not_matter() {
        let text = "Qualified Skills:\n• Java\n• Spring\nMissing Skills:\n• Scala\n";
        let parsed = parser().parse(text);

        assert_eq!(parsed.qualified_skills, vec!["Java", "Spring"]);
        assert_eq!(parsed.missing_skills, vec!["Scala"]);
    }

    #[test]
    fn test_embedded_label_truncates_section() {
        let text = "Missing Skills:\n• Docker\n• Exposure to Analysis: tooling\n• Helm\n\
            Qualified Skills:\n• Python";
        let parsed = parser().parse(text);

        assert_eq!(parsed.missing_skills, vec!["Docker", "Exposure to"]);
    }

    #[test]
    fn test_hyphenated_prose_split_at_dash() {
        let text = "Compatibility Analysis:\n\
            The candidate has hands-on experience shipping production services in Python and Go.";
        let parsed = parser().parse(text);

        assert_eq!(
            parsed.analysis,
            "The candidate has hands\non experience shipping production services in Python and Go."
        );
    }

    #[test]
    fn test_custom_labels_from_config() {
        let mut config = ParsingConfig::default();
        config.missing_skills.labels.push("Gaps:".to_string());
        let parser = AnalysisParser::new(&config).unwrap();

        let parsed = parser.parse("Gaps:\n- Rust\n- Zig\n");
        assert_eq!(parsed.missing_skills, vec!["Rust", "Zig"]);
    }

    #[test]
    fn test_rule_without_labels_is_rejected() {
        let mut config = ParsingConfig::default();
        config.qualified_skills.labels = vec!["  ".to_string()];
        assert!(AnalysisParser::new(&config).is_err());
    }
}
